/*!
Value enums shared by subcommands.

  SummarySubject  file | folder   (which summary instruction to send)
  EntryFilter     all | files | folders   (client-side listing filter)
*/

use std::fmt;

use crate::dispatch::CommandIntent;
use crate::listing::ListingEntry;

/// What `summary` should summarize.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SummarySubject {
    File,
    Folder,
}

impl SummarySubject {
    pub fn intent(&self, path: impl Into<String>) -> CommandIntent {
        match self {
            SummarySubject::File => CommandIntent::file_summary(path),
            SummarySubject::Folder => CommandIntent::folder_summary(path),
        }
    }
}

impl fmt::Display for SummarySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SummarySubject::File => "file",
            SummarySubject::Folder => "folder",
        })
    }
}

/// Which entries of a listing to show.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum EntryFilter {
    #[default]
    All,
    Files,
    Folders,
}

impl EntryFilter {
    pub fn keeps(&self, entry: &ListingEntry) -> bool {
        match self {
            EntryFilter::All => true,
            EntryFilter::Files => !entry.is_folder(),
            EntryFilter::Folders => entry.is_folder(),
        }
    }

    /// Apply the filter, keeping order.
    pub fn apply(&self, entries: Vec<ListingEntry>) -> Vec<ListingEntry> {
        entries.into_iter().filter(|e| self.keeps(e)).collect()
    }
}

impl fmt::Display for EntryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryFilter::All => "all",
            EntryFilter::Files => "files",
            EntryFilter::Folders => "folders",
        })
    }
}
