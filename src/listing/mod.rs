//! Listing parser: numbered executor text -> typed entries.
//!
//! The executor answers a `list` instruction with markdown-flavored prose such as
//!
//! ```text
//! 1. **report.pdf**
//!    Type: application/pdf
//!    Size: 1.2 MB
//!    Modified: 2024-01-01
//! ```
//!
//! `parse` reconstructs one `ListingEntry` per numbered item that carries a
//! `**bold**` name. Anything else is skipped; malformed input yields fewer
//! entries, never an error.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Placeholder for any metadata field the listing does not provide.
pub const UNKNOWN: &str = "Unknown";

/// Maximum number of lines scanned after a header for metadata.
pub const METADATA_WINDOW: usize = 5;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.").expect("valid regex"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*{2,}(.+?)\*{2,}").expect("valid regex"));

const TYPE_LABEL: &str = "Type:";
const SIZE_LABEL: &str = "Size:";
const MODIFIED_LABEL: &str = "Modified:";

const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/* ---- Data Structures ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Classify a raw type label. Substring match, case-sensitive.
    pub fn from_type_label(type_label: &str) -> Self {
        if type_label.contains("folder") || type_label.contains(FOLDER_MIME) {
            EntryKind::Folder
        } else {
            EntryKind::File
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, EntryKind::Folder)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::File => "file",
            EntryKind::Folder => "folder",
        })
    }
}

/// Coarse display category derived from the type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Folder,
    Document,
    Image,
    Video,
    Audio,
    Archive,
    Other,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Folder => "folder",
            FileCategory::Document => "document",
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::Archive => "archive",
            FileCategory::Other => "other",
        }
    }
}

/// One file or folder reported by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub kind: EntryKind,
    pub type_label: String,
    pub size_label: String,
    pub modified_label: String,
}

impl ListingEntry {
    /// Entry with every metadata label set to `Unknown`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_labels(name, UNKNOWN, UNKNOWN, UNKNOWN)
    }

    /// Build an entry from raw labels; `kind` is always derived from `type_label`.
    pub fn with_labels(
        name: impl Into<String>,
        type_label: impl Into<String>,
        size_label: impl Into<String>,
        modified_label: impl Into<String>,
    ) -> Self {
        let type_label = type_label.into();
        Self {
            name: name.into(),
            kind: EntryKind::from_type_label(&type_label),
            type_label,
            size_label: size_label.into(),
            modified_label: modified_label.into(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Display category. Folders win; otherwise the first matching type hint.
    pub fn category(&self) -> FileCategory {
        if self.is_folder() {
            return FileCategory::Folder;
        }
        let t = self.type_label.as_str();
        if t.contains("document") || t.contains("text") {
            FileCategory::Document
        } else if t.contains("image") {
            FileCategory::Image
        } else if t.contains("video") {
            FileCategory::Video
        } else if t.contains("audio") {
            FileCategory::Audio
        } else if t.contains("zip") || t.contains("rar") {
            FileCategory::Archive
        } else {
            FileCategory::Other
        }
    }
}

/* ---- Parsing ---- */

/// Whether a line starts a numbered item (`1.`, `12.` after trimming).
pub fn is_item_header(line: &str) -> bool {
    HEADER_RE.is_match(line.trim())
}

/// First non-blank `**...**` run on the line, trimmed.
pub fn extract_name(line: &str) -> Option<&str> {
    NAME_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|name| !name.is_empty())
}

/// Value after the first occurrence of `label`, trimmed. `None` when the label
/// is absent or its value is blank.
fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let (_, rest) = line.split_once(label)?;
    let value = rest.trim();
    (!value.is_empty()).then_some(value)
}

#[derive(Default)]
struct Metadata<'a> {
    type_label: Option<&'a str>,
    size_label: Option<&'a str>,
    modified_label: Option<&'a str>,
}

impl<'a> Metadata<'a> {
    /// Assign the line to the first label it carries that is still unset.
    fn absorb(&mut self, line: &'a str) {
        let slots = [
            (TYPE_LABEL, &mut self.type_label),
            (SIZE_LABEL, &mut self.size_label),
            (MODIFIED_LABEL, &mut self.modified_label),
        ];
        for (label, slot) in slots {
            if !line.contains(label) {
                continue;
            }
            if slot.is_none() {
                *slot = labeled_value(line, label);
            }
            return;
        }
    }
}

/// Collect metadata from the lines following a header, bounded by
/// `METADATA_WINDOW` and by the next item header.
fn scan_metadata<'a>(following: &[&'a str]) -> Metadata<'a> {
    let mut meta = Metadata::default();
    for &line in following.iter().take(METADATA_WINDOW) {
        if is_item_header(line) {
            break;
        }
        meta.absorb(line);
    }
    meta
}

/// Parse an executor listing into entries, in order of appearance.
pub fn parse(text: &str) -> Vec<ListingEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if !is_item_header(line) {
            continue;
        }
        let Some(name) = extract_name(line) else {
            tracing::trace!(line = idx + 1, "numbered item without a bold name; skipped");
            continue;
        };
        let meta = scan_metadata(&lines[idx + 1..]);
        entries.push(ListingEntry::with_labels(
            name,
            meta.type_label.unwrap_or(UNKNOWN),
            meta.size_label.unwrap_or(UNKNOWN),
            meta.modified_label.unwrap_or(UNKNOWN),
        ));
    }

    tracing::debug!(count = entries.len(), "parsed listing");
    entries
}

/// Partition into (files, folders), keeping relative order inside each half.
pub fn split_by_kind(entries: Vec<ListingEntry>) -> (Vec<ListingEntry>, Vec<ListingEntry>) {
    entries.into_iter().partition(|e| !e.is_folder())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "1. **report.pdf**
Type: application/pdf
Size: 1.2 MB
Modified: 2024-01-01
2. **Photos**
Type: application/vnd.google-apps.folder
Size: -
Modified: 2024-02-02";

    #[test]
    fn scenario_two_entries() {
        let entries = parse(SCENARIO);
        assert_eq!(
            entries,
            vec![
                ListingEntry {
                    name: "report.pdf".into(),
                    kind: EntryKind::File,
                    type_label: "application/pdf".into(),
                    size_label: "1.2 MB".into(),
                    modified_label: "2024-01-01".into(),
                },
                ListingEntry {
                    name: "Photos".into(),
                    kind: EntryKind::Folder,
                    type_label: "application/vnd.google-apps.folder".into(),
                    size_label: "-".into(),
                    modified_label: "2024-02-02".into(),
                },
            ]
        );
    }

    #[test]
    fn header_without_bold_name_is_dropped() {
        let entries = parse("1. report.pdf\nType: application/pdf\n2. *single*\n3. ****");
        assert!(entries.is_empty());
    }

    #[test]
    fn blank_bold_name_is_dropped() {
        assert!(parse("1. **   **").is_empty());
    }

    #[test]
    fn missing_metadata_defaults_to_unknown() {
        let entries = parse("1. **notes.txt**");
        assert_eq!(entries, vec![ListingEntry::named("notes.txt")]);
        assert_eq!(entries[0].type_label, UNKNOWN);
        assert_eq!(entries[0].size_label, UNKNOWN);
        assert_eq!(entries[0].modified_label, UNKNOWN);
        assert_eq!(entries[0].kind, EntryKind::File);
    }

    #[test]
    fn order_is_preserved() {
        let text = "1. **A**\nfoo\nbar\nbaz\n2. **B**\nfoo\nbar\nbaz";
        let names: Vec<_> = parse(text).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let text = "1. **dup.txt**\nType: text/plain\n2. **dup.txt**\nType: text/plain";
        let entries = parse(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], entries[1]);
    }

    #[test]
    fn folder_classification() {
        assert_eq!(EntryKind::from_type_label("folder"), EntryKind::Folder);
        assert_eq!(EntryKind::from_type_label(FOLDER_MIME), EntryKind::Folder);
        assert_eq!(EntryKind::from_type_label("application/pdf"), EntryKind::File);
        assert_eq!(EntryKind::from_type_label("Folder"), EntryKind::File);
        assert_eq!(EntryKind::from_type_label(UNKNOWN), EntryKind::File);
    }

    #[test]
    fn reordered_metadata_is_found() {
        let text = "1. **a.png**\nModified: yesterday\nType: image/png\nSize: 3 KB";
        let e = &parse(text)[0];
        assert_eq!(e.type_label, "image/png");
        assert_eq!(e.size_label, "3 KB");
        assert_eq!(e.modified_label, "yesterday");
    }

    #[test]
    fn interleaved_prose_within_window() {
        let text = "1. **a.png**\n\n(shared)\nType: image/png\nSize: 3 KB\nModified: today";
        let e = &parse(text)[0];
        assert_eq!(e.type_label, "image/png");
        assert_eq!(e.size_label, "3 KB");
        assert_eq!(e.modified_label, "today");
    }

    #[test]
    fn metadata_beyond_window_is_ignored() {
        let text = "1. **late.txt**\n-\n-\n-\n-\n-\nType: text/plain";
        assert_eq!(parse(text)[0].type_label, UNKNOWN);
    }

    #[test]
    fn window_stops_at_next_header() {
        let text = "1. **first**\n2. **second**\nType: folder";
        let entries = parse(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].type_label, UNKNOWN);
        assert_eq!(entries[1].type_label, "folder");
        assert!(entries[1].is_folder());
    }

    #[test]
    fn header_shaped_metadata_line_starts_new_item() {
        let text = "1. **A**\n2. Type: folder\nSize: 1 KB";
        let entries = parse(text);
        // "2. Type: folder" is a header without a bold name: dropped, and it
        // ends A's metadata window.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "A");
        assert_eq!(entries[0].type_label, UNKNOWN);
        assert_eq!(entries[0].size_label, UNKNOWN);
    }

    #[test]
    fn indented_emoji_metadata() {
        let text = "📁 *Files in folder:*\n\n   1. **Budget 2024.xlsx**\n   📄 Type: application/vnd.ms-excel\n   📏 Size: 20 KB\n   📅 Modified: 2024-03-03\n";
        let e = &parse(text)[0];
        assert_eq!(e.name, "Budget 2024.xlsx");
        assert_eq!(e.type_label, "application/vnd.ms-excel");
        assert_eq!(e.size_label, "20 KB");
        assert_eq!(e.modified_label, "2024-03-03");
    }

    #[test]
    fn blank_label_value_stays_unknown() {
        let e = &parse("1. **x**\nType:   \nSize: 1 B")[0];
        assert_eq!(e.type_label, UNKNOWN);
        assert_eq!(e.size_label, "1 B");
    }

    #[test]
    fn first_bold_run_wins() {
        let e = &parse("1. **first** and **second**")[0];
        assert_eq!(e.name, "first");
    }

    #[test]
    fn blank_bold_run_is_skipped_for_next() {
        assert_eq!(extract_name("1. **  ** **real**"), Some("real"));
        let entries = parse("1. **  ** **real**\nType: text/plain");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "real");
        assert_eq!(entries[0].type_label, "text/plain");
    }

    #[test]
    fn extra_asterisks_stay_out_of_name() {
        assert_eq!(parse("1. ****foo**")[0].name, "foo");
        assert_eq!(extract_name("***bold***"), Some("bold"));
        assert_eq!(extract_name("**a*b**"), Some("a*b"));
    }

    #[test]
    fn category_follows_type_hints() {
        let cat = |t: &str| ListingEntry::with_labels("x", t, UNKNOWN, UNKNOWN).category();
        assert_eq!(cat(FOLDER_MIME), FileCategory::Folder);
        assert_eq!(cat("application/vnd.google-apps.document"), FileCategory::Document);
        assert_eq!(cat("text/plain"), FileCategory::Document);
        assert_eq!(cat("image/jpeg"), FileCategory::Image);
        assert_eq!(cat("video/mp4"), FileCategory::Video);
        assert_eq!(cat("audio/mpeg"), FileCategory::Audio);
        assert_eq!(cat("application/zip"), FileCategory::Archive);
        assert_eq!(cat("application/pdf"), FileCategory::Other);
    }

    #[test]
    fn split_keeps_relative_order() {
        let (files, folders) = split_by_kind(parse(SCENARIO));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "report.pdf");
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Photos");
    }

    #[test]
    fn prose_only_yields_nothing() {
        assert!(parse("No files found in the specified folder").is_empty());
        assert!(parse("").is_empty());
    }
}
