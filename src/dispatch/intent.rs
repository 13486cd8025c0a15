//! Typed intents and their instruction grammar.

use std::fmt;

use serde::Serialize;

/// A user-requested operation, before serialization into instruction text.
///
/// Paths are absolute, `/`-rooted virtual paths supplied by the caller and are
/// inserted verbatim; nothing here resolves or validates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum CommandIntent {
    List { path: String },
    Delete { path: String },
    Move { source: String, destination: String },
    Copy { source: String, destination: String },
    FileSummary { path: String },
    FolderSummary { path: String },
    Help,
}

impl CommandIntent {
    pub fn list(path: impl Into<String>) -> Self {
        CommandIntent::List { path: path.into() }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        CommandIntent::Delete { path: path.into() }
    }

    pub fn move_to(source: impl Into<String>, destination: impl Into<String>) -> Self {
        CommandIntent::Move {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn copy_to(source: impl Into<String>, destination: impl Into<String>) -> Self {
        CommandIntent::Copy {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn file_summary(path: impl Into<String>) -> Self {
        CommandIntent::FileSummary { path: path.into() }
    }

    pub fn folder_summary(path: impl Into<String>) -> Self {
        CommandIntent::FolderSummary { path: path.into() }
    }

    /// Short operation name used in logs and human output.
    pub fn verb(&self) -> &'static str {
        match self {
            CommandIntent::List { .. } => "list",
            CommandIntent::Delete { .. } => "delete",
            CommandIntent::Move { .. } => "move",
            CommandIntent::Copy { .. } => "copy",
            CommandIntent::FileSummary { .. } | CommandIntent::FolderSummary { .. } => "summarize",
            CommandIntent::Help => "help",
        }
    }

    /// Delete, move and copy change remote state; callers refresh afterwards.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            CommandIntent::Delete { .. } | CommandIntent::Move { .. } | CommandIntent::Copy { .. }
        )
    }

    /// Error text shown when the executor fails without saying why.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            CommandIntent::List { .. } => "Failed to load files",
            CommandIntent::Delete { .. } => "Failed to delete file",
            CommandIntent::Move { .. } => "Failed to move file",
            CommandIntent::Copy { .. } => "Failed to copy file",
            CommandIntent::FileSummary { .. } => "Failed to get file summary",
            CommandIntent::FolderSummary { .. } => "Failed to get folder summary",
            CommandIntent::Help => "Failed to load help",
        }
    }
}

impl fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandIntent::List { path } => write!(f, "list {path}"),
            CommandIntent::Delete { path } => write!(f, "delete {path}"),
            CommandIntent::Move {
                source,
                destination,
            } => write!(f, "move {source} to {destination}"),
            CommandIntent::Copy {
                source,
                destination,
            } => write!(f, "copy {source} to {destination}"),
            CommandIntent::FileSummary { path } => write!(f, "file summary {path}"),
            CommandIntent::FolderSummary { path } => write!(f, "folder summary {path}"),
            CommandIntent::Help => f.write_str("help"),
        }
    }
}

/// Serialize an intent into the executor's instruction text.
pub fn build(intent: &CommandIntent) -> String {
    intent.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_grammar() {
        assert_eq!(build(&CommandIntent::list("/")), "list /");
        assert_eq!(build(&CommandIntent::delete("/a.txt")), "delete /a.txt");
        assert_eq!(
            build(&CommandIntent::move_to("/a.txt", "/folder")),
            "move /a.txt to /folder"
        );
        assert_eq!(
            build(&CommandIntent::copy_to("/a.txt", "/backup")),
            "copy /a.txt to /backup"
        );
        assert_eq!(
            build(&CommandIntent::file_summary("/report.pdf")),
            "file summary /report.pdf"
        );
        assert_eq!(
            build(&CommandIntent::folder_summary("/Photos")),
            "folder summary /Photos"
        );
        assert_eq!(build(&CommandIntent::Help), "help");
    }

    #[test]
    fn paths_are_inserted_verbatim() {
        assert_eq!(
            build(&CommandIntent::move_to("/My Docs/q1 report.pdf", "/Archive 2024")),
            "move /My Docs/q1 report.pdf to /Archive 2024"
        );
    }

    #[test]
    fn fallbacks_are_never_empty() {
        let all = [
            CommandIntent::list("/"),
            CommandIntent::delete("/x"),
            CommandIntent::move_to("/x", "/y"),
            CommandIntent::copy_to("/x", "/y"),
            CommandIntent::file_summary("/x"),
            CommandIntent::folder_summary("/x"),
            CommandIntent::Help,
        ];
        for intent in &all {
            assert!(!intent.fallback_message().is_empty(), "{intent:?}");
        }
    }

    #[test]
    fn mutation_flags() {
        assert!(CommandIntent::delete("/x").is_mutation());
        assert!(CommandIntent::copy_to("/x", "/y").is_mutation());
        assert!(!CommandIntent::list("/").is_mutation());
        assert!(!CommandIntent::Help.is_mutation());
    }
}
