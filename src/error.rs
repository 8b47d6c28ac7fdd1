//! Error types for stickyboard

use crate::domain::NoteId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the board
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Not a stickyboard directory: {0}")]
    NotBoardDirectory(PathBuf),

    #[error("Duplicate note identifier: {0}")]
    DuplicateIdentifier(NoteId),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Ambiguous note id '{prefix}' matches {matches} notes")]
    AmbiguousNoteId { prefix: String, matches: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BoardError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BoardError::NotBoardDirectory(_) => 2,
            BoardError::NoteNotFound(_) | BoardError::AmbiguousNoteId { .. } => 3,
            BoardError::DuplicateIdentifier(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            BoardError::NotBoardDirectory(path) => {
                format!(
                    "Not a stickyboard directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'stickyboard init' in this directory to create a new board\n\
                    • Navigate to an existing board directory\n\
                    • Set STICKIES_ROOT environment variable to your board path",
                    path.display()
                )
            }
            BoardError::NoteNotFound(id) => {
                format!(
                    "No note matches id: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'stickyboard list' to see note ids\n\
                    • Ids may be shortened to any unique prefix",
                    id
                )
            }
            BoardError::AmbiguousNoteId { prefix, matches } => {
                format!(
                    "Note id '{}' is ambiguous ({} notes match)\n\n\
                    Suggestions:\n\
                    • Type more characters of the id\n\
                    • Use 'stickyboard list' to see note ids",
                    prefix, matches
                )
            }
            BoardError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: stickyboard config board_width 1280",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using BoardError
pub type Result<T> = std::result::Result<T, BoardError>;
