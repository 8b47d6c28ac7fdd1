//! Application layer - Use cases and orchestration

pub mod autosave;
pub mod board;
pub mod init;
pub mod manage_config;
pub mod open_board;
pub mod ports;

pub use autosave::AutoSaveTask;
pub use board::{BoardSession, BoardSettings};
pub use open_board::{open_board, settle_deletions, DirectoryBoard};
pub use ports::{Exporter, NoteStore, QuoteError, QuoteIndicator, QuoteSource, Renderer};
