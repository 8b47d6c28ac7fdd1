//! Collaborator contracts the board core is wired to

use crate::domain::{Note, NoteId, NoteRecord, Position, Size};
use crate::error::Result;
use thiserror::Error;

/// Quote control appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteIndicator {
    Ready,
    Pending,
    Error,
}

/// Visual side of the board
pub trait Renderer {
    /// Create the visual element for a new or hydrated note
    fn mount(&mut self, note: &Note);

    /// Refresh an existing element after a content or position change
    fn update(&mut self, note: &Note);

    /// Give keyboard focus to the note's editable content
    fn focus_content(&mut self, id: &NoteId);

    /// Stack the note above all others
    fn raise(&mut self, id: &NoteId);

    /// Start the exit transition. Completion is reported back through
    /// `BoardSession::finish_deletion`.
    fn begin_exit_transition(&mut self, id: &NoteId);

    /// Drop the visual element
    fn unmount(&mut self, id: &NoteId);

    fn set_quote_indicator(&mut self, id: &NoteId, indicator: QuoteIndicator);

    /// Current board size; queried on every position update
    fn board_bounds(&self) -> Size;

    /// Board origin in viewport coordinates
    fn board_offset(&self) -> Position;

    /// Rendered size of a note
    fn note_size(&self, id: &NoteId) -> Size;
}

/// Durable storage for board snapshots
pub trait NoteStore {
    fn save(&mut self, records: &[NoteRecord]) -> Result<()>;

    /// Previously saved snapshot, if any
    fn load(&self) -> Result<Option<Vec<NoteRecord>>>;
}

/// Hands a snapshot to the user as a file
pub trait Exporter {
    fn export(&mut self, records: &[NoteRecord]) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("quote fetch failed: {0}")]
pub struct QuoteError(pub String);

/// Supplies text for quote augmentation
pub trait QuoteSource {
    fn fetch(&mut self) -> std::result::Result<String, QuoteError>;
}
