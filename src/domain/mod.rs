//! Domain layer - Notes, their collection and spatial rules

pub mod interaction;
pub mod manager;
pub mod note;
pub mod spatial;

pub use interaction::{GestureTarget, NoteInteraction, NotePhase, QuoteState, QuoteTicket};
pub use manager::{NoteManager, SortOrder};
pub use note::{Note, NoteId, NoteRecord, Position};
pub use spatial::{clamp_position, CascadeLayout, DragSession, Size};
