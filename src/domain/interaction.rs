//! Per-note interaction state

use crate::domain::spatial::DragSession;
use std::str::FromStr;
use std::time::Instant;

/// Part of a rendered note a pointer gesture started on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureTarget {
    /// Anywhere on the note that is not a control or the text
    #[default]
    Body,
    /// The editable text region
    Content,
    DeleteControl,
    QuoteControl,
}

impl GestureTarget {
    /// Only gestures on the body start a drag
    pub fn starts_drag(&self) -> bool {
        matches!(self, GestureTarget::Body)
    }
}

impl FromStr for GestureTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "body" => Ok(GestureTarget::Body),
            "content" => Ok(GestureTarget::Content),
            "delete" => Ok(GestureTarget::DeleteControl),
            "quote" => Ok(GestureTarget::QuoteControl),
            _ => Err(format!(
                "Invalid gesture target: '{}'. Valid targets are: body, content, delete, quote",
                s
            )),
        }
    }
}

/// Lifecycle phase of a note on the board
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NotePhase {
    #[default]
    Idle,
    Dragging(DragSession),
    /// Exit transition running; the note is still in the collection
    Deleting,
}

impl NotePhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, NotePhase::Dragging(_))
    }
}

/// Handle tying a quote completion back to the request that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteTicket(pub u64);

/// Visual state of a note's quote control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Ready,
    Pending(QuoteTicket),
    /// Error indicator shown until the deadline passes. Without a
    /// deadline it stays until the next request.
    Failed { until: Option<Instant> },
}

impl QuoteState {
    pub fn is_pending(&self) -> bool {
        matches!(self, QuoteState::Pending(_))
    }

    /// Revert an expired error indicator. Returns true when it reverted.
    pub fn expire(&mut self, now: Instant) -> bool {
        match *self {
            QuoteState::Failed { until: Some(until) } if now >= until => {
                *self = QuoteState::Ready;
                true
            }
            _ => false,
        }
    }
}

/// Everything the orchestrator tracks for one note besides its data
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoteInteraction {
    pub phase: NotePhase,
    pub quote: QuoteState,
}
