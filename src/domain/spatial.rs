//! Spatial constraints: clamping, cascade layout and drag offsets

use crate::domain::note::Position;
use serde::{Deserialize, Serialize};

/// Width and height of a board or a rendered note
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Clamp a candidate top-left corner so the note stays on the board.
///
/// A board smaller than the note pins that axis to 0.
pub fn clamp_position(candidate: Position, note: Size, board: Size) -> Position {
    Position::new(
        clamp_axis(candidate.x, board.width - note.width),
        clamp_axis(candidate.y, board.height - note.height),
    )
}

fn clamp_axis(value: f64, upper: f64) -> f64 {
    let upper = if upper.is_finite() { upper.max(0.0) } else { 0.0 };
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, upper)
}

/// Fixed-column, incrementing-row placement applied after a sort
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeLayout {
    pub x: f64,
    pub y: f64,
    pub step: f64,
}

impl CascadeLayout {
    pub fn new(x: f64, y: f64, step: f64) -> Self {
        CascadeLayout { x, y, step }
    }

    /// Unclamped slot for the note at `index` in sorted order
    pub fn slot(&self, index: usize) -> Position {
        Position::new(self.x, self.y + self.step * index as f64)
    }
}

/// Pointer-to-note offset captured when a drag starts.
///
/// The offset never changes during the drag, so a clamped frame does not
/// make the note jump when the pointer comes back in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    offset_x: f64,
    offset_y: f64,
}

impl DragSession {
    /// `pointer` and `board_offset` are viewport coordinates,
    /// `note_origin` is board-relative.
    pub fn begin(pointer: Position, board_offset: Position, note_origin: Position) -> Self {
        DragSession {
            offset_x: pointer.x - board_offset.x - note_origin.x,
            offset_y: pointer.y - board_offset.y - note_origin.y,
        }
    }

    /// Unclamped board-relative position for a pointer report
    pub fn candidate(&self, pointer: Position, board_offset: Position) -> Position {
        Position::new(
            pointer.x - board_offset.x - self.offset_x,
            pointer.y - board_offset.y - self.offset_y,
        )
    }

    pub fn offset(&self) -> Position {
        Position::new(self.offset_x, self.offset_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: Size = Size {
        width: 500.0,
        height: 500.0,
    };
    const NOTE: Size = Size {
        width: 100.0,
        height: 50.0,
    };

    #[test]
    fn test_clamp_right_edge() {
        let clamped = clamp_position(Position::new(520.0, 10.0), NOTE, BOARD);
        assert_eq!(clamped, Position::new(400.0, 10.0));
    }

    #[test]
    fn test_clamp_negative_and_bottom() {
        assert_eq!(
            clamp_position(Position::new(-30.0, 480.0), NOTE, BOARD),
            Position::new(0.0, 450.0)
        );
    }

    #[test]
    fn test_clamp_leaves_valid_input_unchanged() {
        for candidate in [
            Position::new(0.0, 0.0),
            Position::new(400.0, 450.0),
            Position::new(123.25, 77.5),
        ] {
            assert_eq!(clamp_position(candidate, NOTE, BOARD), candidate);
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let once = clamp_position(Position::new(999.0, -1.0), NOTE, BOARD);
        assert_eq!(clamp_position(once, NOTE, BOARD), once);
    }

    #[test]
    fn test_board_smaller_than_note_pins_to_zero() {
        let tiny = Size::new(60.0, 20.0);
        assert_eq!(
            clamp_position(Position::new(35.0, 10.0), NOTE, tiny),
            Position::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_non_finite_candidate() {
        let clamped = clamp_position(Position::new(f64::NAN, f64::INFINITY), NOTE, BOARD);
        assert_eq!(clamped, Position::new(0.0, 450.0));
    }

    #[test]
    fn test_cascade_slots() {
        let layout = CascadeLayout::new(20.0, 20.0, 40.0);
        assert_eq!(layout.slot(0), Position::new(20.0, 20.0));
        assert_eq!(layout.slot(3), Position::new(20.0, 140.0));
    }

    #[test]
    fn test_drag_offset_is_fixed() {
        let board_offset = Position::new(10.0, 60.0);
        let session = DragSession::begin(
            Position::new(135.0, 95.0),
            board_offset,
            Position::new(100.0, 20.0),
        );
        assert_eq!(session.offset(), Position::new(25.0, 15.0));

        // Pointer moves 40 right and 5 up: the note follows exactly.
        let next = session.candidate(Position::new(175.0, 90.0), board_offset);
        assert_eq!(next, Position::new(140.0, 15.0));

        // Returning to the start pointer returns to the start origin.
        let back = session.candidate(Position::new(135.0, 95.0), board_offset);
        assert_eq!(back, Position::new(100.0, 20.0));
    }
}
