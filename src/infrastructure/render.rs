//! Headless renderer
//!
//! Keeps a record of what a visual front end would have been asked to do.
//! Exit transitions complete as soon as the host drains them.

use crate::application::ports::{QuoteIndicator, Renderer};
use crate::domain::{Note, NoteId, Position, Size};
use std::collections::{HashMap, VecDeque};

/// One request received by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Mounted(NoteId),
    Updated(NoteId),
    Focused(NoteId),
    Raised(NoteId),
    ExitStarted(NoteId),
    Unmounted(NoteId),
    Indicator(NoteId, QuoteIndicator),
}

#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    bounds: Size,
    offset: Position,
    note_size: Size,
    sizes: HashMap<NoteId, Size>,
    stacking: Vec<NoteId>,
    transitions: VecDeque<NoteId>,
    events: Vec<RenderEvent>,
}

impl HeadlessRenderer {
    pub fn new(bounds: Size, note_size: Size) -> Self {
        HeadlessRenderer {
            bounds,
            offset: Position::default(),
            note_size,
            sizes: HashMap::new(),
            stacking: Vec::new(),
            transitions: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Simulate a viewport resize
    pub fn resize(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    pub fn set_board_offset(&mut self, offset: Position) {
        self.offset = offset;
    }

    /// Override the rendered size of one note
    pub fn set_note_size(&mut self, id: &NoteId, size: Size) {
        self.sizes.insert(id.clone(), size);
    }

    /// Exit transitions that have finished, oldest first
    pub fn drain_finished_transitions(&mut self) -> Vec<NoteId> {
        self.transitions.drain(..).collect()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Mounted notes from bottom to top
    pub fn stacking_order(&self) -> &[NoteId] {
        &self.stacking
    }
}

impl Renderer for HeadlessRenderer {
    fn mount(&mut self, note: &Note) {
        self.stacking.push(note.id().clone());
        self.events.push(RenderEvent::Mounted(note.id().clone()));
    }

    fn update(&mut self, note: &Note) {
        self.events.push(RenderEvent::Updated(note.id().clone()));
    }

    fn focus_content(&mut self, id: &NoteId) {
        self.events.push(RenderEvent::Focused(id.clone()));
    }

    fn raise(&mut self, id: &NoteId) {
        if let Some(index) = self.stacking.iter().position(|other| other == id) {
            let raised = self.stacking.remove(index);
            self.stacking.push(raised);
        }
        self.events.push(RenderEvent::Raised(id.clone()));
    }

    fn begin_exit_transition(&mut self, id: &NoteId) {
        self.transitions.push_back(id.clone());
        self.events.push(RenderEvent::ExitStarted(id.clone()));
    }

    fn unmount(&mut self, id: &NoteId) {
        self.stacking.retain(|other| other != id);
        self.sizes.remove(id);
        self.events.push(RenderEvent::Unmounted(id.clone()));
    }

    fn set_quote_indicator(&mut self, id: &NoteId, indicator: QuoteIndicator) {
        self.events.push(RenderEvent::Indicator(id.clone(), indicator));
    }

    fn board_bounds(&self) -> Size {
        self.bounds
    }

    fn board_offset(&self) -> Position {
        self.offset
    }

    fn note_size(&self, id: &NoteId) -> Size {
        self.sizes.get(id).copied().unwrap_or(self.note_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> HeadlessRenderer {
        HeadlessRenderer::new(Size::new(500.0, 500.0), Size::new(100.0, 50.0))
    }

    #[test]
    fn test_raise_moves_note_to_top() {
        let mut r = renderer();
        let a = Note::create("a", 0.0, 0.0);
        let b = Note::create("b", 0.0, 0.0);
        r.mount(&a);
        r.mount(&b);

        r.raise(a.id());
        assert_eq!(r.stacking_order(), &[b.id().clone(), a.id().clone()]);
    }

    #[test]
    fn test_transitions_drain_once() {
        let mut r = renderer();
        let id = NoteId::from("x");
        r.begin_exit_transition(&id);

        assert_eq!(r.drain_finished_transitions(), vec![id]);
        assert!(r.drain_finished_transitions().is_empty());
    }

    #[test]
    fn test_note_size_override() {
        let mut r = renderer();
        let id = NoteId::from("big");
        assert_eq!(r.note_size(&id), Size::new(100.0, 50.0));

        r.set_note_size(&id, Size::new(300.0, 300.0));
        assert_eq!(r.note_size(&id), Size::new(300.0, 300.0));

        r.unmount(&id);
        assert_eq!(r.note_size(&id), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_resize_changes_bounds() {
        let mut r = renderer();
        r.resize(Size::new(320.0, 240.0));
        assert_eq!(r.board_bounds(), Size::new(320.0, 240.0));
    }
}
