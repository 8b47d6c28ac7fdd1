//! Board lifecycle orchestration
//!
//! `BoardSession` owns the note collection and the per-note interaction
//! state, and forwards every visible change to the renderer. All methods run
//! on the caller's thread; time-dependent behaviour takes `now` explicitly.

use crate::application::autosave::{AutoSaveTask, DEFAULT_AUTOSAVE_INTERVAL};
use crate::application::ports::{
    Exporter, NoteStore, QuoteError, QuoteIndicator, QuoteSource, Renderer,
};
use crate::domain::{
    clamp_position, CascadeLayout, DragSession, GestureTarget, Note, NoteId, NoteInteraction,
    NoteManager, NotePhase, NoteRecord, Position, QuoteState, QuoteTicket, SortOrder,
};
use crate::error::{BoardError, Result};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a failed quote request keeps its error indicator
pub const DEFAULT_QUOTE_ERROR_DURATION: Duration = Duration::from_millis(1500);

/// Tunables for a board session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardSettings {
    pub cascade: CascadeLayout,
    pub autosave_interval: Duration,
    pub quote_error_duration: Duration,
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            cascade: CascadeLayout::new(20.0, 20.0, 40.0),
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            quote_error_duration: DEFAULT_QUOTE_ERROR_DURATION,
        }
    }
}

/// Lifecycle orchestrator for one board
pub struct BoardSession<R: Renderer, S: NoteStore> {
    manager: NoteManager,
    interactions: HashMap<NoteId, NoteInteraction>,
    quote_requests: HashMap<QuoteTicket, NoteId>,
    next_ticket: u64,
    autosave: AutoSaveTask,
    settings: BoardSettings,
    renderer: R,
    store: S,
}

impl<R: Renderer, S: NoteStore> BoardSession<R, S> {
    /// Start with an empty board
    pub fn new(renderer: R, store: S, settings: BoardSettings) -> Self {
        BoardSession {
            manager: NoteManager::new(),
            interactions: HashMap::new(),
            quote_requests: HashMap::new(),
            next_ticket: 1,
            autosave: AutoSaveTask::new(settings.autosave_interval),
            settings,
            renderer,
            store,
        }
    }

    /// Start from the store's last snapshot, in stored order
    pub fn hydrate(renderer: R, store: S, settings: BoardSettings) -> Result<Self> {
        let records = store.load()?.unwrap_or_default();
        let mut session = BoardSession::new(renderer, store, settings);
        session.manager = NoteManager::from_records(records)?;

        for note in session.manager.iter() {
            session
                .interactions
                .insert(note.id().clone(), NoteInteraction::default());
            session.renderer.mount(note);
        }

        info!(
            "event=board_hydrate module=board status=ok notes={}",
            session.manager.len()
        );
        Ok(session)
    }

    pub fn manager(&self) -> &NoteManager {
        &self.manager
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn autosave(&self) -> &AutoSaveTask {
        &self.autosave
    }

    /// Resolve a full id or unique prefix to a note id
    pub fn resolve_id(&self, prefix: &str) -> Result<NoteId> {
        self.manager.find_by_prefix(prefix).cloned()
    }

    /// Phase of a note; `None` once the note is gone
    pub fn phase(&self, id: &NoteId) -> Option<NotePhase> {
        self.interactions.get(id).map(|state| state.phase)
    }

    pub fn quote_state(&self, id: &NoteId) -> Option<QuoteState> {
        self.interactions.get(id).map(|state| state.quote)
    }

    /// Create a note at a clamped position and give it focus
    pub fn create_note(&mut self, content: &str, x: f64, y: f64) -> Result<NoteId> {
        let mut note = Note::create(content, x, y);
        let placed = self.clamp_for(note.id(), Position::new(x, y));
        note.update_position(placed.x, placed.y);

        let id = note.id().clone();
        self.manager.add_note(note)?;
        self.interactions.insert(id.clone(), NoteInteraction::default());

        if let Some(note) = self.manager.get(&id) {
            self.renderer.mount(note);
        }
        self.renderer.focus_content(&id);

        info!(
            "event=note_create module=board status=ok id={} x={} y={}",
            id, placed.x, placed.y
        );
        Ok(id)
    }

    pub fn edit_note(&mut self, id: &NoteId, text: &str) -> Result<()> {
        let note = self
            .manager
            .get_mut(id)
            .ok_or_else(|| BoardError::NoteNotFound(id.to_string()))?;
        note.update_content(text);
        self.renderer.update(note);
        Ok(())
    }

    /// Place a note programmatically, clamped to the current bounds
    pub fn move_note(&mut self, id: &NoteId, x: f64, y: f64) -> Result<Position> {
        if !self.manager.contains(id) {
            return Err(BoardError::NoteNotFound(id.to_string()));
        }
        let placed = self.clamp_for(id, Position::new(x, y));
        self.apply_position(id, placed);
        Ok(placed)
    }

    /// Enter Dragging when the gesture starts on the note body, and bring
    /// the note to the front.
    /// Returns false when the gesture does not start a drag.
    pub fn begin_drag(
        &mut self,
        id: &NoteId,
        pointer: Position,
        target: GestureTarget,
    ) -> Result<bool> {
        let origin = self
            .manager
            .get(id)
            .map(Note::position)
            .ok_or_else(|| BoardError::NoteNotFound(id.to_string()))?;

        if !target.starts_drag() {
            return Ok(false);
        }

        let board_offset = self.renderer.board_offset();
        let state = self.interactions.entry(id.clone()).or_default();
        if state.phase != NotePhase::Idle {
            return Ok(false);
        }

        state.phase = NotePhase::Dragging(DragSession::begin(pointer, board_offset, origin));
        self.renderer.raise(id);
        debug!("event=drag_start module=board id={}", id);
        Ok(true)
    }

    /// Follow a pointer report while dragging.
    /// Returns the clamped position, or `None` when the note is not dragging.
    pub fn drag_to(&mut self, id: &NoteId, pointer: Position) -> Option<Position> {
        let session = match self.interactions.get(id)?.phase {
            NotePhase::Dragging(session) => session,
            _ => return None,
        };

        let candidate = session.candidate(pointer, self.renderer.board_offset());
        let placed = self.clamp_for(id, candidate);
        self.apply_position(id, placed);
        Some(placed)
    }

    /// Leave Dragging. Returns false when the note was not dragging.
    pub fn end_drag(&mut self, id: &NoteId) -> bool {
        match self.interactions.get_mut(id) {
            Some(state) if state.phase.is_dragging() => {
                state.phase = NotePhase::Idle;
                debug!("event=drag_end module=board id={}", id);
                true
            }
            _ => false,
        }
    }

    /// Start deleting a note. The note stays in the collection, and in every
    /// snapshot, until `finish_deletion` is called.
    /// Returns false for unknown notes and repeated requests.
    pub fn request_delete(&mut self, id: &NoteId) -> bool {
        if !self.manager.mark_pending_deletion(id) {
            return false;
        }

        self.interactions.entry(id.clone()).or_default().phase = NotePhase::Deleting;
        self.renderer.begin_exit_transition(id);
        debug!("event=note_delete module=board status=pending id={}", id);
        true
    }

    /// Exit transition finished: drop the note.
    /// Returns false when no deletion was pending for the id.
    pub fn finish_deletion(&mut self, id: &NoteId) -> bool {
        if !self.manager.is_pending_deletion(id) {
            return false;
        }

        self.manager.finalize_deletion(id);
        self.interactions.remove(id);
        self.quote_requests.retain(|_, owner| *owner != *id);
        self.renderer.unmount(id);
        info!("event=note_delete module=board status=ok id={}", id);
        true
    }

    /// Reorder by timestamp and normalise every position to the cascade.
    /// Active drags are cancelled.
    pub fn sort(&mut self, order: SortOrder) {
        self.manager.sort(order);

        let cascade = self.settings.cascade;
        for (index, note) in self.manager.iter_mut().enumerate() {
            let bounds = self.renderer.board_bounds();
            let size = self.renderer.note_size(note.id());
            let placed = clamp_position(cascade.slot(index), size, bounds);
            note.update_position(placed.x, placed.y);
            self.renderer.update(note);
        }

        for state in self.interactions.values_mut() {
            if state.phase.is_dragging() {
                state.phase = NotePhase::Idle;
            }
        }

        info!(
            "event=board_sort module=board status=ok order={:?} notes={}",
            order,
            self.manager.len()
        );
    }

    /// Issue a quote request. Returns `None` while a request for the same
    /// note is pending, or when the note is being deleted.
    pub fn request_quote(&mut self, id: &NoteId) -> Result<Option<QuoteTicket>> {
        if !self.manager.contains(id) {
            return Err(BoardError::NoteNotFound(id.to_string()));
        }

        let state = self.interactions.entry(id.clone()).or_default();
        if state.phase == NotePhase::Deleting {
            return Ok(None);
        }
        if state.quote.is_pending() {
            debug!("event=quote_request module=board status=ignored id={}", id);
            return Ok(None);
        }

        let ticket = QuoteTicket(self.next_ticket);
        self.next_ticket += 1;
        state.quote = QuoteState::Pending(ticket);
        self.quote_requests.insert(ticket, id.clone());
        self.renderer.set_quote_indicator(id, QuoteIndicator::Pending);
        Ok(Some(ticket))
    }

    /// Apply the outcome of a quote request.
    /// Outcomes for deleted notes or stale tickets are dropped; returns
    /// whether the outcome was applied.
    pub fn complete_quote(
        &mut self,
        ticket: QuoteTicket,
        outcome: std::result::Result<String, QuoteError>,
        now: Instant,
    ) -> bool {
        let Some(id) = self.quote_requests.remove(&ticket) else {
            debug!(
                "event=quote_complete module=board status=detached ticket={}",
                ticket.0
            );
            return false;
        };

        let Some(state) = self.interactions.get_mut(&id) else {
            return false;
        };
        if state.quote != QuoteState::Pending(ticket) {
            return false;
        }

        match outcome {
            Ok(quote) => {
                state.quote = QuoteState::Ready;
                if let Some(note) = self.manager.get_mut(&id) {
                    note.append_quote(&quote);
                    self.renderer.update(note);
                }
                self.renderer.set_quote_indicator(&id, QuoteIndicator::Ready);
            }
            Err(err) => {
                warn!(
                    "event=quote_complete module=board status=error id={} error={}",
                    id, err
                );
                state.quote = QuoteState::Failed {
                    until: now.checked_add(self.settings.quote_error_duration),
                };
                self.renderer.set_quote_indicator(&id, QuoteIndicator::Error);
            }
        }
        true
    }

    /// Request, fetch and apply a quote in one step
    pub fn augment_with_quote(
        &mut self,
        id: &NoteId,
        source: &mut impl QuoteSource,
        now: Instant,
    ) -> Result<bool> {
        match self.request_quote(id)? {
            Some(ticket) => {
                let outcome = source.fetch();
                let succeeded = outcome.is_ok();
                Ok(self.complete_quote(ticket, outcome, now) && succeeded)
            }
            None => Ok(false),
        }
    }

    pub fn start_autosave(&mut self, now: Instant) {
        self.autosave.start(now);
    }

    pub fn stop_autosave(&mut self) {
        self.autosave.stop();
    }

    /// Force a save on the next `poll`
    pub fn trigger_autosave(&mut self) {
        self.autosave.trigger();
    }

    /// Advance timers: revert expired quote indicators and run a due
    /// auto-save. Returns true when a save ran and succeeded.
    pub fn poll(&mut self, now: Instant) -> bool {
        for (id, state) in self.interactions.iter_mut() {
            if state.quote.expire(now) {
                self.renderer.set_quote_indicator(id, QuoteIndicator::Ready);
            }
        }

        if !self.autosave.poll(now) {
            return false;
        }

        match self.save_now() {
            Ok(()) => {
                debug!(
                    "event=autosave module=board status=ok notes={}",
                    self.manager.len()
                );
                true
            }
            Err(err) => {
                error!("event=autosave module=board status=error error={}", err);
                false
            }
        }
    }

    /// Serialized view of the whole board, in current order
    pub fn snapshot(&self) -> Vec<NoteRecord> {
        self.manager.to_json()
    }

    /// Persist the current snapshot
    pub fn save_now(&mut self) -> Result<()> {
        let records = self.manager.to_json();
        self.store.save(&records)
    }

    /// Hand the current snapshot to an exporter. Returns the note count.
    pub fn export(&self, exporter: &mut impl Exporter) -> Result<usize> {
        let records = self.manager.to_json();
        exporter.export(&records)?;
        info!(
            "event=board_export module=board status=ok notes={}",
            records.len()
        );
        Ok(records.len())
    }

    /// Replace the collection with a fresh, empty one
    pub fn clear(&mut self) {
        for note in self.manager.iter() {
            self.renderer.unmount(note.id());
        }
        self.manager = NoteManager::new();
        self.interactions.clear();
        self.quote_requests.clear();
        info!("event=board_clear module=board status=ok");
    }

    fn clamp_for(&self, id: &NoteId, candidate: Position) -> Position {
        let bounds = self.renderer.board_bounds();
        let size = self.renderer.note_size(id);
        clamp_position(candidate, size, bounds)
    }

    fn apply_position(&mut self, id: &NoteId, placed: Position) {
        if let Some(note) = self.manager.get_mut(id) {
            note.update_position(placed.x, placed.y);
            self.renderer.update(note);
        }
    }
}
