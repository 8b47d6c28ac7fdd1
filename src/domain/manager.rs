//! Note collection with uniqueness and ordering invariants

use crate::domain::note::{Note, NoteId, NoteRecord};
use crate::error::{BoardError, Result};
use std::collections::HashSet;
use std::str::FromStr;

/// Direction of a timestamp sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first
    Ascending,
    /// Newest first
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "newest" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order: '{}'. Valid orders are: asc, desc",
                s
            )),
        }
    }
}

/// Owns the board's notes in iteration order
#[derive(Debug, Clone, Default)]
pub struct NoteManager {
    notes: Vec<Note>,
    pending_deletion: HashSet<NoteId>,
}

impl NoteManager {
    pub fn new() -> Self {
        NoteManager::default()
    }

    /// Hydrate from a snapshot, preserving its order
    pub fn from_records(records: Vec<NoteRecord>) -> Result<Self> {
        let mut manager = NoteManager::new();
        for record in records {
            manager.add_note(Note::from(record))?;
        }
        Ok(manager)
    }

    /// Append a note. A colliding id leaves the collection untouched.
    pub fn add_note(&mut self, note: Note) -> Result<()> {
        if self.contains(note.id()) {
            log::error!(
                "event=note_add module=manager status=error reason=duplicate_id id={}",
                note.id()
            );
            return Err(BoardError::DuplicateIdentifier(note.id().clone()));
        }
        self.notes.push(note);
        Ok(())
    }

    /// Remove a note if present; absent ids are a no-op
    pub fn remove_note(&mut self, id: &NoteId) -> Option<Note> {
        self.pending_deletion.remove(id);
        let index = self.notes.iter().position(|note| note.id() == id)?;
        Some(self.notes.remove(index))
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == id)
    }

    pub fn get_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id() == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Owned copy of the notes in current order
    pub fn get_all_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }

    /// Borrowing iterator over the notes in current order
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Note> {
        self.notes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Oldest first; ties keep their relative order
    pub fn sort_by_ascending(&mut self) {
        self.notes.sort_by_key(|note| note.timestamp());
    }

    /// Newest first; ties keep their relative order
    pub fn sort_by_descending(&mut self) {
        self.notes.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    }

    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Ascending => self.sort_by_ascending(),
            SortOrder::Descending => self.sort_by_descending(),
        }
    }

    pub fn to_json(&self) -> Vec<NoteRecord> {
        self.notes.iter().map(Note::serialize).collect()
    }

    /// Resolve a full id or a unique id prefix
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&NoteId> {
        if let Some(note) = self.notes.iter().find(|note| note.id().as_str() == prefix) {
            return Ok(note.id());
        }

        let matches: Vec<&NoteId> = self
            .notes
            .iter()
            .map(Note::id)
            .filter(|id| !prefix.is_empty() && id.as_str().starts_with(prefix))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(BoardError::NoteNotFound(prefix.to_string())),
            _ => Err(BoardError::AmbiguousNoteId {
                prefix: prefix.to_string(),
                matches: matches.len(),
            }),
        }
    }

    /// First phase of deletion: the note stays in the collection.
    /// Returns false when the note is absent or already marked.
    pub fn mark_pending_deletion(&mut self, id: &NoteId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.pending_deletion.insert(id.clone())
    }

    pub fn is_pending_deletion(&self, id: &NoteId) -> bool {
        self.pending_deletion.contains(id)
    }

    /// Second phase of deletion
    pub fn finalize_deletion(&mut self, id: &NoteId) -> Option<Note> {
        self.remove_note(id)
    }
}
