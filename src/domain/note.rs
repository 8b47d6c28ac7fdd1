//! Note entity and its persisted record

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique, immutable note identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        NoteId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used for display
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        NoteId(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        NoteId(value)
    }
}

/// Board-relative coordinates of a note's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// A single sticky note
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    content: String,
    position: Position,
    timestamp: i64,
}

impl Note {
    /// Create a note with a new identifier and the current time.
    /// Content and position are taken verbatim.
    pub fn create(content: impl Into<String>, x: f64, y: f64) -> Self {
        Note {
            id: NoteId::generate(),
            content: content.into(),
            position: Position::new(x, y),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Rebuild a note with a known identity (hydration, tests)
    pub fn with_identity(
        id: NoteId,
        content: impl Into<String>,
        position: Position,
        timestamp: i64,
    ) -> Self {
        Note {
            id,
            content: content.into(),
            position,
            timestamp,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn update_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    /// Replace the position verbatim. Callers clamp first.
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.position = Position::new(x, y);
    }

    /// Append a quoted excerpt as a new paragraph
    pub fn append_quote(&mut self, quote: &str) {
        let quoted = format!("\"{}\"", quote.trim());
        if self.content.is_empty() {
            self.content = quoted;
        } else {
            self.content = format!("{}\n\n{}", self.content, quoted);
        }
    }

    pub fn serialize(&self) -> NoteRecord {
        NoteRecord {
            id: self.id.to_string(),
            content: self.content.clone(),
            x: self.position.x,
            y: self.position.y,
            timestamp: self.timestamp,
        }
    }
}

/// Persisted and exported shape of a note.
///
/// Field names and types are the durable contract. Older snapshots with
/// numeric ids or missing fields still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub timestamp: i64,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Note::with_identity(
            NoteId::from(record.id),
            record.content,
            Position::new(record.x, record.y),
            record.timestamp,
        )
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_unique_ids() {
        let a = Note::create("a", 0.0, 0.0);
        let b = Note::create("b", 0.0, 0.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_create_keeps_input_verbatim() {
        let note = Note::create("", -40.0, 9000.5);
        assert_eq!(note.content(), "");
        assert_eq!(note.position(), Position::new(-40.0, 9000.5));
        assert!(note.timestamp() > 0);
    }

    #[test]
    fn test_update_position_does_not_clamp() {
        let mut note = Note::create("x", 10.0, 10.0);
        note.update_position(-5.0, 1e6);
        assert_eq!(note.position(), Position::new(-5.0, 1e6));
    }

    #[test]
    fn test_append_quote() {
        let mut note = Note::create("Monday", 0.0, 0.0);
        note.append_quote("Well begun is half done. ");
        assert_eq!(note.content(), "Monday\n\n\"Well begun is half done.\"");

        let mut empty = Note::create("", 0.0, 0.0);
        empty.append_quote("Hi");
        assert_eq!(empty.content(), "\"Hi\"");
    }

    #[test]
    fn test_serialize_snapshot() {
        let note = Note::with_identity(NoteId::from("n1"), "hello", Position::new(1.5, 2.0), 42);
        let record = note.serialize();
        assert_eq!(
            record,
            NoteRecord {
                id: "n1".to_string(),
                content: "hello".to_string(),
                x: 1.5,
                y: 2.0,
                timestamp: 42,
            }
        );
        assert_eq!(Note::from(record), note);
    }

    #[test]
    fn test_record_json_field_names() {
        let record = Note::with_identity(NoteId::from("n1"), "hi", Position::new(3.0, 4.0), 7)
            .serialize();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "n1", "content": "hi", "x": 3.0, "y": 4.0, "timestamp": 7})
        );
    }

    #[test]
    fn test_record_reads_legacy_shapes() {
        let record: NoteRecord =
            serde_json::from_str(r#"{"id": 1700000000000, "x": 12, "y": 30}"#).unwrap();
        assert_eq!(record.id, "1700000000000");
        assert_eq!(record.content, "");
        assert_eq!(record.x, 12.0);
        assert_eq!(record.timestamp, 0);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(NoteId::from("0123456789").short(), "01234567");
        assert_eq!(NoteId::from("abc").short(), "abc");
    }
}
