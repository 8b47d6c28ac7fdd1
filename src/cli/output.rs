//! Output formatting utilities

use crate::domain::{NoteId, NoteRecord};
use crate::infrastructure::Config;
use chrono::{DateTime, Utc};

/// Format notes for display, one line each, in the given order
pub fn format_note_list(records: &[NoteRecord]) -> String {
    if records.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for record in records {
        let id = NoteId::from(record.id.as_str());
        output.push_str(&format!(
            "{:<8}  {:>7}  {:>7}  {}  {}\n",
            id.short(),
            format!("{:.0}", record.x),
            format!("{:.0}", record.y),
            format_timestamp(record.timestamp),
            summarize(&record.content),
        ));
    }
    output
}

/// Millisecond timestamp as `DD-MM-YYYY HH:MM` (UTC)
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(time) => time.format("%d-%m-%Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// First line of the content, shortened for list output
fn summarize(content: &str) -> String {
    const MAX_CHARS: usize = 48;

    let first_line = content.lines().next().unwrap_or("");
    if first_line.is_empty() {
        return "(empty)".to_string();
    }

    let mut summary: String = first_line.chars().take(MAX_CHARS).collect();
    if first_line.chars().count() > MAX_CHARS || content.lines().nth(1).is_some() {
        summary.push('…');
    }
    summary
}

/// Format every config key for `config --list`
pub fn format_config(config: &Config) -> String {
    let mut output = String::new();
    for key in crate::infrastructure::config::CONFIG_KEYS {
        if let Ok(value) = config.get(key) {
            output.push_str(&format!("{} = {}\n", key, value));
        }
    }
    output
}
