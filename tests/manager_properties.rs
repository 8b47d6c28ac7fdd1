//! Collection invariants of the note manager

use stickyboard::domain::{Note, NoteId, NoteManager, NoteRecord, Position};
use stickyboard::error::BoardError;

fn note(id: &str, content: &str, timestamp: i64) -> Note {
    Note::with_identity(NoteId::from(id), content, Position::new(1.0, 2.0), timestamp)
}

fn ids(manager: &NoteManager) -> Vec<String> {
    manager
        .get_all_notes()
        .iter()
        .map(|n| n.id().to_string())
        .collect()
}

#[test]
fn test_distinct_adds_are_all_retrievable() {
    let mut manager = NoteManager::new();
    for i in 0..25 {
        manager
            .add_note(note(&format!("n{i}"), "text", i * 7 % 5))
            .unwrap();
    }

    assert_eq!(manager.get_all_notes().len(), 25);
    for i in 0..25 {
        assert!(manager.get(&NoteId::from(format!("n{i}"))).is_some());
    }
}

#[test]
fn test_generated_ids_never_collide() {
    let mut manager = NoteManager::new();
    for _ in 0..200 {
        manager.add_note(Note::create("", 0.0, 0.0)).unwrap();
    }
    assert_eq!(manager.len(), 200);
}

#[test]
fn test_duplicate_add_signals_and_keeps_collection() {
    let mut manager = NoteManager::new();
    manager.add_note(note("a", "a", 1)).unwrap();
    manager.add_note(note("b", "b", 2)).unwrap();
    let before = manager.to_json();

    let result = manager.add_note(note("b", "other", 3));
    assert!(matches!(result, Err(BoardError::DuplicateIdentifier(_))));
    assert_eq!(manager.to_json(), before);
}

#[test]
fn test_double_remove_is_silent() {
    let mut manager = NoteManager::new();
    manager.add_note(note("a", "a", 1)).unwrap();
    manager.add_note(note("b", "b", 2)).unwrap();

    manager.remove_note(&NoteId::from("a"));
    let after_first = manager.to_json();
    manager.remove_note(&NoteId::from("a"));
    assert_eq!(manager.to_json(), after_first);
}

#[test]
fn test_descending_reverses_ascending_for_distinct_timestamps() {
    let mut manager = NoteManager::new();
    for (id, ts) in [("p", 40), ("q", 10), ("r", 30), ("s", 20), ("t", 50)] {
        manager.add_note(note(id, id, ts)).unwrap();
    }

    manager.sort_by_ascending();
    let ascending = ids(&manager);
    manager.sort_by_descending();
    let mut descending = ids(&manager);
    descending.reverse();

    assert_eq!(ascending, descending);
    assert_eq!(ascending, vec!["q", "s", "r", "p", "t"]);
}

#[test]
fn test_sorts_are_stable() {
    let mut manager = NoteManager::new();
    for (id, ts) in [("x1", 5), ("y", 1), ("x2", 5), ("x3", 5), ("z", 9)] {
        manager.add_note(note(id, id, ts)).unwrap();
    }

    manager.sort_by_ascending();
    assert_eq!(ids(&manager), vec!["y", "x1", "x2", "x3", "z"]);

    manager.sort_by_descending();
    assert_eq!(ids(&manager), vec!["z", "x1", "x2", "x3", "y"]);
}

#[test]
fn test_sort_scenario_by_content() {
    let mut manager = NoteManager::new();
    manager.add_note(note("1", "a", 100)).unwrap();
    manager.add_note(note("2", "b", 300)).unwrap();
    manager.add_note(note("3", "c", 200)).unwrap();

    manager.sort_by_ascending();
    let contents: Vec<String> = manager
        .get_all_notes()
        .iter()
        .map(|n| n.content().to_string())
        .collect();
    assert_eq!(contents, vec!["a", "c", "b"]);

    manager.sort_by_descending();
    let contents: Vec<String> = manager
        .get_all_notes()
        .iter()
        .map(|n| n.content().to_string())
        .collect();
    assert_eq!(contents, vec!["b", "c", "a"]);
}

#[test]
fn test_to_json_is_pure_and_round_trips() {
    let mut manager = NoteManager::new();
    manager.add_note(note("b", "second\nline", 20)).unwrap();
    manager.add_note(note("a", "", 10)).unwrap();

    let first = manager.to_json();
    let second = manager.to_json();
    assert_eq!(first, second);

    let json = serde_json::to_string(&first).unwrap();
    let records: Vec<NoteRecord> = serde_json::from_str(&json).unwrap();
    let hydrated = NoteManager::from_records(records).unwrap();
    assert_eq!(hydrated.to_json(), first);
    assert_eq!(ids(&hydrated), vec!["b", "a"]);
}
