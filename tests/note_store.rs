use std::cell::Cell;
use std::rc::Rc;

use scribble_notes::storage::NOTES_KEY;
use scribble_notes::{KeyValueStore, MemoryStore, NoteStore, SearchQuery};

/// A clock that advances one millisecond per reading.
fn ticking(start: i64) -> Box<dyn FnMut() -> i64> {
    let now = Rc::new(Cell::new(start));
    Box::new(move || {
        now.set(now.get() + 1);
        now.get()
    })
}

fn new_store() -> NoteStore<MemoryStore> {
    NoteStore::with_clock(MemoryStore::new(), ticking(1_000))
}

fn titles(store: &NoteStore<MemoryStore>, filter: &str) -> Vec<String> {
    store.list(filter).iter().map(|n| n.title.clone()).collect()
}

#[test]
fn empty_note_leaves_collection_unchanged() {
    let mut store = new_store();
    store.add("keep", "", "");
    assert!(store.add("", "", "category only").is_none());
    assert!(store.add("  ", " ", "").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn newest_note_lists_first() {
    let mut store = new_store();
    store.add("A", "x", "");
    store.add("B", "y", "");
    assert_eq!(titles(&store, ""), ["B", "A"]);
}

#[test]
fn delete_by_id_from_listed_order() {
    let mut store = new_store();
    store.add("A", "x", "");
    store.add("B", "y", "");

    let a = store.list("")[1].id;
    assert!(store.delete(a));
    assert_eq!(titles(&store, ""), ["B"]);
    assert!(store.get(a).is_none());
}

#[test]
fn unknown_ids_are_silent_no_ops() {
    let mut store = new_store();
    let id = store.add("A", "x", "").unwrap();
    store.delete(id);
    store.add("B", "y", "");

    assert!(!store.delete(id));
    assert!(!store.update(id, "C", "z", ""));
    assert_eq!(store.len(), 1);
    assert_eq!(titles(&store, ""), ["B"]);
}

#[test]
fn update_preserves_timestamp_and_persists() {
    let mut store = new_store();
    let id = store.add("A", "x", "").unwrap();
    let created = store.get(id).unwrap().timestamp;
    store.add("B", "y", "");

    assert!(store.update(id, "A2", "x2", "work"));
    let note = store.get(id).unwrap();
    assert_eq!((note.title.as_str(), note.content.as_str(), note.category.as_str()), ("A2", "x2", "work"));
    assert_eq!(note.timestamp, created);
    // edits do not bump a note to the top
    assert_eq!(titles(&store, ""), ["B", "A2"]);

    let persisted = store.storage().get(NOTES_KEY).unwrap().unwrap();
    assert!(persisted.contains("A2"));
}

#[test]
fn filter_is_case_insensitive_over_all_fields() {
    let mut store = new_store();
    store.add("Shopping", "eggs", "home");
    store.add("Standup", "demo PROTOTYPE", "Work");
    store.add("Misc", "", "");

    assert_eq!(titles(&store, "shop"), ["Shopping"]);
    assert_eq!(titles(&store, "prototype"), ["Standup"]);
    assert_eq!(titles(&store, "WORK"), ["Standup"]);
    assert_eq!(titles(&store, "s"), ["Misc", "Standup", "Shopping"]);
    assert!(store.list("nothing here").is_empty());
}

#[test]
fn equal_timestamps_keep_insertion_order() {
    let mut store = NoteStore::with_clock(MemoryStore::new(), Box::new(|| 42));
    store.add("first", "", "");
    store.add("second", "", "");
    store.add("third", "", "");
    assert_eq!(titles(&store, ""), ["first", "second", "third"]);
}

#[test]
fn regex_listing_uses_same_order() {
    let mut store = new_store();
    store.add("todo 1", "", "");
    store.add("note", "", "");
    store.add("TODO 2", "", "");
    let query = SearchQuery::parse(r"todo \d", true).unwrap();
    let listed: Vec<_> = store.list_matching(&query).iter().map(|n| n.title.as_str()).collect();
    assert_eq!(listed, ["TODO 2", "todo 1"]);
}

#[test]
fn export_then_reload_reproduces_collection() {
    let mut store = new_store();
    store.add("A", "x", "one");
    let b = store.add("B", "y", "two").unwrap();
    store.add("C", "z", "");
    store.update(b, "B!", "y!", "two");

    let exported = String::from_utf8(store.export()).unwrap();
    assert!(exported.contains("\n  "), "export is pretty-printed");

    let reloaded = NoteStore::open(MemoryStore::new().with_value(NOTES_KEY, exported));
    assert_eq!(reloaded.notes(), store.notes());
    let original: Vec<_> = store.list("").into_iter().cloned().collect();
    let restored: Vec<_> = reloaded.list("").into_iter().cloned().collect();
    assert_eq!(restored, original);
}

#[test]
fn every_mutation_is_persisted_immediately() {
    let mut store = new_store();
    let id = store.add("A", "x", "").unwrap();
    let reload = |store: &NoteStore<MemoryStore>| {
        NoteStore::open(store.storage().clone()).notes().to_vec()
    };
    assert_eq!(reload(&store), store.notes());

    store.update(id, "A", "changed", "");
    assert_eq!(reload(&store), store.notes());

    store.delete(id);
    assert!(reload(&store).is_empty());
}

#[test]
fn malformed_storage_is_coerced_on_open() {
    let raw = r#"[
        "plain string",
        {"title": "no time"},
        {"title": "dated", "content": "c", "category": "k", "timestamp": 99}
    ]"#;
    let store = NoteStore::with_clock(MemoryStore::new().with_value(NOTES_KEY, raw), Box::new(|| 500));
    assert_eq!(store.len(), 3);
    assert_eq!(store.notes()[0].content, "plain string");
    assert_eq!(store.notes()[1].timestamp, 500);
    assert_eq!(store.notes()[2].timestamp, 99);
    assert_eq!(store.list("")[2].title, "dated");
}
