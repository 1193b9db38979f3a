use pocketnote_core::db::open_db_in_memory;
use pocketnote_core::{NoteStore, NoteUpdate, SqliteSnapshotRepository, StoreEvent};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn subscribers_observe_every_store_change() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = NoteStore::new(repo);

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(Box::new(move |event: &StoreEvent| {
        sink.borrow_mut().push(event.clone());
    }));

    store.load().unwrap();
    let note = store.create("watched", None).unwrap();
    store
        .update(
            note.id,
            NoteUpdate {
                title: Some("watched 2".to_string()),
                content: None,
            },
        )
        .unwrap();
    store.delete(note.id).unwrap();

    let seen = events.borrow();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], StoreEvent::Loaded { count: 0 });
    match &seen[1] {
        StoreEvent::Created(created) => assert_eq!(created.id, note.id),
        other => panic!("expected Created, got {other:?}"),
    }
    match &seen[2] {
        StoreEvent::Updated(updated) => assert_eq!(updated.title, "watched 2"),
        other => panic!("expected Updated, got {other:?}"),
    }
    assert_eq!(seen[3], StoreEvent::Deleted(note.id));
}

#[test]
fn rejected_mutations_and_noop_deletes_emit_no_events() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let (mut store, _) = NoteStore::open(repo).unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(Box::new(move |event: &StoreEvent| {
        sink.borrow_mut().push(event.clone());
    }));

    store.create("  ", None).unwrap_err();
    store.delete(uuid::Uuid::new_v4()).unwrap();
    assert!(events.borrow().is_empty());
}

#[test]
fn unsubscribed_callbacks_stop_receiving_events() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let (mut store, _) = NoteStore::open(repo).unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let id = store.subscribe(Box::new(move |event: &StoreEvent| {
        sink.borrow_mut().push(event.clone());
    }));

    store.create("before", None).unwrap();
    assert!(store.unsubscribe(id));
    store.create("after", None).unwrap();

    assert_eq!(events.borrow().len(), 1);
    assert!(!store.unsubscribe(id));
}
