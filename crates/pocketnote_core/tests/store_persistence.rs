use pocketnote_core::db::{open_db, open_db_in_memory};
use pocketnote_core::{
    NoteStore, NoteUpdate, RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository,
    SNAPSHOT_KEY,
};
use rusqlite::params;

#[test]
fn persist_then_load_on_fresh_store_reproduces_the_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let (first_id, expected) = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        let (mut store, _) = NoteStore::open(repo).unwrap();
        let first = store.create("first", Some("body one".to_string())).unwrap();
        store.create("second", None).unwrap();
        store.create("third", Some("body three".to_string())).unwrap();
        (first.id, store.list().to_vec())
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let (store, report) = NoteStore::open(repo).unwrap();
    assert_eq!(report.loaded, 3);
    assert!(!report.recovered_from_corrupt);
    assert_eq!(store.list(), expected.as_slice());
    assert_eq!(store.list()[0].id, first_id);
}

#[test]
fn load_on_missing_blob_yields_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let (store, report) = NoteStore::open(repo).unwrap();
    assert_eq!(report.loaded, 0);
    assert!(!report.recovered_from_corrupt);
    assert!(store.is_empty());
}

#[test]
fn load_recovers_from_corrupted_blob_without_failing() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES (?1, ?2);",
        params![SNAPSHOT_KEY, "{definitely not json]["],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let (mut store, report) = NoteStore::open(repo).unwrap();
    assert_eq!(report.loaded, 0);
    assert!(report.recovered_from_corrupt);
    assert!(store.is_empty());

    // The store stays fully usable and the next persist repairs storage.
    store.create("post-recovery", None).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1;",
            [SNAPSHOT_KEY],
            |row| row.get(0),
        )
        .unwrap();
    assert!(stored.contains("post-recovery"));
}

#[test]
fn stored_blob_is_a_json_array_mirroring_memory_after_each_mutation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let (mut store, _) = NoteStore::open(repo).unwrap();

    let a = store.create("A", None).unwrap();
    store.create("B", Some("body".to_string())).unwrap();
    store
        .update(
            a.id,
            NoteUpdate {
                title: Some("A2".to_string()),
                content: None,
            },
        )
        .unwrap();

    let stored: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1;",
            [SNAPSHOT_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&stored).unwrap();
    let array = decoded.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["title"], "A2");
    assert_eq!(array[0]["id"], a.id.to_string());
    assert!(array[0].get("content").is_none());
    assert_eq!(array[1]["content"], "body");
}

/// Repository double whose writes always fail.
struct BrokenWriteRepository;

impl SnapshotRepository for BrokenWriteRepository {
    fn read_snapshot(&self) -> RepoResult<Option<String>> {
        Ok(None)
    }

    fn write_snapshot(&mut self, _blob: &str) -> RepoResult<()> {
        Err(RepoError::Backend("disk full".to_string()))
    }
}

#[test]
fn persistence_failure_does_not_roll_back_the_mutation() {
    let (mut store, _) = NoteStore::open(BrokenWriteRepository).unwrap();

    let note = store.create("still here", None).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(note.id).unwrap().title, "still here");

    // An explicit retry surfaces the failure to the caller.
    let err = store.persist().unwrap_err();
    assert!(err.to_string().contains("disk full"));
}
