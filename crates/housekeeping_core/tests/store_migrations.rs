use housekeeping_core::db::migrations::{latest_version, schema_version};
use housekeeping_core::db::{open_db, open_db_in_memory, DbError};
use housekeeping_core::{SqliteStore, StoreError};
use rusqlite::{params, Connection};

#[test]
fn fresh_store_has_items_table_and_grouping_index() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert!(schema_object_exists(&conn, "table", "items"));
    assert!(schema_object_exists(&conn, "index", "idx_items_gsi1"));
}

#[test]
fn items_table_rejects_half_populated_index_keys() {
    let conn = open_db_in_memory().unwrap();

    let err = conn
        .execute(
            "INSERT INTO items (pk, sk, gsi1pk, gsi1sk) VALUES (?1, ?2, ?3, NULL);",
            params!["ROOM#palm#1001", "METADATA", "HOTEL#palm"],
        )
        .unwrap_err();
    assert!(err.to_string().contains("CHECK"), "{err}");
}

#[test]
fn reopening_a_store_file_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("housekeeping.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO items (pk, sk) VALUES ('HOTEL#palm', 'METADATA');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn store_files_use_wal_journaling() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("wal.sqlite3")).unwrap();

    let mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = match SqliteStore::open(&path) {
        Ok(_) => panic!("store must refuse a newer schema"),
        Err(err) => err,
    };
    assert!(matches!(err, StoreError::Connectivity(_)));
}

#[test]
fn unreachable_store_file_is_a_connectivity_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-parent").join("store.sqlite3");

    let err = match SqliteStore::open(&path) {
        Ok(_) => panic!("opening under a missing directory should fail"),
        Err(err) => err,
    };
    assert!(matches!(err, StoreError::Connectivity(_)));
}

fn schema_object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2);",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}
