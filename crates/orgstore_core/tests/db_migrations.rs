use orgstore_core::db::migrations::latest_version;
use orgstore_core::db::{open_db, open_db_in_memory, DbError};
use orgstore_core::ReferentialPolicy;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory(ReferentialPolicy::Orphan).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "corporates");
    assert_table_exists(&conn, "employees");
}

#[test]
fn foreign_keys_pragma_follows_policy() {
    let orphan = open_db_in_memory(ReferentialPolicy::Orphan).unwrap();
    assert_eq!(foreign_keys(&orphan), 0);

    let restrict = open_db_in_memory(ReferentialPolicy::Restrict).unwrap();
    assert_eq!(foreign_keys(&restrict), 1);

    let cascade = open_db_in_memory(ReferentialPolicy::Cascade).unwrap();
    assert_eq!(foreign_keys(&cascade), 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corporate_employee.db");

    let conn_first = open_db(&path, ReferentialPolicy::Orphan).unwrap();
    conn_first
        .execute(
            "INSERT INTO corporates (name, location) VALUES ('TechCorp', 'New York');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path, ReferentialPolicy::Orphan).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_eq!(row_count(&conn_second, "corporates"), 1);
}

#[test]
fn unversioned_database_with_existing_tables_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE corporates (
                id INTEGER NOT NULL PRIMARY KEY,
                name VARCHAR,
                location VARCHAR
            );
            CREATE TABLE employees (
                id INTEGER NOT NULL PRIMARY KEY,
                name VARCHAR,
                age INTEGER,
                corporate_id INTEGER REFERENCES corporates (id)
            );
            INSERT INTO corporates (name, location) VALUES ('HealthInc', 'San Francisco');
            INSERT INTO employees (name, age, corporate_id) VALUES ('B', 20, 1);",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path, ReferentialPolicy::Orphan).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(row_count(&conn, "corporates"), 1);
    assert_eq!(row_count(&conn, "employees"), 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, ReferentialPolicy::Orphan).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn foreign_keys(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
