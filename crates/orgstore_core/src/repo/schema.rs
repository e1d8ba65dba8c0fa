//! Connection readiness checks and shared row decoding.

use super::error::{RepoError, RepoResult};
use crate::db::migrations::{current_user_version, latest_version};
use rusqlite::{Connection, Row};

pub(crate) const CORPORATES_COLUMNS: &[&str] = &["id", "name", "location"];
pub(crate) const EMPLOYEES_COLUMNS: &[&str] = &["id", "name", "age", "corporate_id"];

/// Verifies that `conn` was migrated and carries the expected table shape.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }
    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Reads a text column that the model treats as required.
///
/// Columns are nullable on disk, so a `NULL` is reported as invalid data
/// instead of a type error.
pub(crate) fn required_text(row: &Row<'_>, index: usize, column: &str) -> RepoResult<String> {
    row.get::<_, Option<String>>(index)?
        .ok_or_else(|| RepoError::InvalidData(format!("unexpected NULL in {column}")))
}

pub(crate) fn required_integer(row: &Row<'_>, index: usize, column: &str) -> RepoResult<i64> {
    row.get::<_, Option<i64>>(index)?
        .ok_or_else(|| RepoError::InvalidData(format!("unexpected NULL in {column}")))
}
