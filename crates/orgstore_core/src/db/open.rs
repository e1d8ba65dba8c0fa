//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure pragmas according to the referential policy.
//! - Echo executed SQL to the `debug` log level.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - `foreign_keys=ON` exactly when the policy enforces references.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::ReferentialPolicy;
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// The file is created when missing.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, policy: ReferentialPolicy) -> DbResult<Connection> {
    open_with("file", policy, || Connection::open(path))
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory(policy: ReferentialPolicy) -> DbResult<Connection> {
    open_with("memory", policy, Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    policy: ReferentialPolicy,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode={mode} policy={}",
        policy.as_str()
    );

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, policy) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, policy: ReferentialPolicy) -> DbResult<()> {
    let foreign_keys = if policy.enforces_foreign_keys() {
        "ON"
    } else {
        "OFF"
    };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.trace(Some(log_statement));
    apply_migrations(conn)?;
    Ok(())
}

/// Echoes every executed statement at debug level.
fn log_statement(sql: &str) {
    debug!("event=sql_trace module=db sql={}", sql.trim());
}
