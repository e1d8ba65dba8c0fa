//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repository calls into the insert/update/delete operations.
//! - Emit one outcome log event per write operation.
//!
//! # Invariants
//! - Services never bypass repository validation or transactions.
//! - Errors are returned to the caller unchanged after logging.

pub mod member_service;
pub mod organization_service;

use crate::repo::RepoResult;
use log::{info, warn};
use std::fmt::Display;
use std::time::Instant;

/// Logs the outcome of one unit of work.
fn log_outcome<T>(event: &str, subject: impl Display, started_at: Instant, result: &RepoResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event={event} module=service status=ok {subject} duration_ms={duration_ms}"
        ),
        Err(err) => warn!(
            "event={event} module=service status=error {subject} duration_ms={duration_ms} error_kind={} error={err}",
            err.kind().as_str()
        ),
    }
}
