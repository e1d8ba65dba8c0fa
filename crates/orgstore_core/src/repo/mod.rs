//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for organizations and members.
//! - Keep SQL details out of the service and query callers.
//!
//! # Invariants
//! - Every write runs in its own transaction and is rolled back on error.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`,
//!   `Validation`) in addition to DB transport errors.

pub mod error;
pub mod member_repo;
pub mod organization_repo;
pub(crate) mod schema;

pub use error::{EntityKind, ErrorKind, RepoError, RepoResult};
