//! Domain model for organizations and their members.
//!
//! # Responsibility
//! - Define the in-memory records mapped onto `corporates`/`employees` rows.
//! - Define create requests and partial-update patches with validation.
//!
//! # Invariants
//! - Record ids are assigned by the store and never chosen by callers.
//! - A patch field set to `None` means "not supplied", never "clear".

pub mod member;
pub mod organization;
pub mod validation;
