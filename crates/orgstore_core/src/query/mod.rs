//! Read-only relational query compositions.
//!
//! # Responsibility
//! - Join organizations with their members.
//! - Order members by age.
//! - Group members by age with a count filter.
//!
//! # Invariants
//! - Results are returned to the caller; nothing is printed here.
//! - Orderings are fully deterministic (ties broken by id).

pub mod relational;

pub use relational::{
    age_groups, members_by_age, organization_members, run_query_operations, AgeGroup,
    OrganizationMember, QueryReport, DEFAULT_GROUP_MIN_COUNT,
};
