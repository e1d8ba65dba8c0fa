//! Relational data access for organizations and their members.
//!
//! Entities are persisted in SQLite (`corporates`/`employees`). Callers open
//! a [`Store`], run insert/update/delete operations through the services it
//! hands out, and read back the join/order/group query results as data.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
mod store;

pub use config::{ConfigError, ReferentialPolicy, StoreConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::member::{Member, MemberId, MemberPatch, NewMember};
pub use model::organization::{NewOrganization, Organization, OrganizationId, OrganizationPatch};
pub use model::validation::ValidationError;
pub use query::{
    age_groups, members_by_age, organization_members, run_query_operations, AgeGroup,
    OrganizationMember, QueryReport,
};
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::organization_repo::{
    OrganizationDeletion, OrganizationRepository, SqliteOrganizationRepository,
};
pub use repo::{EntityKind, ErrorKind, RepoError, RepoResult};
pub use service::member_service::MemberService;
pub use service::organization_service::OrganizationService;
pub use store::{SqliteMemberService, SqliteOrganizationService, Store};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
