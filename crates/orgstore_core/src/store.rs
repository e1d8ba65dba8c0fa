//! Caller-owned store handle.
//!
//! # Responsibility
//! - Own one migrated SQLite connection for the caller-scoped lifetime.
//! - Hand out services and run queries with the configured policy.
//!
//! # Invariants
//! - The connection's `foreign_keys` pragma always matches `policy`.
//! - Dropping the store closes the connection.

use crate::config::{ReferentialPolicy, StoreConfig};
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::query::{run_query_operations, QueryReport};
use crate::repo::member_repo::SqliteMemberRepository;
use crate::repo::organization_repo::SqliteOrganizationRepository;
use crate::repo::RepoResult;
use crate::service::member_service::MemberService;
use crate::service::organization_service::OrganizationService;
use rusqlite::Connection;

pub type SqliteOrganizationService<'conn> = OrganizationService<SqliteOrganizationRepository<'conn>>;
pub type SqliteMemberService<'conn> = MemberService<SqliteMemberRepository<'conn>>;

/// Live connection plus the referential policy it was opened with.
pub struct Store {
    conn: Connection,
    policy: ReferentialPolicy,
}

impl Store {
    /// Opens (creating if needed) the database file named by `config`.
    pub fn open(config: &StoreConfig) -> DbResult<Self> {
        let conn = open_db(&config.db_path, config.referential_policy)?;
        Ok(Self {
            conn,
            policy: config.referential_policy,
        })
    }

    pub fn open_in_memory(policy: ReferentialPolicy) -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory(policy)?,
            policy,
        })
    }

    pub fn policy(&self) -> ReferentialPolicy {
        self.policy
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn organizations(&mut self) -> RepoResult<SqliteOrganizationService<'_>> {
        let repo = SqliteOrganizationRepository::try_new(&mut self.conn, self.policy)?;
        Ok(OrganizationService::new(repo))
    }

    pub fn members(&mut self) -> RepoResult<SqliteMemberService<'_>> {
        let repo = SqliteMemberRepository::try_new(&mut self.conn)?;
        Ok(MemberService::new(repo))
    }

    /// Runs the join, order-by-age and age-group queries.
    pub fn query_report(&self) -> RepoResult<QueryReport> {
        run_query_operations(&self.conn)
    }
}
