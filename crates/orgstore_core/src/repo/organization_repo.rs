//! Organization repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `corporates` table.
//! - Apply the configured [`ReferentialPolicy`] when an organization with
//!   members is deleted.
//!
//! # Invariants
//! - Write paths validate input before any SQL runs.
//! - Each write is one transaction; dropping it on error rolls it back.
//! - The policy passed to the repository should match the one the
//!   connection was opened with (see [`crate::db::open_db`]).

use super::error::{EntityKind, RepoError, RepoResult};
use super::schema::{ensure_connection_ready, required_text, CORPORATES_COLUMNS};
use crate::config::ReferentialPolicy;
use crate::model::organization::{
    NewOrganization, Organization, OrganizationId, OrganizationPatch,
};
use rusqlite::{params, Connection, Params, Row};

const ORGANIZATION_SELECT_SQL: &str = "SELECT id, name, location FROM corporates";

/// Outcome of a successful organization delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationDeletion {
    /// Row as it was before deletion.
    pub organization: Organization,
    pub policy: ReferentialPolicy,
    /// Members left dangling (`Orphan`) or deleted along with it (`Cascade`).
    /// Always zero under `Restrict`.
    pub affected_members: usize,
}

/// Repository interface for organization CRUD operations.
pub trait OrganizationRepository {
    fn create_organization(&mut self, request: &NewOrganization) -> RepoResult<Organization>;
    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>>;
    fn find_organizations_by_name(&self, name: &str) -> RepoResult<Vec<Organization>>;
    fn list_organizations(&self) -> RepoResult<Vec<Organization>>;
    fn update_organization(
        &mut self,
        id: OrganizationId,
        patch: &OrganizationPatch,
    ) -> RepoResult<Organization>;
    fn delete_organization(&mut self, id: OrganizationId) -> RepoResult<OrganizationDeletion>;
}

/// SQLite-backed organization repository.
pub struct SqliteOrganizationRepository<'conn> {
    conn: &'conn mut Connection,
    policy: ReferentialPolicy,
}

impl<'conn> SqliteOrganizationRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection, policy: ReferentialPolicy) -> RepoResult<Self> {
        ensure_connection_ready(conn, "corporates", CORPORATES_COLUMNS)?;
        Ok(Self { conn, policy })
    }
}

impl OrganizationRepository for SqliteOrganizationRepository<'_> {
    fn create_organization(&mut self, request: &NewOrganization) -> RepoResult<Organization> {
        request.validate()?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO corporates (name, location) VALUES (?1, ?2);",
            params![request.name.as_str(), request.location.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Organization {
            id,
            name: request.name.clone(),
            location: request.location.clone(),
        })
    }

    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        load_organization(self.conn, id)
    }

    fn find_organizations_by_name(&self, name: &str) -> RepoResult<Vec<Organization>> {
        query_organizations(
            self.conn,
            &format!("{ORGANIZATION_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC;"),
            [name],
        )
    }

    fn list_organizations(&self) -> RepoResult<Vec<Organization>> {
        query_organizations(
            self.conn,
            &format!("{ORGANIZATION_SELECT_SQL} ORDER BY id ASC;"),
            [],
        )
    }

    fn update_organization(
        &mut self,
        id: OrganizationId,
        patch: &OrganizationPatch,
    ) -> RepoResult<Organization> {
        patch.validate()?;

        let tx = self.conn.transaction()?;
        let mut organization = load_organization(&tx, id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Organization, id))?;
        if patch.is_empty() {
            return Ok(organization);
        }
        patch.apply_to(&mut organization);

        tx.execute(
            "UPDATE corporates SET name = ?1, location = ?2 WHERE id = ?3;",
            params![
                organization.name.as_str(),
                organization.location.as_str(),
                id
            ],
        )?;
        tx.commit()?;

        Ok(organization)
    }

    fn delete_organization(&mut self, id: OrganizationId) -> RepoResult<OrganizationDeletion> {
        let tx = self.conn.transaction()?;
        let organization = load_organization(&tx, id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Organization, id))?;

        let referencing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM employees WHERE corporate_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        let referencing = referencing as usize;

        let affected_members = match self.policy {
            ReferentialPolicy::Orphan => referencing,
            ReferentialPolicy::Restrict if referencing > 0 => {
                return Err(RepoError::Conflict(format!(
                    "organization {id} is still referenced by {referencing} member(s)"
                )));
            }
            ReferentialPolicy::Restrict => 0,
            ReferentialPolicy::Cascade => {
                tx.execute("DELETE FROM employees WHERE corporate_id = ?1;", [id])?
            }
        };

        tx.execute("DELETE FROM corporates WHERE id = ?1;", [id])?;
        tx.commit()?;

        Ok(OrganizationDeletion {
            organization,
            policy: self.policy,
            affected_members,
        })
    }
}

/// Decodes `id, name, location` starting at column `start`.
pub(crate) fn organization_from_row(row: &Row<'_>, start: usize) -> RepoResult<Organization> {
    Ok(Organization {
        id: row.get(start)?,
        name: required_text(row, start + 1, "corporates.name")?,
        location: required_text(row, start + 2, "corporates.location")?,
    })
}

fn load_organization(conn: &Connection, id: OrganizationId) -> RepoResult<Option<Organization>> {
    let mut found = query_organizations(
        conn,
        &format!("{ORGANIZATION_SELECT_SQL} WHERE id = ?1;"),
        [id],
    )?;
    Ok(found.pop())
}

fn query_organizations(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> RepoResult<Vec<Organization>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut organizations = Vec::new();
    while let Some(row) = rows.next()? {
        organizations.push(organization_from_row(row, 0)?);
    }
    Ok(organizations)
}
