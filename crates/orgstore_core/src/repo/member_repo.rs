//! Member repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `employees` table.
//! - Expose the organization → members relationship view.
//!
//! # Invariants
//! - Write paths validate input before any SQL runs.
//! - Organization references are not checked here; with foreign keys
//!   enforced, SQLite rejects dangling ids and the error surfaces as
//!   `RepoError::Conflict`.

use super::error::{EntityKind, RepoError, RepoResult};
use super::schema::{ensure_connection_ready, required_integer, required_text, EMPLOYEES_COLUMNS};
use crate::model::member::{Member, MemberId, MemberPatch, NewMember};
use crate::model::organization::OrganizationId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Params, Row};

const MEMBER_SELECT_SQL: &str = "SELECT id, name, age, corporate_id FROM employees";

/// Repository interface for member CRUD operations.
pub trait MemberRepository {
    fn create_member(&mut self, request: &NewMember) -> RepoResult<Member>;
    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>>;
    fn find_members_by_name(&self, name: &str) -> RepoResult<Vec<Member>>;
    fn list_members(&self) -> RepoResult<Vec<Member>>;
    /// Members referencing `organization_id`, ordered by member id.
    fn list_members_of_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RepoResult<Vec<Member>>;
    fn update_member(&mut self, id: MemberId, patch: &MemberPatch) -> RepoResult<Member>;
    /// Deletes one member and returns the row as it was.
    fn delete_member(&mut self, id: MemberId) -> RepoResult<Member>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "employees", EMPLOYEES_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn create_member(&mut self, request: &NewMember) -> RepoResult<Member> {
        request.validate()?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO employees (name, age, corporate_id) VALUES (?1, ?2, ?3);",
            params![request.name.as_str(), request.age, request.organization_id],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Member {
            id,
            name: request.name.clone(),
            age: request.age,
            organization_id: request.organization_id,
        })
    }

    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>> {
        load_member(self.conn, id)
    }

    fn find_members_by_name(&self, name: &str) -> RepoResult<Vec<Member>> {
        query_members(
            self.conn,
            &format!("{MEMBER_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC;"),
            [name],
        )
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        query_members(
            self.conn,
            &format!("{MEMBER_SELECT_SQL} ORDER BY id ASC;"),
            [],
        )
    }

    fn list_members_of_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RepoResult<Vec<Member>> {
        query_members(
            self.conn,
            &format!("{MEMBER_SELECT_SQL} WHERE corporate_id = ?1 ORDER BY id ASC;"),
            [organization_id],
        )
    }

    fn update_member(&mut self, id: MemberId, patch: &MemberPatch) -> RepoResult<Member> {
        patch.validate()?;

        let tx = self.conn.transaction()?;
        let mut member =
            load_member(&tx, id)?.ok_or_else(|| RepoError::not_found(EntityKind::Member, id))?;
        if patch.is_empty() {
            return Ok(member);
        }

        // Only supplied columns are written, so a stored dangling
        // `corporate_id` never trips foreign key checks on name/age edits.
        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(name) = &patch.name {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(age) = patch.age {
            assignments.push("age = ?");
            bind_values.push(Value::Integer(age));
        }
        if let Some(organization_id) = patch.organization_id {
            assignments.push("corporate_id = ?");
            bind_values.push(organization_id.map_or(Value::Null, Value::Integer));
        }
        bind_values.push(Value::Integer(id));

        tx.execute(
            &format!(
                "UPDATE employees SET {} WHERE id = ?;",
                assignments.join(", ")
            ),
            params_from_iter(bind_values),
        )?;
        tx.commit()?;

        patch.apply_to(&mut member);
        Ok(member)
    }

    fn delete_member(&mut self, id: MemberId) -> RepoResult<Member> {
        let tx = self.conn.transaction()?;
        let member =
            load_member(&tx, id)?.ok_or_else(|| RepoError::not_found(EntityKind::Member, id))?;
        tx.execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(member)
    }
}

/// Decodes `id, name, age, corporate_id` starting at column `start`.
pub(crate) fn member_from_row(row: &Row<'_>, start: usize) -> RepoResult<Member> {
    Ok(Member {
        id: row.get(start)?,
        name: required_text(row, start + 1, "employees.name")?,
        age: required_integer(row, start + 2, "employees.age")?,
        organization_id: row.get(start + 3)?,
    })
}

fn load_member(conn: &Connection, id: MemberId) -> RepoResult<Option<Member>> {
    let mut found = query_members(conn, &format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"), [id])?;
    Ok(found.pop())
}

fn query_members(conn: &Connection, sql: &str, params: impl Params) -> RepoResult<Vec<Member>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut members = Vec::new();
    while let Some(row) = rows.next()? {
        members.push(member_from_row(row, 0)?);
    }
    Ok(members)
}
