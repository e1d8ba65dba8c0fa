//! Join, order-by and group-by-having queries over the current store state.

use crate::model::member::Member;
use crate::model::organization::Organization;
use crate::repo::member_repo::member_from_row;
use crate::repo::organization_repo::organization_from_row;
use crate::repo::schema::required_integer;
use crate::repo::RepoResult;
use log::debug;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Groups must have strictly more members than this to be reported.
pub const DEFAULT_GROUP_MIN_COUNT: i64 = 1;

/// One inner-join row: a member together with the organization it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub organization: Organization,
    pub member: Member,
}

/// Number of members sharing one age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub age: i64,
    pub count: i64,
}

/// All three query results computed against one store state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryReport {
    pub joined: Vec<OrganizationMember>,
    pub ordered_by_age: Vec<Member>,
    pub age_groups: Vec<AgeGroup>,
}

impl QueryReport {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.ordered_by_age.is_empty() && self.age_groups.is_empty()
    }
}

/// Inner join on `corporates.id = employees.corporate_id`.
///
/// Organizations without members and members without a matching
/// organization are excluded.
pub fn organization_members(conn: &Connection) -> RepoResult<Vec<OrganizationMember>> {
    let mut stmt = conn.prepare(
        "SELECT
            c.id, c.name, c.location,
            e.id, e.name, e.age, e.corporate_id
         FROM corporates c
         INNER JOIN employees e ON c.id = e.corporate_id
         ORDER BY c.id ASC, e.id ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut pairs = Vec::new();
    while let Some(row) = rows.next()? {
        pairs.push(OrganizationMember {
            organization: organization_from_row(row, 0)?,
            member: member_from_row(row, 3)?,
        });
    }
    Ok(pairs)
}

/// All members, youngest first; equal ages keep insertion (id) order.
pub fn members_by_age(conn: &Connection) -> RepoResult<Vec<Member>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, corporate_id
         FROM employees
         ORDER BY age ASC, id ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut members = Vec::new();
    while let Some(row) = rows.next()? {
        members.push(member_from_row(row, 0)?);
    }
    Ok(members)
}

/// Groups members by age and keeps groups with more than `min_count` rows.
pub fn age_groups(conn: &Connection, min_count: i64) -> RepoResult<Vec<AgeGroup>> {
    let mut stmt = conn.prepare(
        "SELECT age, COUNT(id) AS member_count
         FROM employees
         GROUP BY age
         HAVING COUNT(id) > ?1
         ORDER BY age ASC;",
    )?;
    let mut rows = stmt.query([min_count])?;
    let mut groups = Vec::new();
    while let Some(row) = rows.next()? {
        groups.push(AgeGroup {
            age: required_integer(row, 0, "employees.age")?,
            count: row.get(1)?,
        });
    }
    Ok(groups)
}

/// Runs the join, order and group queries and returns them together.
pub fn run_query_operations(conn: &Connection) -> RepoResult<QueryReport> {
    let report = QueryReport {
        joined: organization_members(conn)?,
        ordered_by_age: members_by_age(conn)?,
        age_groups: age_groups(conn, DEFAULT_GROUP_MIN_COUNT)?,
    };
    debug!(
        "event=query_report module=query status=ok joined={} ordered={} groups={}",
        report.joined.len(),
        report.ordered_by_age.len(),
        report.age_groups.len()
    );
    Ok(report)
}
