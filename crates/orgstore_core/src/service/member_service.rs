//! Member use-case service.

use super::log_outcome;
use crate::model::member::{Member, MemberId, MemberPatch, NewMember};
use crate::model::organization::OrganizationId;
use crate::repo::member_repo::MemberRepository;
use crate::repo::RepoResult;
use std::time::Instant;

/// Use-case service wrapper for member operations.
pub struct MemberService<R: MemberRepository> {
    repo: R,
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new member.
    ///
    /// The organization id is stored as given; whether it must exist depends
    /// on the referential policy the connection was opened with.
    pub fn insert_member(
        &mut self,
        name: impl Into<String>,
        age: i64,
        organization_id: Option<OrganizationId>,
    ) -> RepoResult<Member> {
        let started_at = Instant::now();
        let request = NewMember::new(name, age, organization_id);
        let result = self.repo.create_member(&request);
        let id = result.as_ref().map_or(0, |member| member.id);
        log_outcome("member_insert", format_args!("id={id}"), started_at, &result);
        result
    }

    /// Applies `patch` to member `id`; `NotFound` when absent.
    pub fn update_member(&mut self, id: MemberId, patch: &MemberPatch) -> RepoResult<Member> {
        let started_at = Instant::now();
        let result = self.repo.update_member(id, patch);
        log_outcome("member_update", format_args!("id={id}"), started_at, &result);
        result
    }

    pub fn delete_member(&mut self, id: MemberId) -> RepoResult<Member> {
        let started_at = Instant::now();
        let result = self.repo.delete_member(id);
        log_outcome("member_delete", format_args!("id={id}"), started_at, &result);
        result
    }

    pub fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>> {
        self.repo.get_member(id)
    }

    pub fn find_by_name(&self, name: &str) -> RepoResult<Vec<Member>> {
        self.repo.find_members_by_name(name)
    }

    pub fn list_members(&self) -> RepoResult<Vec<Member>> {
        self.repo.list_members()
    }

    pub fn members_of(&self, organization_id: OrganizationId) -> RepoResult<Vec<Member>> {
        self.repo.list_members_of_organization(organization_id)
    }
}
