//! Organization use-case service.
//!
//! # Responsibility
//! - Provide the insert/update/delete entry points for organizations.
//! - Delegate persistence to an [`OrganizationRepository`].

use super::log_outcome;
use crate::model::organization::{
    NewOrganization, Organization, OrganizationId, OrganizationPatch,
};
use crate::repo::organization_repo::{OrganizationDeletion, OrganizationRepository};
use crate::repo::RepoResult;
use std::time::Instant;

/// Use-case service wrapper for organization operations.
pub struct OrganizationService<R: OrganizationRepository> {
    repo: R,
}

impl<R: OrganizationRepository> OrganizationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new organization and returns it with its assigned id.
    pub fn insert_organization(
        &mut self,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> RepoResult<Organization> {
        let started_at = Instant::now();
        let request = NewOrganization::new(name, location);
        let result = self.repo.create_organization(&request);
        let id = result.as_ref().map_or(0, |org| org.id);
        log_outcome("organization_insert", format_args!("id={id}"), started_at, &result);
        result
    }

    /// Applies `patch` to organization `id`.
    ///
    /// Returns `NotFound` when no organization has this id.
    pub fn update_organization(
        &mut self,
        id: OrganizationId,
        patch: &OrganizationPatch,
    ) -> RepoResult<Organization> {
        let started_at = Instant::now();
        let result = self.repo.update_organization(id, patch);
        log_outcome("organization_update", format_args!("id={id}"), started_at, &result);
        result
    }

    /// Deletes organization `id`, handling members per the repository policy.
    pub fn delete_organization(&mut self, id: OrganizationId) -> RepoResult<OrganizationDeletion> {
        let started_at = Instant::now();
        let result = self.repo.delete_organization(id);
        let affected = result.as_ref().map_or(0, |deletion| deletion.affected_members);
        log_outcome(
            "organization_delete",
            format_args!("id={id} affected_members={affected}"),
            started_at,
            &result,
        );
        result
    }

    pub fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        self.repo.get_organization(id)
    }

    pub fn find_by_name(&self, name: &str) -> RepoResult<Vec<Organization>> {
        self.repo.find_organizations_by_name(name)
    }

    pub fn list_organizations(&self) -> RepoResult<Vec<Organization>> {
        self.repo.list_organizations()
    }
}
