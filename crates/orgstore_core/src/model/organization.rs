//! Organization domain model.
//!
//! # Responsibility
//! - Define the canonical organization record (`corporates` row).
//! - Provide create request and partial-update patch types.
//!
//! # Invariants
//! - `id` is assigned by SQLite on insert.
//! - Patches only overwrite fields they carry.

use super::validation::{require_location, require_name, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned organization identifier (`corporates.id`).
pub type OrganizationId = i64;

/// Parent entity grouping members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub location: String,
}

/// Insert request for a new organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub location: String,
}

impl NewOrganization {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name(&self.name)?;
        require_location(&self.location)
    }
}

/// Partial update for an organization.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl OrganizationPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_deref() {
            require_name(name)?;
        }
        if let Some(location) = self.location.as_deref() {
            require_location(location)?;
        }
        Ok(())
    }

    /// Overwrites every supplied field on `organization`.
    pub fn apply_to(&self, organization: &mut Organization) {
        if let Some(name) = &self.name {
            organization.name.clone_from(name);
        }
        if let Some(location) = &self.location {
            organization.location.clone_from(location);
        }
    }
}
