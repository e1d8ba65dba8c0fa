//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical member record (`employees` row).
//! - Provide create request and partial-update patch types.
//!
//! # Invariants
//! - `organization_id` may be `None` or dangle; whether a dangling value can
//!   be written depends on the store's referential policy.
//! - `age == 0` is a real value, distinct from "not supplied".

use super::organization::OrganizationId;
use super::validation::{require_age, require_name, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned member identifier (`employees.id`).
pub type MemberId = i64;

/// Child entity referencing one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub age: i64,
    /// Persisted as `employees.corporate_id`.
    pub organization_id: Option<OrganizationId>,
}

/// Insert request for a new member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub age: i64,
    pub organization_id: Option<OrganizationId>,
}

impl NewMember {
    pub fn new(
        name: impl Into<String>,
        age: i64,
        organization_id: Option<OrganizationId>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            organization_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name(&self.name)?;
        require_age(self.age)
    }
}

/// Partial update for a member.
///
/// `organization_id` is tri-state: `None` keeps the stored reference,
/// `Some(None)` clears it and `Some(Some(id))` points it at `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub organization_id: Option<Option<OrganizationId>>,
}

impl MemberPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(Some(organization_id));
        self
    }

    pub fn clear_organization(mut self) -> Self {
        self.organization_id = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.organization_id.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_deref() {
            require_name(name)?;
        }
        if let Some(age) = self.age {
            require_age(age)?;
        }
        Ok(())
    }

    /// Overwrites every supplied field on `member`.
    pub fn apply_to(&self, member: &mut Member) {
        if let Some(name) = &self.name {
            member.name.clone_from(name);
        }
        if let Some(age) = self.age {
            member.age = age;
        }
        if let Some(organization_id) = self.organization_id {
            member.organization_id = organization_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Member {
        Member {
            id: 7,
            name: "Alice".to_string(),
            age: 30,
            organization_id: Some(1),
        }
    }

    #[test]
    fn zero_age_is_applied() {
        let mut member = alice();
        MemberPatch::default().age(0).apply_to(&mut member);
        assert_eq!(member.age, 0);
        assert_eq!(member.name, "Alice");
    }

    #[test]
    fn organization_reference_is_tri_state() {
        let mut member = alice();
        MemberPatch::default().name("Al").apply_to(&mut member);
        assert_eq!(member.organization_id, Some(1));

        MemberPatch::default().organization(2).apply_to(&mut member);
        assert_eq!(member.organization_id, Some(2));

        MemberPatch::default()
            .clear_organization()
            .apply_to(&mut member);
        assert_eq!(member.organization_id, None);
    }

    #[test]
    fn negative_age_fails_validation() {
        assert_eq!(
            NewMember::new("Bob", -1, Some(1)).validate(),
            Err(ValidationError::NegativeAge(-1))
        );
        assert_eq!(
            MemberPatch::default().age(-5).validate(),
            Err(ValidationError::NegativeAge(-5))
        );
        assert!(NewMember::new("Baby", 0, None).validate().is_ok());
    }
}
