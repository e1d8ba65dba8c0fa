//! Input validation shared by create requests and patches.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected input, detected before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trimming.
    BlankName,
    /// Location is empty after trimming.
    BlankLocation,
    /// Age must be zero or positive.
    NegativeAge(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
            Self::BlankLocation => write!(f, "location must not be blank"),
            Self::NegativeAge(age) => write!(f, "age must not be negative, got {age}"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }
    Ok(())
}

pub(crate) fn require_location(location: &str) -> Result<(), ValidationError> {
    if location.trim().is_empty() {
        return Err(ValidationError::BlankLocation);
    }
    Ok(())
}

pub(crate) fn require_age(age: i64) -> Result<(), ValidationError> {
    if age < 0 {
        return Err(ValidationError::NegativeAge(age));
    }
    Ok(())
}
