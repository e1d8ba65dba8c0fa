//! Store configuration.
//!
//! # Responsibility
//! - Describe where the database lives and how references are enforced.
//! - Apply `ORGSTORE_*` environment overrides on top of defaults.
//!
//! # Invariants
//! - Defaults reproduce the historical behavior: file
//!   `corporate_employee.db`, dangling member references allowed.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DB_FILE_NAME: &str = "corporate_employee.db";

pub const ENV_DB_PATH: &str = "ORGSTORE_DB_PATH";
pub const ENV_REFERENTIAL_POLICY: &str = "ORGSTORE_REFERENTIAL_POLICY";
pub const ENV_LOG_LEVEL: &str = "ORGSTORE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ORGSTORE_LOG_DIR";

/// What happens to members when their organization is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialPolicy {
    /// Delete the organization only; members keep a dangling id.
    /// Foreign keys are not enforced, so inserts may also reference
    /// organizations that do not exist.
    #[default]
    Orphan,
    /// Refuse to delete an organization that still has members.
    Restrict,
    /// Delete referencing members in the same unit of work.
    Cascade,
}

impl ReferentialPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orphan => "orphan",
            Self::Restrict => "restrict",
            Self::Cascade => "cascade",
        }
    }

    /// Whether connections opened under this policy run with
    /// `PRAGMA foreign_keys = ON`.
    pub fn enforces_foreign_keys(self) -> bool {
        !matches!(self, Self::Orphan)
    }
}

impl Display for ReferentialPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferentialPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "orphan" => Ok(Self::Orphan),
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            other => Err(ConfigError::InvalidValue {
                key: ENV_REFERENTIAL_POLICY,
                value: other.to_string(),
                expected: "orphan|restrict|cascade",
            }),
        }
    }
}

/// Configuration errors raised while reading overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    Empty(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {key}; expected {expected}"),
            Self::Empty(key) => write!(f, "{key} must not be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Runtime configuration for opening a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default)]
    pub referential_policy: ReferentialPolicy,

    /// One of `trace|debug|info|warn|error`.
    #[serde(default = "default_level")]
    pub log_level: String,

    /// Absolute directory for rolling log files. Logging stays off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_FILE_NAME)
}

fn default_level() -> String {
    default_log_level().to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            referential_policy: ReferentialPolicy::default(),
            log_level: default_level(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Builds a config from defaults plus process environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Unset keys keep their current value; set-but-blank keys are rejected.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.db_path = PathBuf::from(non_empty(ENV_DB_PATH, &path)?);
        }
        if let Some(policy) = lookup(ENV_REFERENTIAL_POLICY) {
            self.referential_policy = non_empty(ENV_REFERENTIAL_POLICY, &policy)?.parse()?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = non_empty(ENV_LOG_LEVEL, &level)?.to_string();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(non_empty(ENV_LOG_DIR, &dir)?));
        }
        Ok(self)
    }
}

fn non_empty<'a>(key: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty(key));
    }
    Ok(trimmed)
}
