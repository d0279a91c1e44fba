use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};
use crate::policy::MergeConflictPolicy;

/// Configuration for a [`MergeEngine`](crate::MergeEngine).
///
/// ```toml
/// default_policy = "prefer_destination"
/// log_conflicts = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Policy given to sessions that do not pick their own.
    pub default_policy: MergeConflictPolicy,
    /// Emit an `info` event for every resolved conflict.
    pub log_conflicts: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            default_policy: MergeConflictPolicy::PreferSource,
            log_conflicts: false,
        }
    }
}

impl MergeConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> MergeResult<Self> {
        toml::from_str(text).map_err(|e| MergeError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> MergeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MergeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> MergeResult<String> {
        toml::to_string(self).map_err(|e| MergeError::Config(e.to_string()))
    }
}
