use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};

/// Tunables for resolution and commit assembly.
///
/// Nothing here changes which conflicts are detected or what an unresolved
/// conflict resolves to; unresolved conflicts always keep the base side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Log resolutions for paths outside the conflict set at `warn` instead
    /// of `debug`. They are ignored either way.
    pub warn_on_unknown_targets: bool,
    /// Message put on a [`CommitBuilder`](crate::CommitBuilder) when the
    /// caller does not set one.
    pub default_message: String,
    /// Reject conflicts whose path is absent from all three trees.
    pub validate_conflicts: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            warn_on_unknown_targets: true,
            default_message: "Merge branch".to_string(),
            validate_conflicts: true,
        }
    }
}

impl MergeConfig {
    /// Parse a config from TOML. Missing keys take their default.
    pub fn from_toml_str(s: &str) -> MergeResult<Self> {
        toml::from_str(s).map_err(|e| MergeError::Config(e.to_string()))
    }
}
