// config.rs — Tracker configuration.
//
// Limits for caller input plus the optional audit log location. Hosts
// either take the defaults or load a `tracker.toml`; every field has a
// default so a partial file works.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Tracker limits and audit settings, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum goal title length, in characters.
    #[serde(default = "default_max_title_chars")]
    pub max_title_chars: usize,

    /// Maximum milestone description length, in characters.
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,

    /// Maximum number of principals a goal may be shared with.
    #[serde(default = "default_max_shared_principals")]
    pub max_shared_principals: usize,

    /// Where to write the audit log. None disables auditing.
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
}

fn default_max_title_chars() -> usize {
    128
}

fn default_max_description_chars() -> usize {
    256
}

fn default_max_shared_principals() -> usize {
    32
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_title_chars: default_max_title_chars(),
            max_description_chars: default_max_description_chars(),
            max_shared_principals: default_max_shared_principals(),
            audit_log: None,
        }
    }
}

impl TrackerConfig {
    /// Parse a `tracker.toml` document. Missing fields take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
