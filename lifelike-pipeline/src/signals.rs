//! Lifecycle signal names, kept as configuration.
//!
//! Distinguishing "creation presave" from "edit presave" relies on a
//! host-specific transient flag, and the avatar field name varies between
//! host profiles. Both are inherently fragile across host versions, so they
//! are read from `lifelike.toml` (or the host's config store) instead of
//! being hardcoded. A missing or malformed file falls back to defaults with
//! a warning — signal configuration must never block startup.

use lifelike_cms::CmsAdapter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn default_edit_marker() -> String {
    "avatar_delete".to_string()
}

fn default_avatar_field() -> String {
    "avatar".to_string()
}

/// The host-version-specific signal names the user lifecycle depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleSignals {
    /// Context key the host sets only on edits, never on creation.
    #[serde(default = "default_edit_marker")]
    pub edit_marker: String,
    /// Field handled by the second (presave) phase of user creation.
    #[serde(default = "default_avatar_field")]
    pub avatar_field: String,
}

impl Default for LifecycleSignals {
    fn default() -> Self {
        Self {
            edit_marker: default_edit_marker(),
            avatar_field: default_avatar_field(),
        }
    }
}

impl LifecycleSignals {
    /// Loads signal names from `lifelike.toml` next to the process (or the
    /// path named by `LIFELIKE_CONFIG`), falling back to defaults.
    pub fn load() -> Self {
        let path = std::env::var("LIFELIKE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("lifelike.toml"));
        Self::load_from(&path)
    }

    /// Loads signal names from an explicit path.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SignalsFile>(&contents) {
                Ok(file) => {
                    info!("loaded lifecycle signals from {:?}", path);
                    file.signals
                }
                Err(e) => {
                    warn!(
                        "failed to parse {:?}: {}. Falling back to default signals.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Reads signal names from the host's config store. The keys are owned
    /// and defaulted by the host; absent keys yield the built-in defaults.
    pub fn from_adapter(adapter: &dyn CmsAdapter) -> Self {
        let defaults = Self::default();
        let edit_marker = adapter
            .config_get("lifelike.edit_marker", json!(defaults.edit_marker))
            .as_str()
            .map(str::to_string)
            .unwrap_or(defaults.edit_marker);
        let avatar_field = adapter
            .config_get("lifelike.avatar_field", json!(defaults.avatar_field))
            .as_str()
            .map(str::to_string)
            .unwrap_or(defaults.avatar_field);
        Self {
            edit_marker,
            avatar_field,
        }
    }
}

/// Raw TOML structure matching the `lifelike.toml` format.
#[derive(Deserialize, Default)]
struct SignalsFile {
    #[serde(default)]
    signals: LifecycleSignals,
}
