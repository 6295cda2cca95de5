//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/adareas/adareas.toml`
//! 3. Local config: explicit file passed to [`Settings::load`]
//! 4. Environment variables: `ADAREAS_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_ROOT_LABEL;

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_label: Option<String>,
    pub snapshot_path: Option<PathBuf>,
}

/// Unified configuration for adareas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Label of the implicit root node (default: "world")
    pub root_label: String,
    /// Snapshot target offered to callers of AddSubTree (default: none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            snapshot_path: None,
        }
    }
}

/// Get the XDG config directory for adareas.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "adareas").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("adareas.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.snapshot_path {
            let expanded = expand_env_vars(path.to_string_lossy().as_ref());
            self.snapshot_path = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
            snapshot_path: overlay
                .snapshot_path
                .clone()
                .or_else(|| self.snapshot_path.clone()),
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.root_label.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "root_label must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional config file applied on top of the global one
    pub fn load(local_config: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), local_config)
    }

    /// Load settings from an explicit global file instead of the XDG location.
    ///
    /// A missing global file is skipped; a missing local file is an error.
    pub fn load_layers(
        global_config: Option<&Path>,
        local_config: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(local_path) = local_config {
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply ADAREAS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ADAREAS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("root_label") {
            settings.root_label = val;
        }
        if let Ok(val) = config.get_string("snapshot_path") {
            settings.snapshot_path = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# adareas configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/adareas/adareas.toml
#   Local:  file passed explicitly by the caller
#   Env:    ADAREAS_* environment variables (explicit overrides)

# Label of the implicit root node holding global platforms
# root_label = "world"

# File receiving a full tree dump after each snapshotting AddSubTree call
# snapshot_path = "~/.cache/adareas/snapshot.toml"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_layers(None, None).expect("load defaults");
        assert!(!settings.root_label.is_empty());
    }

    #[test]
    fn given_tilde_in_snapshot_path_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            root_label: "world".to_string(),
            snapshot_path: Some(PathBuf::from("~/snapshots/tree.toml")),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = settings.snapshot_path.unwrap();
        let expanded = expanded.to_string_lossy();
        assert!(
            expanded.starts_with(&home),
            "snapshot_path should start with home dir: {}",
            expanded
        );
        assert!(!expanded.contains('~'));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings {
            root_label: "world".to_string(),
            snapshot_path: Some(PathBuf::from("/tmp/base.toml")),
        };
        let overlay = RawSettings {
            root_label: Some("global".to_string()),
            snapshot_path: None,
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.root_label, "global");
        assert_eq!(merged.snapshot_path, Some(PathBuf::from("/tmp/base.toml")));
    }

    #[test]
    fn given_blank_root_label_when_validating_then_errors() {
        let settings = Settings {
            root_label: "  ".to_string(),
            snapshot_path: None,
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.root_label.is_none());
        assert!(raw.snapshot_path.is_none());
    }
}
