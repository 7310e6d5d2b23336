//! Application configuration.
//!
//! The configuration is loaded from a JSON file
//! (`$XDG_CONFIG_HOME/grprouter/config.json` unless `--config <path>` is
//! given).  Every field is optional; a minimal `{}` file yields the
//! compiled-in two-screen layout.
//!
//! # Example
//!
//! ```json
//! {
//!   "modifier": "alt",
//!   "main_screen": 1,
//!   "secondary_screen": 0,
//!   "groups": [
//!     { "name": "1", "screen_affinity": 1, "layout": "monadtall" },
//!     { "name": "6", "screen_affinity": 0, "matches": ["brave-browser"] }
//!   ],
//!   "window_rules": [
//!     { "match": { "title": "cursor" }, "group": "1" }
//!   ]
//! }
//! ```

use crate::bindings::{self, BindingError, Modifier};
use crate::group::{AffinityPartition, Group};
use crate::rules::WindowRule;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Modifier for the group chords (`<mod>+G`, `<mod>+shift+G`).
    pub modifier: Modifier,
    /// Screen index of the main display.
    pub main_screen: usize,
    /// Screen index of the secondary display.
    pub secondary_screen: usize,
    /// All groups, in binding order.
    pub groups: Vec<Group>,
    /// Explicit main-screen subset.  When absent, each group's
    /// `screen_affinity` decides.
    pub main_screen_groups: Option<Vec<String>>,
    /// Title/class rules applied when a window opens.
    pub window_rules: Vec<WindowRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modifier: Modifier::Alt,
            main_screen: 1,
            secondary_screen: 0,
            groups: default_groups(),
            main_screen_groups: None,
            window_rules: vec![
                WindowRule::title("cursor", "3"),
                WindowRule::title("wezterm", "2"),
            ],
        }
    }
}

fn default_groups() -> Vec<Group> {
    vec![
        Group::new("1", 1).with_layout("monadtall").with_label("\u{f31a}"),
        Group::new("2", 1).with_layout("monadtall").with_label("\u{f0171}"),
        Group::new("3", 1).with_layout("monadtall").with_label("\u{f0171}"),
        Group::new("4", 1)
            .with_layout("monadtall")
            .with_label("\u{f0171}")
            .with_matches(&["android_studio"]),
        Group::new("5", 1)
            .with_layout("monadthreecol")
            .with_label("\u{f0b79}")
            .with_matches(&["obsidian", "slack"]),
        Group::new("6", 0)
            .with_layout("monadtall")
            .with_label("\u{f268}")
            .with_matches(&["brave-browser"]),
        Group::new("7", 0).with_layout("max").with_label("\u{f269}"),
    ]
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(config)
    }

    /// Like [`Config::load`], but a file that does not exist yields the
    /// compiled-in defaults.  Any other read or parse failure is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Check the group list and build the affinity partition from it.
    pub fn partition(&self) -> Result<AffinityPartition, ConfigError> {
        if self.main_screen == self.secondary_screen {
            return Err(ConfigError::Invalid(format!(
                "main and secondary screen are both {}",
                self.main_screen
            )));
        }
        if self.modifier == Modifier::Shift {
            return Err(ConfigError::Invalid(
                "shift cannot be the group modifier, it is reserved for moving windows".into(),
            ));
        }
        if self.groups.is_empty() {
            return Err(ConfigError::Invalid("no groups configured".into()));
        }

        let mut seen = HashSet::new();
        let mut keys = HashSet::new();
        for g in &self.groups {
            if g.name.is_empty() {
                return Err(ConfigError::Invalid("group with empty name".into()));
            }
            bindings::validate_key(&g.name)?;
            if !seen.insert(g.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate group {:?}", g.name)));
            }
            // Chord keys are case-insensitive.
            if !keys.insert(g.name.to_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "group {:?} differs from another group only in case",
                    g.name
                )));
            }
            if g.screen_affinity != self.main_screen && g.screen_affinity != self.secondary_screen {
                return Err(ConfigError::Invalid(format!(
                    "group {:?} prefers screen {}, which is neither main ({}) nor secondary ({})",
                    g.name, g.screen_affinity, self.main_screen, self.secondary_screen
                )));
            }
        }

        let all: Vec<String> = self.groups.iter().map(|g| g.name.clone()).collect();
        let partition = match &self.main_screen_groups {
            Some(main) => {
                if let Some(unknown) = main.iter().find(|n| !seen.contains(n.as_str())) {
                    return Err(ConfigError::UnknownGroup(unknown.clone()));
                }
                AffinityPartition::new(self.main_screen, self.secondary_screen, all, main.iter().cloned())
            }
            None => AffinityPartition::from_groups(&self.groups, self.main_screen, self.secondary_screen),
        };

        if let Some(rule) = self.window_rules.iter().find(|r| !seen.contains(r.group.as_str())) {
            return Err(ConfigError::UnknownGroup(rule.group.clone()));
        }

        Ok(partition)
    }
}

/// Error from loading, parsing or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown group {0:?}")]
    UnknownGroup(String),
    #[error("invalid bindings: {0}")]
    Bindings(#[from] BindingError),
}
