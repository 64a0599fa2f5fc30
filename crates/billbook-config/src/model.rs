use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Settings the shell may change at runtime. `storage_key` is fixed once
/// data has been written under it.
pub const EDITABLE_KEYS: &[&str] = &[
    "currency_symbol",
    "export_file_name",
    "export_dir",
    "ui_color_enabled",
    "confirm_deletions",
];

/// User-configurable preferences for the ledger shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// Key the ledger blob is stored under.
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default = "Config::default_export_file_name")]
    pub export_file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory exports are written to. Defaults to `~/Documents`.
    pub export_dir: Option<PathBuf>,
    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_true")]
    pub confirm_deletions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            storage_key: Self::default_storage_key(),
            export_file_name: Self::default_export_file_name(),
            export_dir: None,
            ui_color_enabled: true,
            confirm_deletions: true,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_storage_key() -> String {
        "peopleData".into()
    }

    pub fn default_export_file_name() -> String {
        "people_data.json".into()
    }

    fn default_true() -> bool {
        true
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        if let Some(path) = &self.export_dir {
            return path.clone();
        }
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Full path used by `export` when no explicit path is given.
    pub fn default_export_path(&self) -> PathBuf {
        self.resolve_export_dir().join(&self.export_file_name)
    }

    /// Current settings as `(key, value)` pairs, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("storage_key", self.storage_key.clone()),
            ("export_file_name", self.export_file_name.clone()),
            (
                "export_dir",
                self.export_dir
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "(default)".into()),
            ),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("confirm_deletions", self.confirm_deletions.to_string()),
        ]
    }

    /// Updates one of [`EDITABLE_KEYS`] from its textual value. An empty
    /// `export_dir` resets it to the default.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let trimmed = value.trim();
        match key {
            "currency_symbol" => self.currency_symbol = trimmed.to_string(),
            "export_file_name" => {
                if trimmed.is_empty() || trimmed.contains(&['/', '\\'][..]) {
                    return Err(invalid());
                }
                self.export_file_name = trimmed.to_string();
            }
            "export_dir" => {
                self.export_dir = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(trimmed).ok_or_else(invalid)?,
            "confirm_deletions" => {
                self.confirm_deletions = parse_flag(trimmed).ok_or_else(invalid)?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Some(true),
        "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
