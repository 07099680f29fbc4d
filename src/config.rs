//! Configuration file handling.
//!
//! Loads `.campaign-board.toml`: data source, display options, the external
//! keys of the view slots, and the default log level.

use crate::filter::FilterSelection;
use crate::format::DEFAULT_CURRENCY;
use crate::view::SlotKeys;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".campaign-board.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    /// External keys of the view slots.
    #[serde(default)]
    pub slots: SlotKeys,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where campaign records come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// `.json` or `.csv` file; the bundled sample is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix for monetary fields.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Card filter selected at startup.
    #[serde(default)]
    pub default_filter: FilterSelection,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_filter: FilterSelection::All,
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Explicit path if given, else `.campaign-board.toml` in the working
    /// directory if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            debug!("Using config file {}", CONFIG_FILE);
            return Self::load(local);
        }

        Ok(Self::default())
    }

    /// Commented default config (written by `init-config`).
    pub fn default_toml() -> String {
        let keys = SlotKeys::default();
        format!(
            r#"# campaign-board configuration

[data]
# Campaign records (.json or .csv). The bundled sample is used when unset.
# path = "data/games.json"

[display]
currency = "{currency}"
# all | funded | unfunded
default_filter = "all"

[slots]
card_list = "{card_list}"
contributions = "{contributions}"
total_raised = "{total_raised}"
game_count = "{game_count}"
description = "{description}"
first_game = "{first_game}"
second_game = "{second_game}"

[logging]
# Overridden by RUST_LOG, -v and -q
level = "info"
"#,
            currency = DEFAULT_CURRENCY,
            card_list = keys.card_list,
            contributions = keys.contributions,
            total_raised = keys.total_raised,
            game_count = keys.game_count,
            description = keys.description,
            first_game = keys.first_game,
            second_game = keys.second_game,
        )
    }
}
