use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tags::DEFAULT_FIELDS;

/// Configuration for flacedit.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. Environment variables (FLACEDIT_* prefix)
/// 2. Config file (~/.config/flacedit/config.toml)
/// 3. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Common fields offered for editing, in prompt order.
    ///
    /// Can be set via:
    /// - Config: fields = ["TITLE", "ARTIST", ...]
    /// - Default: TITLE, ARTIST, ALBUM, DATE, GENRE
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Path of the append-only log file.
    ///
    /// Can be set via:
    /// - ENV: FLACEDIT_LOG_FILE
    /// - Config: log_file = "/path/to/flacedit.log"
    /// - Default: ~/.local/share/flacedit/flacedit.log
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Minimum level written to the log file.
    ///
    /// Can be set via:
    /// - ENV: FLACEDIT_LOG_LEVEL
    /// - Config: log_level = "debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/flacedit/config.toml
    /// Reads environment variables with FLACEDIT_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("flacedit");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let mut config: Self = builder.build().context("Failed to build configuration")?;
        config.normalize();

        Ok(config)
    }

    /// Drop blank and duplicate entries from the field list, falling back to
    /// the defaults if nothing usable is left.
    fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.fields.len());
        for field in self.fields.drain(..) {
            let field = field.trim().to_string();
            if !field.is_empty() && !seen.contains(&field) {
                seen.push(field);
            }
        }
        self.fields = if seen.is_empty() {
            default_fields()
        } else {
            seen
        };
    }
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
}

/// Get the default log file path.
///
/// Returns: ~/.local/share/flacedit/flacedit.log (or platform equivalent)
fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flacedit")
        .join("flacedit.log")
}

fn default_log_level() -> String {
    String::from("debug")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/flacedit/config.toml
/// - macOS: ~/Library/Application Support/flacedit/config.toml
/// - Windows: %APPDATA%\flacedit\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flacedit")
        .join("config.toml")
}
