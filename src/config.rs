//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treebox/treebox.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TREEBOX_*` prefix

use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::driver::LineEnding;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override {key}: {message}")]
    Env { key: String, message: String },
}

/// How `show` renders a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// The lossless `+--` format
    #[default]
    Ascii,
    /// Box-drawing characters, for reading only
    Unicode,
}

impl FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(DisplayStyle::Ascii),
            "unicode" => Ok(DisplayStyle::Unicode),
            other => Err(format!(
                "unsupported display style `{other}`; expected ascii|unicode"
            )),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub line_ending: Option<LineEnding>,
    pub display: Option<DisplayStyle>,
}

/// Unified configuration for treebox.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Row separator for encoding and decoding (default: lf)
    pub line_ending: LineEnding,
    /// Default rendering for `show` (default: ascii)
    pub display: DisplayStyle,
}

/// Get the XDG config directory for treebox.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treebox").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treebox.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            line_ending: overlay.line_ending.unwrap_or(self.line_ending),
            display: overlay.display.unwrap_or(self.display),
        }
    }

    /// Load settings with full precedence, including `TREEBOX_*` overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let global = global_config_path();
        Self::load_layers(global.as_deref(), explicit)?.with_env_overrides()
    }

    /// Load defaults plus file layers only.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    #[instrument(level = "debug")]
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
                debug!(path = %global_path.display(), "global config applied");
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(path)?);
            debug!(path = %path.display(), "explicit config applied");
        }

        Ok(current)
    }

    /// Apply TREEBOX_* environment variables as explicit overrides.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEBOX")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::Env {
                key: "TREEBOX_*".into(),
                message: e.to_string(),
            })?;

        if let Ok(val) = config.get_string("line_ending") {
            self.line_ending = val.parse().map_err(|message| ConfigError::Env {
                key: "TREEBOX_LINE_ENDING".into(),
                message,
            })?;
        }
        if let Ok(val) = config.get_string("display") {
            self.display = val.parse().map_err(|message| ConfigError::Env {
                key: "TREEBOX_DISPLAY".into(),
                message,
            })?;
        }

        Ok(self)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<settings>"),
            message: e.to_string(),
        })
    }
}
