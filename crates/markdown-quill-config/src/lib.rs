use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// CLI defaults. Preset names are stored as the rendering-side identifiers
/// (e.g. `BULLET_DISC_CIRCLE_SQUARE`); the CLI parses them into engine
/// presets and rejects unknown names at startup, not here.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// The start offset used when no `--offset` flag is given.
    #[serde(default)]
    pub start_offset: usize,
    #[serde(default = "default_unordered_preset")]
    pub unordered_preset: String,
    #[serde(default = "default_ordered_preset")]
    pub ordered_preset: String,
}

fn default_unordered_preset() -> String {
    "BULLET_DISC_CIRCLE_SQUARE".to_string()
}

fn default_ordered_preset() -> String {
    "NUMBERED_DECIMAL_ALPHA_ROMAN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_offset: 0,
            unordered_preset: default_unordered_preset(),
            ordered_preset: default_ordered_preset(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-quill");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}
