//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-directory configuration file
pub const LOCAL_CONFIG_FILE: &str = ".jintest.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yml::Error),
}

/// jintest configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run the brace balance check while linting (default: true)
    pub check_braces: Option<bool>,

    /// Keep the final newline of a template in rendered output (default: false)
    pub keep_trailing_newline: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/jintest/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Directory config (./.jintest.yaml)
        if let Some(local) = Self::read_file(Path::new(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Some(value) = env_flag("JINTEST_CHECK_BRACES") {
            config.check_braces = Some(value);
        }
        if let Some(value) = env_flag("JINTEST_KEEP_TRAILING_NEWLINE") {
            config.keep_trailing_newline = Some(value);
        }

        config
    }

    /// Parse a configuration document
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(contents)?)
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match Self::from_yaml(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "jintest")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.check_braces.is_some() {
            self.check_braces = other.check_braces;
        }
        if other.keep_trailing_newline.is_some() {
            self.keep_trailing_newline = other.keep_trailing_newline;
        }
    }

    pub fn check_braces(&self) -> bool {
        self.check_braces.unwrap_or(true)
    }

    pub fn keep_trailing_newline(&self) -> bool {
        self.keep_trailing_newline.unwrap_or(false)
    }
}

/// Read a boolean environment variable (`1/0`, `true/false`, `yes/no`, `on/off`)
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
