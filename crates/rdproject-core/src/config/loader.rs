//! Layered host configuration loader
//!
//! Precedence (low to high):
//! 1. Built-in defaults
//! 2. Config file (`<config-dir>/rdproject/config.yaml` or an explicit path)
//! 3. Environment variables (`RDPROJECT_*` prefix)
//! 4. CLI flags (handled by caller)

use super::host::HostConfig;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use std::env;
use std::fs;
use tracing::debug;

/// Name of the config file inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix of the environment overrides
pub const ENV_PREFIX: &str = "RDPROJECT_";

/// Host configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// File to read, if any
    config_file: Option<Utf8PathBuf>,

    /// Whether the file was requested explicitly (a missing file is then an error)
    explicit: bool,
}

impl ConfigLoader {
    /// Loader reading the default per-user config file when it exists
    pub fn new() -> Self {
        Self {
            config_file: Self::default_config_file(),
            explicit: false,
        }
    }

    /// Loader reading the given config file, which must exist
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_file: Some(path.into()),
            explicit: true,
        }
    }

    /// Loader that skips the config file layer
    pub fn without_file() -> Self {
        Self {
            config_file: None,
            explicit: false,
        }
    }

    /// `<platform config dir>/config.yaml`, when the platform has one
    pub fn default_config_file() -> Option<Utf8PathBuf> {
        let dirs = ProjectDirs::from("", "", "rdproject")?;
        let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
        Some(dir.join(CONFIG_FILE_NAME))
    }

    /// Load defaults, then the config file, then environment overrides
    pub fn load(&self) -> Result<HostConfig> {
        let config = match &self.config_file {
            Some(path) => self.load_file(path)?,
            None => HostConfig::default(),
        };

        Self::apply_env_overrides(config)
    }

    fn load_file(&self, path: &Utf8Path) -> Result<HostConfig> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if self.explicit {
                    return Err(Error::config_not_found(path.as_str()));
                }
                debug!("No config file at {}, using defaults", path);
                return Ok(HostConfig::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        debug!("Loading host configuration from {}", path);

        // An empty file deserializes to null rather than an empty mapping
        if content.trim().is_empty() {
            return Ok(HostConfig::default());
        }

        serde_yaml_ng::from_str(&content).map_err(|e| Error::yaml_parse(path.as_str(), e))
    }

    fn apply_env_overrides(mut config: HostConfig) -> Result<HostConfig> {
        if let Some(val) = env_var("DATADIR") {
            config.datadir = Utf8PathBuf::from(val);
        }

        if let Some(val) = env_var("BASEDIR") {
            config.basedir = Utf8PathBuf::from(val);
        }

        if let Some(val) = env_var("OWNER") {
            config.owner = val;
        }

        if let Some(val) = env_var("GROUP") {
            config.group = val;
        }

        if let Some(val) = env_var("TEMPLATES_DIR") {
            config.templates_dir = Some(Utf8PathBuf::from(val));
        }

        if let Some(val) = env_var("MANAGE_OWNERSHIP") {
            config.manage_ownership = val.parse().map_err(|_| {
                Error::invalid_config(format!(
                    "{}MANAGE_OWNERSHIP must be 'true' or 'false', got '{}'",
                    ENV_PREFIX, val
                ))
            })?;
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn env_var(suffix: &str) -> Option<String> {
    env::var(format!("{}{}", ENV_PREFIX, suffix)).ok()
}
