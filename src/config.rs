//! Application configuration
//!
//! Resolution order for credentials: environment, then TOML file. Every other
//! setting comes from the TOML file or its default, with CLI flags applied on
//! top by the binary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audit::{AuditConfig, InvalidSetting};
use crate::narrative::NarrativeConfig;

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] InvalidSetting),
}

/// Top-level settings file
///
/// ```toml
/// [github]
/// token = "ghp_..."
/// sampled_repo_count = 10
///
/// [openai]
/// model = "gpt-4o"
/// ```
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub github: AuditConfig,
    pub openai: NarrativeConfig,
}

impl AppConfig {
    /// Parse TOML text; missing sections and keys take their defaults.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or defaults when `path` is `None`, then apply environment
    /// overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                info!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&text, path)?
            }
            None => {
                debug!("No config file given; using defaults");
                Self::default()
            }
        };
        config.apply_env_with(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override credentials from `lookup`; blank values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(GITHUB_TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("GitHub token taken from {GITHUB_TOKEN_ENV}");
            self.github.token = token;
        }
        if let Some(key) = lookup(OPENAI_API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("OpenAI key taken from {OPENAI_API_KEY_ENV}");
            self.openai.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.github.validate()?;
        if self.openai.timeout_secs == 0 {
            return Err(InvalidSetting::zero("openai.timeout_secs").into());
        }
        Ok(())
    }
}
