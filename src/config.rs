//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the user's config directory
//! (or `$FETCHDOG_CONFIG_DIR` when set) and includes:
//! - The catalog service base URL
//! - The per-request timeout
//! - Default login name and email
//!
//! Environment variables take precedence over the file.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::{Credentials, DEFAULT_BASE_URL};
use crate::error::{FetchDogError, Result};

pub const CONFIG_DIR_ENV: &str = "FETCHDOG_CONFIG_DIR";
pub const BASE_URL_ENV: &str = "FETCHDOG_BASE_URL";
pub const NAME_ENV: &str = "FETCHDOG_NAME";
pub const EMAIL_ENV: &str = "FETCHDOG_EMAIL";

/// Keys accepted by `config get` / `config set`
pub const VALID_KEYS: &[&str] = &["base_url", "timeout_secs", "user.name", "user.email"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog service base URL (default: the public service)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default login identity
    #[serde(default, skip_serializing_if = "UserConfig::is_empty")]
    pub user: UserConfig,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            user: UserConfig::default(),
        }
    }
}

/// Login identity remembered between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserConfig {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Directory holding `config.yaml`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = non_empty_env(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        directories::ProjectDirs::from("com", "fetchdog", "fetchdog")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                FetchDogError::Config("cannot determine configuration directory".to_string())
            })
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        validate_timeout(config.timeout_secs)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Effective base URL: environment, then file, then the public service
    pub fn base_url(&self) -> String {
        non_empty_env(BASE_URL_ENV)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve login credentials.
    ///
    /// Explicit values win, then `FETCHDOG_NAME` / `FETCHDOG_EMAIL`, then the
    /// config file.
    pub fn credentials(&self, name: Option<&str>, email: Option<&str>) -> Result<Credentials> {
        let name = name
            .map(str::to_string)
            .or_else(|| non_empty_env(NAME_ENV))
            .or_else(|| self.user.name.clone());
        let email = email
            .map(str::to_string)
            .or_else(|| non_empty_env(EMAIL_ENV))
            .or_else(|| self.user.email.clone());

        match (name, email) {
            (Some(name), Some(email)) => Ok(Credentials::new(name, email)),
            (None, _) => Err(FetchDogError::Validation(
                "login name not set. Pass --name, set FETCHDOG_NAME, or run: fetchdog config set user.name <name>".to_string(),
            )),
            (_, None) => Err(FetchDogError::Validation(
                "login email not set. Pass --email, set FETCHDOG_EMAIL, or run: fetchdog config set user.email <email>".to_string(),
            )),
        }
    }

    /// Read a single value by key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "base_url" => Ok(self.base_url.clone()),
            "timeout_secs" => Ok(Some(self.timeout_secs.to_string())),
            "user.name" => Ok(self.user.name.clone()),
            "user.email" => Ok(self.user.email.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a single value by key, validating it first
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base_url" => {
                let url = Url::parse(value)?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(FetchDogError::Config(format!(
                        "base_url must use http or https, got '{}'",
                        url.scheme()
                    )));
                }
                self.base_url = Some(value.to_string());
            }
            "timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| {
                    FetchDogError::Config(format!("invalid timeout '{value}', expected seconds"))
                })?;
                validate_timeout(secs)?;
                self.timeout_secs = secs;
            }
            "user.name" => self.user.name = Some(value.to_string()),
            "user.email" => self.user.email = Some(value.to_string()),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn validate_timeout(secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(FetchDogError::Config(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn unknown_key(key: &str) -> FetchDogError {
    FetchDogError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        VALID_KEYS.join(", ")
    ))
}
