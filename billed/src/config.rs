use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Seeded accounts used for demos; their bills never reach the review queue.
pub const DEFAULT_TEST_ACCOUNTS: [&str; 3] = [
    "employee@test.tld",
    "admin@test.tld",
    "johndoe@email.com",
];

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid setting: {0}")]
    Invalid(String),

    #[error("Could not find config directory")]
    NoConfigDir,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub session_path: Option<PathBuf>,

    #[serde(default = "default_test_accounts")]
    pub test_accounts: Vec<String>,

    #[serde(default = "default_log_buffer_size")]
    pub log_buffer_size: usize,
}

fn default_api_url() -> String {
    billed_api::DEFAULT_BASE_URL.to_string()
}

fn default_test_accounts() -> Vec<String> {
    DEFAULT_TEST_ACCOUNTS.iter().map(|s| s.to_string()).collect()
}

fn default_log_buffer_size() -> usize {
    5000
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let config_path =
            std::env::var("BILLED_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Load from an optional TOML file, overridden by `BILLED__*` variables
    pub fn from_file(config_path: &str) -> Result<Self, SettingsError> {
        Self::from_sources(config_path, environment())
    }

    fn from_sources(config_path: &str, environment: Environment) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.api_url.is_empty() {
            return Err(SettingsError::Invalid("api_url is required".to_string()));
        }
        if !self.api_url.starts_with("http") {
            return Err(SettingsError::Invalid(
                "api_url must be a valid HTTP(S) URL".to_string(),
            ));
        }
        if self.log_buffer_size == 0 {
            return Err(SettingsError::Invalid(
                "log_buffer_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn session_path(&self) -> Result<PathBuf, SettingsError> {
        match &self.session_path {
            Some(path) => Ok(path.clone()),
            None => Ok(config_dir()?.join("session.json")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            session_path: None,
            test_accounts: default_test_accounts(),
            log_buffer_size: default_log_buffer_size(),
        }
    }
}

/// `BILLED__*` overrides; `BILLED__TEST_ACCOUNTS` is a comma-separated list
fn environment() -> Environment {
    Environment::with_prefix("BILLED")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("test_accounts")
}

/// `~/.config/billed` (or the platform equivalent)
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    Ok(dirs::config_dir()
        .ok_or(SettingsError::NoConfigDir)?
        .join("billed"))
}
