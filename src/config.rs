use crate::error::{PurgoError, Result};
use crate::session::Credentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "COMPANIES_HOUSE_API_KEY";
pub const USERNAME_ENV: &str = "PURGO_USERNAME";
pub const PASSWORD_ENV: &str = "PURGO_PASSWORD";

pub const DEFAULT_BASE_URL: &str = "https://api.company-information.service.gov.uk";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Requests allowed before the cooldown pause
    pub max_requests: u32,
    pub cooldown_seconds: u64,
    pub timeout_seconds: u64,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            max_requests: 499,
            cooldown_seconds: 300,
            timeout_seconds: 30,
            username: None,
            password: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PurgoError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("purgo").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // Environment variable wins
        if let Some(key) = non_empty_env(API_KEY_ENV) {
            return Ok(key);
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(PurgoError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// Expected gate credentials, environment first.
    pub fn gate_credentials(&self) -> Result<Credentials> {
        let username = non_empty_env(USERNAME_ENV).or_else(|| self.username.clone());
        let password = non_empty_env(PASSWORD_ENV).or_else(|| self.password.clone());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(PurgoError::Config(format!(
                "login credentials are not configured; set {} and {} or add username/password to the config file",
                USERNAME_ENV, PASSWORD_ENV
            ))),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
