//! Loads and saves `config.toml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppConfig;

pub const API_URL_ENV: &str = "CADDIE_CONSOLE_API_URL";
pub const API_TOKEN_ENV: &str = "CADDIE_CONSOLE_API_TOKEN";

const CONFIG_FILE_NAME: &str = "config.toml";

pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Config file under the platform config directory, or the working
    /// directory when no home directory can be resolved.
    pub fn from_default_location() -> Self {
        let path = ProjectDirs::from("com", "CaddieConsole", "CaddieConsole")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file (defaults when absent), apply environment overrides, validate.
    pub fn load(&self) -> Result<AppConfig> {
        let mut config = self.read_file()?;
        apply_env_overrides(&mut config);
        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration in {}: {}", self.path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create dir {}", parent.display()))?;
            }
        }

        let data = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write configuration to {}", self.path.display()))?;
        log::info!("Saved configuration to {}", self.path.display());
        Ok(())
    }

    fn read_file(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            log::info!(
                "No configuration at {}, using defaults",
                self.path.display()
            );
            return Ok(AppConfig::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read configuration from {}", self.path.display()))?;
        toml::from_str(&data)
            .with_context(|| format!("Failed to parse configuration in {}", self.path.display()))
    }
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(url) = non_empty_env(API_URL_ENV) {
        log::debug!("API base URL overridden by {}", API_URL_ENV);
        config.api.base_url = url;
    }
    if let Some(token) = non_empty_env(API_TOKEN_ENV) {
        config.api.token = Some(token);
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
