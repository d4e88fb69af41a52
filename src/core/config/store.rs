//! Holds the single persisted setting: the webhook URL.
//!
//! The store is an explicit value owned by the front end and handed to the
//! webhook client one URL at a time. There is no process-wide instance.

use crate::core::config::data::{is_configured_url, Config};
use crate::core::config::io::ConfigError;
use crate::core::constants::DEFAULT_WEBHOOK_URL;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    webhook_url: String,
}

impl ConfigStore {
    /// Open the store backed by the platform config file.
    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::open(Config::default_config_path()?))
    }

    /// Open the store backed by `path`, reading the persisted value once.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let webhook_url = load_url(&path);
        Self { path, webhook_url }
    }

    /// Persisted URL if present, else the placeholder default.
    ///
    /// Never fails: unreadable or malformed files fall back to the default.
    pub fn load(&self) -> String {
        load_url(&self.path)
    }

    /// Trim, persist and activate a new URL. The active value only changes
    /// once the write succeeded.
    pub fn save(&mut self, url: &str) -> Result<(), Box<dyn Error>> {
        let trimmed = url.trim().to_string();
        let mut config = Config::load_from_path(&self.path).unwrap_or_default();
        config.webhook_url = Some(trimmed.clone());
        config.save_to_path(&self.path)?;
        debug!(path = %self.path.display(), "saved webhook url");
        self.webhook_url = trimmed;
        Ok(())
    }

    /// Drop the persisted URL; the placeholder becomes active again.
    pub fn unset(&mut self) -> Result<(), Box<dyn Error>> {
        let mut config = Config::load_from_path(&self.path).unwrap_or_default();
        config.webhook_url = None;
        config.save_to_path(&self.path)?;
        self.webhook_url = DEFAULT_WEBHOOK_URL.to_string();
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        is_configured_url(&self.webhook_url)
    }

    /// The active webhook URL.
    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_url(path: &Path) -> String {
    match Config::load_from_path(path) {
        Ok(config) => config
            .webhook_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string()),
        Err(err) => {
            warn!("{err}; using the default webhook url");
            DEFAULT_WEBHOOK_URL.to_string()
        }
    }
}
