//! `set`, `unset` and `show` for the persisted webhook URL.

use crate::core::config::data::path_display;
use crate::core::config::ConfigStore;
use std::fmt;

/// Config key accepted on the command line.
pub const WEBHOOK_URL_SETTING: &str = "webhook-url";

/// Errors that can occur when modifying configuration settings.
#[derive(Debug)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// Required arguments are missing.
    MissingArgs {
        hint: &'static str,
        example: &'static str,
    },
    /// An error occurred while persisting the configuration.
    ConfigError(String),
}

impl SettingError {
    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Supported keys: {WEBHOOK_URL_SETTING}");
            }
            SettingError::MissingArgs { hint, example } => {
                eprintln!("⚠️  {hint}");
                eprintln!("Example: {example}");
            }
            SettingError::ConfigError(msg) => {
                eprintln!("❌ Failed to save configuration: {msg}");
            }
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::MissingArgs { hint, .. } => write!(f, "{hint}"),
            SettingError::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SettingError {}

pub fn set_setting(
    store: &mut ConfigStore,
    key: &str,
    value: Option<&str>,
) -> Result<String, SettingError> {
    check_key(key)?;
    let value = value
        .filter(|value| !value.trim().is_empty())
        .ok_or(SettingError::MissingArgs {
            hint: "Provide the full webhook URL from your n8n workflow.",
            example: "hookchat set webhook-url https://n8n.example.com/webhook/chat",
        })?;

    store
        .save(value)
        .map_err(|err| SettingError::ConfigError(err.to_string()))?;

    let mut message = format!("✅ Set {WEBHOOK_URL_SETTING} to: {}", store.webhook_url());
    if !store.is_configured() {
        message.push_str("\n⚠️  This still looks like the placeholder URL.");
    }
    Ok(message)
}

pub fn unset_setting(store: &mut ConfigStore, key: &str) -> Result<String, SettingError> {
    check_key(key)?;
    store
        .unset()
        .map_err(|err| SettingError::ConfigError(err.to_string()))?;
    Ok(format!("✅ Unset {WEBHOOK_URL_SETTING}"))
}

/// Current configuration, one line per entry.
pub fn describe(store: &ConfigStore) -> String {
    let status = if store.is_configured() {
        "configured"
    } else {
        "not configured"
    };
    format!(
        "Config file: {}\n  {WEBHOOK_URL_SETTING}: {} ({status})",
        path_display(store.path()),
        store.webhook_url()
    )
}

fn check_key(key: &str) -> Result<(), SettingError> {
    if key == WEBHOOK_URL_SETTING {
        Ok(())
    } else {
        Err(SettingError::UnknownKey(key.to_string()))
    }
}
