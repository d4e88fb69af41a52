use crate::core::constants::PLACEHOLDER_MARKER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape of `config.toml`.
///
/// The file holds a single key today. Unknown keys are ignored on load so a
/// hand-edited file does not lock the user out.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Full webhook URL exposed by the n8n workflow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Returns `false` for an empty URL or one still carrying the placeholder
/// marker. Anything else counts as configured; the URL is not validated.
pub fn is_configured_url(url: &str) -> bool {
    !url.is_empty() && !url.contains(PLACEHOLDER_MARKER)
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/hookchat/config.toml` → `~/.config/hookchat/config.toml`
/// - Windows: paths are shown unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
