//! Shared helpers for paths and timestamps

use crate::error::{Error, Result};
use camino::Utf8PathBuf;
use chrono::{SecondsFormat, Utc};

/// Application data directory name under the user's home
pub const APP_DIR_NAME: &str = ".astro-launcher";

/// Environment variable overriding the data directory location
pub const DATA_DIR_ENV: &str = "ASTRO_LAUNCHER_HOME";

/// Get the user's home directory
///
/// Checks the HOME environment variable first so container setups that
/// override HOME behave like the rest of the shell tooling, then falls
/// back to the platform lookup.
pub fn get_home_dir() -> Result<Utf8PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(Utf8PathBuf::from(home));
        }
    }

    let home = dirs::home_dir()
        .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;
    Utf8PathBuf::from_path_buf(home)
        .map_err(|p| Error::invalid_config(format!("Home directory is not valid UTF-8: {p:?}")))
}

/// Resolve the launcher data directory
///
/// `ASTRO_LAUNCHER_HOME` wins when set; otherwise `~/.astro-launcher`.
pub fn default_data_dir() -> Result<Utf8PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(Utf8PathBuf::from(dir));
        }
    }

    Ok(get_home_dir()?.join(APP_DIR_NAME))
}

/// Current instant as an RFC 3339 UTC string with microsecond precision
///
/// Microsecond precision keeps timestamps strictly increasing across
/// back-to-back store writes, which the registry relies on for ordering.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
