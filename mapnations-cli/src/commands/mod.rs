//! CLI command implementations

pub mod auth;
pub mod countries;
pub mod demo;
pub mod favorites;
pub mod logs;
pub mod resume;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use dialoguer::Password;
use mapnations_core::{EntryPoint, LogEvent, LoggingService, MapNationsContext};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "MAPNATIONS_DIR";

/// Environment variable holding a password for non-interactive use
pub const PASSWORD_ENV: &str = "MAPNATIONS_PASSWORD";

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".mapnations"))
        .ok_or_else(|| anyhow!("Could not find home directory; set {}", DATA_DIR_ENV))
}

/// Open the MapNations context for the data directory
pub fn get_context() -> Result<MapNationsContext> {
    let data_dir = get_data_dir()?;
    MapNationsContext::new(&data_dir).context("Failed to initialize mapnations context")
}

/// Get a password from the flag, MAPNATIONS_PASSWORD, or an interactive prompt
pub fn get_password(password_flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = password_flag {
        return Ok(p);
    }
    if let Ok(p) = std::env::var(PASSWORD_ENV) {
        return Ok(p);
    }
    Ok(Password::new().with_prompt(prompt).interact()?)
}

/// Like [`get_password`], but an interactive prompt asks twice
pub fn get_new_password(password_flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = password_flag {
        return Ok(p);
    }
    if let Ok(p) = std::env::var(PASSWORD_ENV) {
        return Ok(p);
    }
    Ok(Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?)
}
