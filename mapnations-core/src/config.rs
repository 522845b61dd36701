//! Configuration management
//!
//! Settings live in settings.json inside the data directory:
//! ```json
//! {
//!   "app": { "demoMode": false, "apiBaseUrl": "https://restcountries.com/v3.1", "requestTimeoutSecs": 30 },
//!   "security": { "argon2": { "timeCost": 2, "memoryCost": 19456, "parallelism": 1 } }
//! }
//! ```
//! Fields this crate does not manage are kept as-is when saving.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::restcountries::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::domain::Argon2Params;

pub const SETTINGS_FILE: &str = "settings.json";

/// Environment override for demo mode (CI, offline use)
pub const DEMO_MODE_ENV: &str = "MAPNATIONS_DEMO_MODE";
/// Environment override for the REST Countries base URL
pub const API_URL_ENV: &str = "MAPNATIONS_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    security: SecuritySettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecuritySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    argon2: Option<Argon2Settings>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Argon2Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memory_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parallelism: Option<u32>,
}

impl Argon2Settings {
    fn resolve(self) -> Argon2Params {
        let defaults = Argon2Params::default();
        Argon2Params {
            time_cost: self.time_cost.unwrap_or(defaults.time_cost),
            memory_cost: self.memory_cost.unwrap_or(defaults.memory_cost),
            parallelism: self.parallelism.unwrap_or(defaults.parallelism),
            hash_len: defaults.hash_len,
        }
    }
}

/// MapNations configuration (resolved view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub argon2: Argon2Params,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            argon2: Argon2Params::default(),
            _raw_settings: SettingsFile::default(),
        }
    }
}

fn parse_bool_env(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true" | "1" | "yes" | "TRUE" | "YES") => Some(true),
        Some("false" | "0" | "no" | "FALSE" | "NO") => Some(false),
        _ => None,
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    // A hand-edited file that no longer parses falls back to defaults
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

impl Config {
    /// Load config from the data directory
    ///
    /// `MAPNATIONS_DEMO_MODE` and `MAPNATIONS_API_URL` override the file.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let demo_mode = parse_bool_env(std::env::var(DEMO_MODE_ENV).ok().as_deref())
            .unwrap_or(raw.app.demo_mode);

        let api_base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| raw.app.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = raw
            .app
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let argon2 = raw.security.argon2.unwrap_or_default().resolve();

        Ok(Self {
            demo_mode,
            api_base_url,
            request_timeout_secs,
            argon2,
            _raw_settings: raw,
        })
    }

    /// Save the demo mode flag, preserving everything else in the file
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILE);

        let mut settings = read_settings(data_dir)?;
        settings.app.demo_mode = self.demo_mode;

        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Tests that touch MAPNATIONS_* env vars would race with each other;
    // these only exercise the file.

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.argon2, Argon2Params::default());
    }

    #[test]
    fn test_reads_settings() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{
                "app": { "requestTimeoutSecs": 5 },
                "security": { "argon2": { "timeCost": 3, "memoryCost": 4096 } }
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.argon2.time_cost, 3);
        assert_eq!(config.argon2.memory_cost, 4096);
        assert_eq!(config.argon2.parallelism, Argon2Params::default().parallelism);
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "app": { "requestTimeoutSecs": 0 } }"#,
        )
        .unwrap();

        assert_eq!(Config::load(dir.path()).unwrap().request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{
                "app": { "theme": "dark", "apiBaseUrl": "http://localhost:9000/v3.1" },
                "security": { "argon2": { "timeCost": 3 } },
                "experimental": { "flag": true }
            }"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        config.enable_demo_mode();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["app"]["demoMode"], true);
        assert_eq!(saved["app"]["theme"], "dark");
        assert_eq!(saved["app"]["apiBaseUrl"], "http://localhost:9000/v3.1");
        assert_eq!(saved["security"]["argon2"]["timeCost"], 3);
        assert_eq!(saved["experimental"]["flag"], true);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.argon2, Argon2Params::default());
    }

    #[test]
    fn test_parse_bool_env() {
        assert_eq!(parse_bool_env(Some("1")), Some(true));
        assert_eq!(parse_bool_env(Some("NO")), Some(false));
        assert_eq!(parse_bool_env(Some("maybe")), None);
        assert_eq!(parse_bool_env(None), None);
    }
}
