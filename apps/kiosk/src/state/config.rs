//! # Kiosk Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. --api-url flag (highest priority)                                   │
//! │                                                                         │
//! │  2. Environment Variables (a .env file is loaded into these first)      │
//! │     VENDING_API_URL / NEXT_PUBLIC_API_URL                               │
//! │     VENDING_TIMEOUT_SECS                                                │
//! │     VENDING_INSERT_DELAY_MS                                             │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <PATH>, else the platform config dir:                      │
//! │     ~/.config/vending/kiosk.toml (Linux)                                │
//! │     ~/Library/Application Support/vending/kiosk.toml (macOS)            │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     http://localhost:3001, 10 s timeout, 1000 ms insertion delay        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kiosk.toml
//! [api]
//! base_url = "http://localhost:3001"
//! timeout_secs = 10
//!
//! [purchase]
//! insert_delay_ms = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use vending_client::ApiConfig;

use crate::error::ConfigError;

// =============================================================================
// API Settings
// =============================================================================

/// Where the data store lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the REST store.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Purchase Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseSettings {
    /// Simulated processing time after a note is confirmed (milliseconds).
    #[serde(default = "default_insert_delay")]
    pub insert_delay_ms: u64,
}

fn default_insert_delay() -> u64 {
    1000
}

impl Default for PurchaseSettings {
    fn default() -> Self {
        PurchaseSettings {
            insert_delay_ms: default_insert_delay(),
        }
    }
}

// =============================================================================
// Main Kiosk Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub purchase: PurchaseSettings,
}

impl KioskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`kiosk.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Reads a TOML file. Missing sections and keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading kiosk config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// `VENDING_API_URL` wins over `NEXT_PUBLIC_API_URL` when both are set.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ["NEXT_PUBLIC_API_URL", "VENDING_API_URL"] {
            if let Some(url) = lookup(key) {
                debug!(key, url = %url, "Overriding API URL from environment");
                self.api.base_url = url;
            }
        }

        if let Some(secs) = lookup("VENDING_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring invalid VENDING_TIMEOUT_SECS"),
            }
        }

        if let Some(ms) = lookup("VENDING_INSERT_DELAY_MS") {
            match ms.parse::<u64>() {
                Ok(m) => self.purchase.insert_delay_ms = m,
                Err(_) => warn!(value = %ms, "Ignoring invalid VENDING_INSERT_DELAY_MS"),
            }
        }
    }

    /// Applies the `--api-url` flag, which beats every other source.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            debug!(url = %url, "Overriding API URL from command line");
            self.api.base_url = url;
        }
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.api.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "vending")
            .map(|dirs| dirs.config_dir().join("kiosk.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Client settings for the data store.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone()).timeout(Duration::from_secs(self.api.timeout_secs))
    }

    pub fn insert_delay(&self) -> Duration {
        Duration::from_millis(self.purchase.insert_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = KioskConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.insert_delay(), Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[api]\nbase_url = \"http://store.local:4000\"\n");
        let config = KioskConfig::from_file(file.path()).unwrap();

        assert_eq!(config.api.base_url, "http://store.local:4000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.purchase.insert_delay_ms, 1000);
    }

    #[test]
    fn test_precedence_file_env_flag() {
        let file = write_config(
            "[api]\nbase_url = \"http://from-file:1\"\ntimeout_secs = 3\n\n\
             [purchase]\ninsert_delay_ms = 250\n",
        );

        let mut config = KioskConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://from-file:1");

        config.apply_overrides_from(env(&[
            ("NEXT_PUBLIC_API_URL", "http://from-env:2"),
            ("VENDING_INSERT_DELAY_MS", "0"),
        ]));
        assert_eq!(config.api.base_url, "http://from-env:2");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.purchase.insert_delay_ms, 0);

        let config = config.with_api_url(Some("http://from-flag:3".to_string()));
        assert_eq!(config.api.base_url, "http://from-flag:3");

        let config = config.with_api_url(None);
        assert_eq!(config.api.base_url, "http://from-flag:3");
    }

    #[test]
    fn test_vending_api_url_beats_next_public() {
        let mut config = KioskConfig::default();
        config.apply_overrides_from(env(&[
            ("NEXT_PUBLIC_API_URL", "http://next:1"),
            ("VENDING_API_URL", "http://vending:2"),
        ]));
        assert_eq!(config.api.base_url, "http://vending:2");
    }

    #[test]
    fn test_invalid_env_numbers_are_ignored() {
        let mut config = KioskConfig::default();
        config.apply_overrides_from(env(&[("VENDING_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_validation() {
        let mut config = KioskConfig::default();

        config.api.base_url = "ftp://store".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://store.example.com".to_string();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            KioskConfig::load(Some(missing)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("[api\nbase_url = ");
        assert!(matches!(
            KioskConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
