//! CLI configuration file support
//!
//! Loads configuration from ~/.config/journeyflow/config.toml

use journeyflow_core::{AutosaveConfig, ClientConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Journey API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Designer autosave settings
    #[serde(default)]
    pub autosave: AutosaveSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the journey API
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutosaveSection {
    /// Idle time before unsaved designer changes are flushed
    pub delay_secs: Option<u64>,
}

impl CliConfig {
    /// Load configuration from default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("journeyflow").join("config.toml"))
    }

    /// Client settings; `api_url` (flag or env) wins over the file.
    pub fn client_config(&self, api_url: Option<&str>) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = api_url.or(self.api.base_url.as_deref()) {
            config.base_url = url.to_string();
        }
        if let Some(secs) = self.api.timeout_secs {
            config.timeout_secs = secs;
        }
        config
    }

    pub fn autosave_config(&self) -> AutosaveConfig {
        let mut config = AutosaveConfig::default();
        if let Some(secs) = self.autosave.delay_secs {
            config.delay_secs = secs;
        }
        config
    }
}
