//! Configuration management for edupulse.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "edupulse";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "edupulse.db";

/// Prefix for environment overrides. Nesting is separated by `__`.
const ENV_PREFIX: &str = "EDUPULSE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `EDUPULSE_`, e.g.
///    `EDUPULSE_ASSISTANT__API_KEY`)
/// 2. The bare `API_KEY` variable, for the assistant credential only
/// 3. TOML config file at `~/.config/edupulse/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Generative text service configuration.
    pub assistant: AssistantConfig,
    /// Interaction configuration.
    pub interface: InterfaceConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/edupulse/edupulse.db`
    pub database_path: Option<PathBuf>,
}

/// Generative text service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the `generateContent`-compatible API.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Bearer credential. Requests are still attempted without one and
    /// fail into the fallback text.
    pub api_key: Option<String>,
    /// Client timeout in seconds. Set to 0 for none.
    pub timeout_secs: u64,
    /// Student report prompt profile.
    pub report: PromptProfile,
    /// Course syllabus prompt profile.
    pub syllabus: PromptProfile,
    /// Assistant chat prompt profile.
    pub chat: PromptProfile,
}

/// Generation parameters and fallback text for one kind of request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptProfile {
    /// Sampling temperature; `None` leaves the service default.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Nucleus-sampling threshold; `None` leaves the service default.
    #[serde(default)]
    pub top_p: Option<f32>,
    /// Text shown in place of generated content when the call fails.
    pub fallback: String,
}

/// Interaction-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    /// How long a delete stays armed, in milliseconds.
    pub confirm_window_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            timeout_secs: 0,
            report: PromptProfile {
                temperature: Some(0.7),
                top_p: Some(0.9),
                fallback: "Error generating AI report. Please check your connection or API key."
                    .to_string(),
            },
            syllabus: PromptProfile {
                temperature: Some(0.5),
                top_p: None,
                fallback: "Failed to generate syllabus. Please try again later.".to_string(),
            },
            chat: PromptProfile {
                temperature: None,
                top_p: None,
                fallback: "The assistant is currently unavailable.".to_string(),
            },
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            confirm_window_ms: 3_000,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::figment(&config_file).extract::<Self>()?.validated()
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(
                Env::raw()
                    .only(&["API_KEY"])
                    .map(|_| "assistant.api_key".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.assistant.endpoint.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "assistant.endpoint must not be empty".to_string(),
            });
        }

        if self.assistant.model.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "assistant.model must not be empty".to_string(),
            });
        }

        for (name, profile) in [
            ("report", &self.assistant.report),
            ("syllabus", &self.assistant.syllabus),
            ("chat", &self.assistant.chat),
        ] {
            profile.validate(name)?;
        }

        if self.interface.confirm_window_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "confirm_window_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the confirm window as a Duration.
    #[must_use]
    pub fn confirm_window(&self) -> Duration {
        Duration::from_millis(self.interface.confirm_window_ms)
    }

    /// Get the client timeout, if one is configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.assistant.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.assistant.timeout_secs))
        }
    }
}

impl PromptProfile {
    fn validate(&self, name: &str) -> Result<()> {
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "assistant.{name}.temperature ({temperature}) must be within 0.0..=2.0"
                    ),
                });
            }
        }

        if let Some(top_p) = self.top_p {
            if top_p <= 0.0 || top_p > 1.0 {
                return Err(Error::ConfigValidation {
                    message: format!("assistant.{name}.top_p ({top_p}) must be within (0.0, 1.0]"),
                });
            }
        }

        if self.fallback.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("assistant.{name}.fallback must not be empty"),
            });
        }

        Ok(())
    }
}
