//! User settings for Spendlog
//!
//! Manages the display currency and how the AI service is reached. UI
//! preferences (theme, widgets, onboarding) live in the key-value store next to
//! the data they decorate, see [`crate::storage::keys`].

use serde::{Deserialize, Serialize};

use super::paths::SpendlogPaths;
use crate::error::SpendlogError;
use crate::models::Currency;

/// AI service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Model name passed to the generateContent endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the models endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
        }
    }
}

impl AiSettings {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, SpendlogError> {
        std::env::var(&self.api_key_env).map_err(|_| {
            SpendlogError::Config(format!(
                "AI features need an API key in the {} environment variable",
                self.api_key_env
            ))
        })
    }
}

/// User settings for Spendlog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO currency code used for display and AI prompts
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// AI service settings
    #[serde(default)]
    pub ai: AiSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_code() -> String {
    "USD".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_code: default_currency_code(),
            ai: AiSettings::default(),
        }
    }
}

impl Settings {
    /// The configured currency, falling back to USD for unknown codes
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.currency_code).unwrap_or_default()
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendlogPaths) -> Result<Self, SpendlogError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SpendlogError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendlogError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendlogPaths) -> Result<(), SpendlogError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SpendlogError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| SpendlogError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
