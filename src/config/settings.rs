//! Configuration settings for MagicSlides.

use crate::error::{Result, SlidesError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub credentials: CredentialSettings,
    pub services: ServiceSettings,
    pub timeouts: TimeoutSettings,
    pub defaults: GenerationDefaults,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Access credentials for the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CredentialSettings {
    /// API key sent with every generation request.
    pub api_key: Option<String>,
}

/// Endpoints of the external collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// YouTube transcript service.
    pub transcript_url: String,
    /// Account info (plan/email) lookup.
    pub account_url: String,
    /// Parameter inference service.
    pub inference_url: String,
    /// Slide deck generation service.
    pub generation_url: String,
    /// Pricing page shown when a plan is not allowed to generate.
    pub pricing_url: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            transcript_url: "https://youtube-transcripts-main.onrender.com/get-youtube-transcript"
                .to_string(),
            account_url: "https://www.magicslides.app/api/fetch-account-info-using-accountid"
                .to_string(),
            inference_url: "https://video-and-audio-description-qh4z.onrender.com/api/v1/fetch-slide-generation-data"
                .to_string(),
            generation_url: "https://magicslides-tools-api.onrender.com/api/v2/create_ppt_from_summary"
                .to_string(),
            pricing_url: "https://www.magicslides.app/pricing".to_string(),
        }
    }
}

/// Per-call timeouts, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    /// Transcript, account and inference calls.
    pub service_seconds: u64,
    /// Final generation submission.
    pub generation_seconds: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            service_seconds: 30,
            generation_seconds: 60,
        }
    }
}

impl TimeoutSettings {
    pub fn service(&self) -> Duration {
        Duration::from_secs(self.service_seconds)
    }

    pub fn generation(&self) -> Duration {
        Duration::from_secs(self.generation_seconds)
    }
}

/// Built-in generation parameters used when neither a hint nor the
/// inference service provides a value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationDefaults {
    pub slide_count: u32,
    pub image_for_each_slide: bool,
    pub language: String,
    pub model: String,
    pub template: String,
    pub image_source: String,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            slide_count: 10,
            image_for_each_slide: false,
            language: "en".to_string(),
            model: "gemini".to_string(),
            template: "bullet-point1".to_string(),
            image_source: "google".to_string(),
        }
    }
}

/// Outcome of the startup credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Configured,
    Missing,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => Self::expand_path(&p.to_string_lossy()),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("magicslides")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Override the configured API key (CLI flag or environment).
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.credentials.api_key = Some(key);
        }
        self
    }

    /// The API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.credentials
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn credential_status(&self) -> CredentialStatus {
        match self.api_key() {
            Some(_) => CredentialStatus::Configured,
            None => CredentialStatus::Missing,
        }
    }

    /// Check endpoints and timeouts without touching the network.
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("services.transcript_url", &self.services.transcript_url),
            ("services.account_url", &self.services.account_url),
            ("services.inference_url", &self.services.inference_url),
            ("services.generation_url", &self.services.generation_url),
            ("services.pricing_url", &self.services.pricing_url),
        ];
        for (key, value) in endpoints {
            url::Url::parse(value)
                .map_err(|e| SlidesError::Config(format!("{} is not a valid URL ({}): {}", key, value, e)))?;
        }

        if self.timeouts.service_seconds == 0 || self.timeouts.generation_seconds == 0 {
            return Err(SlidesError::Config("timeouts must be greater than zero".to_string()));
        }

        if self.defaults.slide_count == 0 {
            return Err(SlidesError::Config("defaults.slide_count must be greater than zero".to_string()));
        }

        Ok(())
    }

    /// Set a value by dotted key (e.g. "defaults.template").
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_u64 = |v: &str| {
            v.parse::<u64>()
                .map_err(|_| SlidesError::Config(format!("{} expects a positive integer, got '{}'", key, v)))
        };

        match key {
            "general.log_level" => self.general.log_level = value.to_string(),
            "credentials.api_key" => self.credentials.api_key = Some(value.to_string()),
            "services.transcript_url" => self.services.transcript_url = value.to_string(),
            "services.account_url" => self.services.account_url = value.to_string(),
            "services.inference_url" => self.services.inference_url = value.to_string(),
            "services.generation_url" => self.services.generation_url = value.to_string(),
            "services.pricing_url" => self.services.pricing_url = value.to_string(),
            "timeouts.service_seconds" => self.timeouts.service_seconds = parse_u64(value)?,
            "timeouts.generation_seconds" => self.timeouts.generation_seconds = parse_u64(value)?,
            "defaults.slide_count" => {
                self.defaults.slide_count = u32::try_from(parse_u64(value)?)
                    .map_err(|_| SlidesError::Config(format!("{} is out of range", key)))?
            }
            "defaults.image_for_each_slide" => {
                self.defaults.image_for_each_slide = value.parse().map_err(|_| {
                    SlidesError::Config(format!("{} expects true or false, got '{}'", key, value))
                })?
            }
            "defaults.language" => self.defaults.language = value.to_string(),
            "defaults.model" => self.defaults.model = value.to_lowercase(),
            "defaults.template" => self.defaults.template = value.to_lowercase(),
            "defaults.image_source" => self.defaults.image_source = value.to_string(),
            _ => return Err(SlidesError::Config(format!("Unknown configuration key: {}", key))),
        }

        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timeouts.service(), Duration::from_secs(30));
        assert_eq!(settings.timeouts.generation(), Duration::from_secs(60));
        assert_eq!(settings.defaults.slide_count, 10);
        assert_eq!(settings.defaults.model, "gemini");
        assert_eq!(settings.defaults.image_source, "google");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_credential_status() {
        let settings = Settings::default();
        assert_eq!(settings.credential_status(), CredentialStatus::Missing);

        let settings = settings.with_api_key(Some("   ".to_string()));
        assert_eq!(settings.credential_status(), CredentialStatus::Missing);

        let settings = settings.with_api_key(Some("ms-key".to_string()));
        assert_eq!(settings.credential_status(), CredentialStatus::Configured);
        assert_eq!(settings.api_key(), Some("ms-key"));
    }

    #[test]
    fn test_partial_file_and_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\ntemplate = \"minimal1\"\n").unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.defaults.template, "minimal1");
        assert_eq!(settings.defaults.language, "en");

        let mut settings = settings;
        settings.set_value("timeouts.generation_seconds", "90").unwrap();
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(reloaded.timeouts.generation_seconds, 90);
        assert_eq!(reloaded.defaults.template, "minimal1");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.defaults, GenerationDefaults::default());
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut settings = Settings::default();
        assert!(settings.set_value("nope.key", "1").is_err());
        assert!(settings.set_value("timeouts.service_seconds", "soon").is_err());
        assert!(settings.set_value("services.account_url", "not a url").is_err());
        assert!(settings.set_value("timeouts.service_seconds", "0").is_err());
    }
}
