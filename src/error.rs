//! Error types for MagicSlides.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure reported by (or while talking to) an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    /// HTTP status returned by the service, if a response was received.
    pub status: Option<u16>,
    /// Upstream message or a description of the transport failure.
    pub message: String,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Library-level error type for MagicSlides operations.
#[derive(Error, Debug)]
pub enum SlidesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Account lookup failed: {0}")]
    Entitlement(UpstreamError),

    #[error("Your plan ({plan}) does not allow generating presentations. Upgrade here: {upgrade_url}")]
    PlanNotAllowed { plan: String, upgrade_url: String },

    #[error("Error fetching YouTube transcript: {0}")]
    Transcript(UpstreamError),

    #[error("Parameter inference failed: {0}")]
    Inference(UpstreamError),

    #[error("Presentation generation failed: {0}")]
    Generation(UpstreamError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Coarse error category, used by the tool boundary to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Entitlement,
    Transcript,
    Inference,
    Generation,
    InvalidInput,
    Internal,
}

impl SlidesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SlidesError::Config(_) => ErrorKind::Configuration,
            SlidesError::Entitlement(_) | SlidesError::PlanNotAllowed { .. } => {
                ErrorKind::Entitlement
            }
            SlidesError::Transcript(_) => ErrorKind::Transcript,
            SlidesError::Inference(_) => ErrorKind::Inference,
            SlidesError::Generation(_) => ErrorKind::Generation,
            SlidesError::InvalidInput(_) => ErrorKind::InvalidInput,
            SlidesError::Io(_)
            | SlidesError::Json(_)
            | SlidesError::TomlParse(_)
            | SlidesError::TomlSerialize(_) => ErrorKind::Internal,
        }
    }

    /// Pricing page link, present only when the caller's plan was rejected.
    pub fn upgrade_url(&self) -> Option<&str> {
        match self {
            SlidesError::PlanNotAllowed { upgrade_url, .. } => Some(upgrade_url),
            _ => None,
        }
    }
}

/// Result type alias for MagicSlides operations.
pub type Result<T> = std::result::Result<T, SlidesError>;
