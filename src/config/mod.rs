//! Configuration module for MagicSlides.
//!
//! Handles loading and managing service endpoints, credentials and generation defaults.

mod settings;

pub use settings::{
    CredentialSettings, CredentialStatus, GeneralSettings, GenerationDefaults, ServiceSettings,
    Settings, TimeoutSettings,
};
