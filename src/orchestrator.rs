//! Pipeline orchestrator for MagicSlides.
//!
//! Coordinates entitlement, transcript substitution, parameter inference and
//! the single generation submission behind the two tool operations.

use crate::account::{AccountClient, Entitlement};
use crate::config::{CredentialStatus, Settings};
use crate::error::{Result, SlidesError};
use crate::generation::{GenerationClient, GenerationRequest, GenerationResult};
use crate::http::ServiceClient;
use crate::params::{GenerationParameters, InferenceClient, ParameterInferencer};
use crate::source::{detect_source, SourceType, TranscriptClient};
use tracing::{info, instrument};

/// The main orchestrator for the MagicSlides pipeline.
///
/// Holds no per-call state: every invocation resolves entitlement and
/// parameters afresh, so one orchestrator serves concurrent calls.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    settings: Settings,
    transcripts: TranscriptClient,
    accounts: AccountClient,
    inferencer: ParameterInferencer,
    generator: GenerationClient,
}

impl Orchestrator {
    /// Create a new orchestrator wired to the configured services.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let client = ServiceClient::new()?;
        let service_timeout = settings.timeouts.service();

        let transcripts = TranscriptClient::new(
            client.clone(),
            &settings.services.transcript_url,
            service_timeout,
        );
        let accounts = AccountClient::new(
            client.clone(),
            &settings.services.account_url,
            &settings.services.pricing_url,
            service_timeout,
        );
        let inferencer = ParameterInferencer::new(
            InferenceClient::new(client.clone(), &settings.services.inference_url, service_timeout),
            settings.defaults.clone(),
        );
        let generator = GenerationClient::new(
            client,
            &settings.services.generation_url,
            settings.timeouts.generation(),
        );

        Ok(Self {
            settings,
            transcripts,
            accounts,
            inferencer,
            generator,
        })
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Startup credential check, consulted before any generation call.
    pub fn credential_status(&self) -> CredentialStatus {
        self.settings.credential_status()
    }

    /// Fetch a YouTube transcript, rejecting anything that is not a YouTube URL.
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, url: &str) -> Result<String> {
        let url = url.trim();
        if detect_source(url) != SourceType::YouTube {
            return Err(SlidesError::InvalidInput(format!("Invalid YouTube URL: {}", url)));
        }
        self.transcripts.fetch_transcript(url).await
    }

    /// Look up the caller's entitlement.
    pub async fn resolve_entitlement(&self, account_id: &str) -> Result<Entitlement> {
        self.accounts.resolve_entitlement(account_id).await
    }

    /// Resolve generation parameters for free text. Never fails.
    pub async fn infer_parameters(&self, text: &str) -> GenerationParameters {
        self.inferencer.infer_parameters(text).await
    }

    /// Turn free text or a YouTube URL into a generated presentation.
    ///
    /// Every step either feeds the next or aborts the call; parameter
    /// inference alone degrades to hints and defaults.
    #[instrument(skip(self, input, account_id), fields(input_chars = input.chars().count()))]
    pub async fn create_presentation(&self, input: &str, account_id: &str) -> Result<GenerationResult> {
        let api_key = match self.credential_status() {
            CredentialStatus::Configured => self.settings.api_key().unwrap_or_default().to_string(),
            CredentialStatus::Missing => {
                return Err(SlidesError::Config(
                    "MAGICSLIDES_API_KEY is not set. Set it in the environment or in credentials.api_key."
                        .to_string(),
                ))
            }
        };

        if input.trim().is_empty() {
            return Err(SlidesError::InvalidInput("Text or YouTube URL is required.".to_string()));
        }

        let entitlement = self.resolve_entitlement(account_id).await?;

        let topic_text = match detect_source(input) {
            SourceType::YouTube => {
                info!("YouTube URL detected, fetching transcript...");
                self.transcripts.fetch_transcript(input.trim()).await?
            }
            SourceType::Text => input.to_string(),
        };

        let params = self.inferencer.infer_parameters(&topic_text).await;
        info!(
            "Parameters resolved: {} slides, model {}, template {}, language {}",
            params.slide_count, params.model, params.template, params.language
        );

        let request = GenerationRequest::new(&entitlement, params);
        self.generator.submit(&request, &api_key).await
    }
}
