//! Generation parameter inference.
//!
//! Explicit hints found in the caller's text always win. The inference service
//! fills the remaining gaps, and built-in defaults cover whatever is left. A
//! failing inference service never fails the caller.

mod hints;
mod inference;
mod merge;

pub use hints::{extract_hints, HintModel, ParsedHints};
pub use inference::{InferenceClient, InferredParameters};
pub use merge::{merge_parameters, GenerationParameters};

use crate::config::GenerationDefaults;
use tracing::{info, instrument, warn};

/// Resolves [`GenerationParameters`] from raw topic text.
#[derive(Debug, Clone)]
pub struct ParameterInferencer {
    client: Option<InferenceClient>,
    defaults: GenerationDefaults,
}

impl ParameterInferencer {
    pub fn new(client: InferenceClient, defaults: GenerationDefaults) -> Self {
        Self {
            client: Some(client),
            defaults,
        }
    }

    /// Hints and defaults only; the inference service is never called.
    pub fn offline(defaults: GenerationDefaults) -> Self {
        Self {
            client: None,
            defaults,
        }
    }

    /// Resolve parameters. Always succeeds.
    #[instrument(skip(self, raw_text))]
    pub async fn infer_parameters(&self, raw_text: &str) -> GenerationParameters {
        let hints = extract_hints(raw_text);
        if !hints.is_empty() {
            info!("Explicit hints: {:?}", hints);
        }

        let inferred = match &self.client {
            Some(client) => match client.infer(raw_text).await {
                Ok(inferred) => Some(inferred),
                Err(e) => {
                    warn!("Falling back to hints and defaults: {}", e);
                    None
                }
            },
            None => None,
        };

        merge_parameters(raw_text, &hints, inferred.as_ref(), &self.defaults)
    }
}
