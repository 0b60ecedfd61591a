//! Client for the external parameter-inference service.

use crate::error::{Result, SlidesError, UpstreamError};
use crate::http::ServiceClient;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument};

/// Parameters suggested by the inference service. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredParameters {
    pub slide_count: Option<u32>,
    pub language: Option<String>,
    pub model: Option<String>,
    pub template: Option<String>,
    pub image_for_each_slide: Option<bool>,
    pub image_source: Option<String>,
    /// Rewritten topic/summary; replaces the raw text verbatim when present.
    pub topic: Option<String>,
}

impl InferredParameters {
    /// Read the service's JSON body. Unusable fields are ignored; a body that
    /// is not an object is an error.
    pub fn from_response(body: &Value) -> std::result::Result<Self, UpstreamError> {
        let obj = body
            .as_object()
            .ok_or_else(|| UpstreamError::new("Invalid API response from fetch-data endpoint."))?;

        let slide_count = obj.get("slideCount").and_then(|v| match v {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        });

        Ok(Self {
            slide_count: slide_count.filter(|n| *n > 0),
            language: first_text(obj, &["language"]),
            model: first_text(obj, &["model"]).map(|m| m.to_lowercase()),
            template: first_text(obj, &["template"]).map(|t| t.to_lowercase()),
            image_for_each_slide: obj.get("imageForEachSlide").and_then(Value::as_bool),
            image_source: first_text(obj, &["image_source", "imageSource"]),
            topic: ["msSummaryText", "rewrittenTopic"]
                .iter()
                .filter_map(|k| obj.get(*k).and_then(Value::as_str))
                .find(|s| !s.trim().is_empty())
                .map(str::to_string),
        })
    }
}

/// First non-blank string among `keys`.
fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    text: &'a str,
}

/// Client for the parameter-inference service.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: ServiceClient,
    endpoint: String,
    timeout: Duration,
}

impl InferenceClient {
    pub fn new(client: ServiceClient, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Ask the service for parameter suggestions. Callers treat failure as non-fatal.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn infer(&self, text: &str) -> Result<InferredParameters> {
        let body = self
            .client
            .post_json(&self.endpoint, &InferenceRequest { text }, self.timeout, None)
            .await
            .map_err(SlidesError::Inference)?;

        debug!("Inference response: {}", body);
        InferredParameters::from_response(&body).map_err(SlidesError::Inference)
    }
}
