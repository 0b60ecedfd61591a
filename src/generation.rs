//! Slide deck generation: the merged request payload and the service response.

use crate::account::Entitlement;
use crate::error::{Result, SlidesError, UpstreamError};
use crate::http::ServiceClient;
use crate::params::GenerationParameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Tag identifying this integration to the generation service.
pub const SOURCE_TAG: &str = "magicslides-mcp";

/// Payload submitted exactly once per tool invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub ms_summary_text: String,
    pub extra_info_source: String,
    pub plan: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    pub slide_count: u32,
    pub image_for_each_slide: bool,
    pub language: String,
    pub model: String,
    pub template: String,
    #[serde(rename = "image_source")]
    pub image_source: String,
    pub cache: bool,
    pub source: String,
    pub request_id: Uuid,
}

impl GenerationRequest {
    /// Merge entitlement and parameters under a fresh request id.
    pub fn new(entitlement: &Entitlement, params: GenerationParameters) -> Self {
        Self {
            ms_summary_text: params.topic,
            extra_info_source: String::new(),
            plan: entitlement.plan_name.clone(),
            email: entitlement.email.clone(),
            workspace_id: entitlement.workspace_id.clone(),
            slide_count: params.slide_count,
            image_for_each_slide: params.image_for_each_slide,
            language: params.language,
            model: params.model,
            template: params.template,
            image_source: params.image_source,
            cache: true,
            source: SOURCE_TAG.to_string(),
            request_id: Uuid::new_v4(),
        }
    }
}

/// Normalized outcome of a successful generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGenerationResponse {
    success: Option<bool>,
    presentation_url: Option<Value>,
    ppt_url: Option<Value>,
    url: Option<Value>,
    pdf_url: Option<Value>,
    presentation_id: Option<Value>,
    id: Option<Value>,
    slide_count: Option<Value>,
    message: Option<Value>,
    error: Option<Value>,
}

/// First non-blank string among candidate fields, in order.
fn first_string(candidates: impl IntoIterator<Item = Option<Value>>) -> Option<String> {
    candidates.into_iter().flatten().find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

impl GenerationResult {
    /// Validate the service response: an object with `success: true` and a
    /// presentation URL or id.
    pub fn from_response(body: Value) -> std::result::Result<Self, UpstreamError> {
        if !body.is_object() {
            return Err(UpstreamError::new("Invalid API response."));
        }

        let raw: RawGenerationResponse = serde_json::from_value(body)
            .map_err(|e| UpstreamError::new(format!("Invalid API response: {}", e)))?;

        match raw.success {
            Some(true) => {}
            Some(false) => {
                let reason = first_string([raw.error, raw.message])
                    .unwrap_or_else(|| "the service reported failure".to_string());
                return Err(UpstreamError::new(reason));
            }
            None => return Err(UpstreamError::new("Invalid API response: missing success flag.")),
        }

        let presentation_url = first_string([raw.presentation_url, raw.ppt_url, raw.url]);
        let presentation_id = [raw.presentation_id, raw.id]
            .into_iter()
            .flatten()
            .find_map(|id| match id {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });

        if presentation_url.is_none() && presentation_id.is_none() {
            return Err(UpstreamError::new(
                "Invalid API response: no presentation URL or id.",
            ));
        }

        Ok(Self {
            success: true,
            presentation_url,
            pdf_url: first_string([raw.pdf_url]),
            presentation_id,
            slide_count: raw.slide_count.and_then(|v| match v {
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }),
        })
    }
}

/// Client for the generation service.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: ServiceClient,
    endpoint: String,
    timeout: Duration,
}

impl GenerationClient {
    pub fn new(client: ServiceClient, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Submit the request once and validate the response.
    #[instrument(skip(self, request, api_key), fields(request_id = %request.request_id))]
    pub async fn submit(&self, request: &GenerationRequest, api_key: &str) -> Result<GenerationResult> {
        info!(
            "Submitting generation ({} slides, model {}, template {})",
            request.slide_count, request.model, request.template
        );

        let body = self
            .client
            .post_json(&self.endpoint, request, self.timeout, Some(api_key))
            .await
            .map_err(SlidesError::Generation)?;

        let result = GenerationResult::from_response(body).map_err(SlidesError::Generation)?;
        info!("Presentation created");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Plan;
    use serde_json::json;

    fn params() -> GenerationParameters {
        GenerationParameters {
            topic: "Volcanoes".to_string(),
            slide_count: 10,
            image_for_each_slide: false,
            language: "en".to_string(),
            model: "gemini".to_string(),
            template: "bullet-point1".to_string(),
            image_source: "google".to_string(),
        }
    }

    #[test]
    fn test_request_payload_shape() {
        let entitlement = Entitlement {
            email: "a@b.com".to_string(),
            plan: Plan::Paid,
            plan_name: "Paid".to_string(),
            workspace_id: None,
        };
        let request = GenerationRequest::new(&entitlement, params());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["msSummaryText"], "Volcanoes");
        assert_eq!(value["extraInfoSource"], "");
        assert_eq!(value["plan"], "Paid");
        assert_eq!(value["email"], "a@b.com");
        assert_eq!(value["slideCount"], 10);
        assert_eq!(value["image_source"], "google");
        assert_eq!(value["cache"], true);
        assert_eq!(value["source"], SOURCE_TAG);
        assert!(value.get("workspaceId").is_none());
        assert!(value["requestId"].as_str().is_some());
    }

    #[test]
    fn test_request_ids_are_unique() {
        let entitlement = Entitlement {
            email: "a@b.com".to_string(),
            plan: Plan::Premium,
            plan_name: "premium".to_string(),
            workspace_id: Some("ws".to_string()),
        };
        let first = GenerationRequest::new(&entitlement, params());
        let second = GenerationRequest::new(&entitlement, params());
        assert_ne!(first.request_id, second.request_id);
    }

    #[test]
    fn test_response_aliases() {
        let result = GenerationResult::from_response(json!({
            "success": true,
            "url": "https://x/ppt",
            "pdfUrl": "https://x/pdf",
            "id": 42,
            "slideCount": 8
        }))
        .unwrap();

        assert_eq!(result.presentation_url.as_deref(), Some("https://x/ppt"));
        assert_eq!(result.pdf_url.as_deref(), Some("https://x/pdf"));
        assert_eq!(result.presentation_id.as_deref(), Some("42"));
        assert_eq!(result.slide_count, Some(8));
    }

    #[test]
    fn test_response_with_every_reference_key() {
        let result = GenerationResult::from_response(json!({
            "success": true,
            "presentationUrl": "https://x/y",
            "pptUrl": "https://x/y",
            "url": "https://x/y",
            "presentationId": "p1",
            "id": "p1"
        }))
        .unwrap();
        assert_eq!(result.presentation_url.as_deref(), Some("https://x/y"));
        assert_eq!(result.presentation_id.as_deref(), Some("p1"));

        let fallback = GenerationResult::from_response(json!({
            "success": true,
            "presentationUrl": "",
            "pptUrl": "https://x/ppt",
            "presentationId": null,
            "id": 7
        }))
        .unwrap();
        assert_eq!(fallback.presentation_url.as_deref(), Some("https://x/ppt"));
        assert_eq!(fallback.presentation_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_response_validation() {
        assert!(GenerationResult::from_response(json!("ok")).is_err());
        assert!(GenerationResult::from_response(json!({ "presentationUrl": "https://x" })).is_err());
        assert!(GenerationResult::from_response(json!({ "success": true })).is_err());

        let err = GenerationResult::from_response(json!({
            "success": false,
            "message": "quota exceeded"
        }))
        .unwrap_err();
        assert_eq!(err.message, "quota exceeded");

        let ok = GenerationResult::from_response(json!({
            "success": true,
            "presentationId": "p-1"
        }))
        .unwrap();
        assert_eq!(ok.presentation_id.as_deref(), Some("p-1"));
    }
}
