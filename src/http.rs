//! Shared HTTP client for the external collaborators.

use crate::error::{Result, SlidesError, UpstreamError};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest upstream body echoed back in an error message.
const MAX_ERROR_BODY: usize = 300;

/// Header carrying the generation credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Connection-pooled JSON client. Cheap to clone; every request sets its own timeout.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
}

impl ServiceClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("magicslides-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SlidesError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// POST a JSON body and return the decoded JSON response.
    ///
    /// Non-2xx statuses, timeouts, transport failures and non-JSON bodies all
    /// come back as an [`UpstreamError`]; callers wrap it in their own variant.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        timeout: Duration,
        api_key: Option<&str>,
    ) -> std::result::Result<Value, UpstreamError> {
        debug!("POST {} (timeout {:?})", url, timeout);

        let mut request = self.http.post(url).json(body).timeout(timeout);
        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                truncate(body.trim(), MAX_ERROR_BODY)
            };
            return Err(UpstreamError::with_status(status.as_u16(), message));
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(&e, timeout))?;

        serde_json::from_str(&text).map_err(|e| {
            UpstreamError::with_status(status.as_u16(), format!("response is not valid JSON: {}", e))
        })
    }
}

fn transport_error(err: &reqwest::Error, timeout: Duration) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::new(format!("request timed out after {}s", timeout.as_secs()))
    } else if err.is_connect() {
        UpstreamError::new(format!("could not connect to service: {}", err))
    } else {
        UpstreamError::new(err.to_string())
    }
}

/// Truncate text with ellipsis, respecting char boundaries.
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Mask a secret for logs, keeping a short prefix.
pub(crate) fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{}***", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_success_sends_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header(API_KEY_HEADER, "secret"))
            .and(body_json(json!({ "a": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClient::new().unwrap();
        let value = client
            .post_json(
                &format!("{}/echo", server.uri()),
                &json!({ "a": 1 }),
                Duration::from_secs(5),
                Some("secret"),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_post_json_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = ServiceClient::new().unwrap();
        let err = client
            .post_json(&server.uri(), &json!({}), Duration::from_secs(5), None)
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(503));
        assert_eq!(err.message, "maintenance");
    }

    #[tokio::test]
    async fn test_post_json_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let client = ServiceClient::new().unwrap();
        let err = client
            .post_json(&server.uri(), &json!({}), Duration::from_millis(200), None)
            .await
            .unwrap_err();

        assert_eq!(err.status, None);
        assert!(err.message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_post_json_rejects_non_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = ServiceClient::new().unwrap();
        let err = client
            .post_json(&server.uri(), &json!({}), Duration::from_secs(5), None)
            .await
            .unwrap_err();

        assert!(err.message.contains("not valid JSON"));
    }

    #[test]
    fn test_truncate_and_redact() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo world", 5), "héllo...");
        assert_eq!(redact("abcdefgh"), "abcd***");
    }
}
