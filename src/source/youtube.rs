//! YouTube URL detection and transcript retrieval.

use crate::error::{Result, SlidesError, UpstreamError};
use crate::http::ServiceClient;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{info, instrument};

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        ^
        (?:https?://)?
        (?:www\.)?
        (?:youtube\.com|youtu\.?be)
        /.+
        $
    ",
    )
    .expect("Invalid regex")
});

/// Whether `text` is a YouTube video URL (scheme and `www.` optional).
pub fn is_youtube_url(text: &str) -> bool {
    YOUTUBE_URL.is_match(text)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptRequest<'a> {
    yt_url: &'a str,
}

/// Client for the external transcript service.
#[derive(Debug, Clone)]
pub struct TranscriptClient {
    client: ServiceClient,
    endpoint: String,
    timeout: Duration,
}

impl TranscriptClient {
    pub fn new(client: ServiceClient, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Fetch the transcript of a YouTube video. No retries.
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, url: &str) -> Result<String> {
        info!("Fetching YouTube transcript");

        let response = self
            .client
            .post_json(&self.endpoint, &TranscriptRequest { yt_url: url }, self.timeout, None)
            .await
            .map_err(SlidesError::Transcript)?;

        let transcript = response
            .get("transcript")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                SlidesError::Transcript(UpstreamError::new("Failed to fetch YouTube transcript."))
            })?;

        info!("Transcript received ({} chars)", transcript.chars().count());
        Ok(transcript.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_youtube_url_accepts_variants() {
        assert!(is_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_youtube_url("http://youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_youtube_url("youtube.com/shorts/abc"));
        assert!(is_youtube_url("www.youtube.com/embed/abc"));
        assert!(is_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_youtube_url("youtu.be/x"));
        assert!(is_youtube_url("HTTPS://WWW.YOUTUBE.COM/watch?v=abc"));
    }

    #[test]
    fn test_is_youtube_url_rejects_others() {
        assert!(!is_youtube_url(""));
        assert!(!is_youtube_url("example.com/video"));
        assert!(!is_youtube_url("youtube.comx/video"));
        assert!(!is_youtube_url("https://youtube.com/"));
        assert!(!is_youtube_url("https://youtube.com"));
        assert!(!is_youtube_url("Make 5 slides about youtube.com/watch?v=abc"));
        assert!(!is_youtube_url("ftp://youtube.com/watch?v=abc"));
    }

    fn client_for(server: &MockServer) -> TranscriptClient {
        TranscriptClient::new(
            ServiceClient::new().unwrap(),
            server.uri(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_fetch_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "ytUrl": "https://youtu.be/abc" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "transcript": "hello world" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transcript = client_for(&server)
            .fetch_transcript("https://youtu.be/abc")
            .await
            .unwrap();
        assert_eq!(transcript, "hello world");
    }

    #[tokio::test]
    async fn test_fetch_transcript_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "transcript": "" })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_transcript("https://youtu.be/abc")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transcript);
    }

    #[tokio::test]
    async fn test_fetch_transcript_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("video has no captions"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_transcript("https://youtu.be/abc")
            .await
            .unwrap_err();
        match err {
            SlidesError::Transcript(upstream) => {
                assert_eq!(upstream.status, Some(404));
                assert_eq!(upstream.message, "video has no captions");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
