//! Topic sources: free text or a YouTube video whose transcript becomes the topic.

mod youtube;

pub use youtube::{is_youtube_url, TranscriptClient};

use serde::Serialize;

/// Type of topic input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    YouTube,
    Text,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::YouTube => write!(f, "youtube"),
            SourceType::Text => write!(f, "text"),
        }
    }
}

/// Classify raw caller input.
pub fn detect_source(input: &str) -> SourceType {
    if is_youtube_url(input.trim()) {
        SourceType::YouTube
    } else {
        SourceType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_source() {
        assert_eq!(detect_source("  https://youtu.be/abc \n"), SourceType::YouTube);
        assert_eq!(detect_source("10 slides about volcanoes"), SourceType::Text);
        assert_eq!(SourceType::YouTube.to_string(), "youtube");
    }
}
