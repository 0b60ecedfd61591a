//! MCP tool definitions for MagicSlides.

use super::protocol::Tool;
use serde_json::json;

pub const CREATE_PPT_FROM_TEXT: &str = "create_ppt_from_text";
pub const GET_YOUTUBE_TRANSCRIPT: &str = "get_youtube_transcript";

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: CREATE_PPT_FROM_TEXT.to_string(),
            description: "Generate a PowerPoint presentation from text or a YouTube URL. \
                Mention a slide count (\"8 slides\"), a model (gpt-4, gemini), a template \
                or \"with images\" in the text to control the result. Returns links to the \
                presentation and its PDF."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "userText": {
                        "type": "string",
                        "description": "Topic text, or a YouTube video URL whose transcript becomes the topic"
                    },
                    "accountId": {
                        "type": "string",
                        "description": "MagicSlides account ID of the caller"
                    }
                },
                "required": ["userText", "accountId"]
            }),
        },
        Tool {
            name: GET_YOUTUBE_TRANSCRIPT.to_string(),
            description: "Fetch the transcript of a YouTube video.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ytUrl": {
                        "type": "string",
                        "description": "YouTube video URL"
                    }
                },
                "required": ["ytUrl"]
            }),
        },
    ]
}
