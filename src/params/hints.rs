//! Deterministic hint extraction from the caller's literal text.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static SLIDE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*slides?\b").expect("Invalid regex"));

/// Template aliases, most specific first so "ed bullet point" never resolves
/// to the plain bullet-point template.
const TEMPLATE_ALIASES: &[(&str, &str)] = &[
    ("ed-bullet-point", "ed-bullet-point1"),
    ("ed bullet point", "ed-bullet-point1"),
    ("custom design", "custom-design"),
    ("bullet-point", "bullet-point1"),
    ("bullet points", "bullet-point1"),
    ("bullet point", "bullet-point1"),
    ("minimal", "minimal1"),
];

/// Phrases meaning "put an image on the slides". There is no negative phrase:
/// absence leaves the preference unset.
const IMAGE_PHRASES: &[&str] = &[
    "with images",
    "with image",
    "include images",
    "including images",
    "add images",
    "image for each slide",
    "images for each slide",
    "with pictures",
];

/// Generation model named by a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HintModel {
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gemini")]
    Gemini,
}

impl HintModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HintModel::Gpt4 => "gpt-4",
            HintModel::Gemini => "gemini",
        }
    }
}

/// Parameters the caller spelled out explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<HintModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_for_each_slide: Option<bool>,
}

impl ParsedHints {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Extract hints from raw text. Pure; matching is case-insensitive.
pub fn extract_hints(text: &str) -> ParsedHints {
    let lower = text.to_lowercase();

    let model = if lower.contains("gpt-4") || lower.contains("gpt4") {
        Some(HintModel::Gpt4)
    } else if lower.contains("gemini") {
        Some(HintModel::Gemini)
    } else {
        None
    };

    let template = TEMPLATE_ALIASES
        .iter()
        .find(|(alias, _)| lower.contains(alias))
        .map(|(_, template)| template.to_string());

    let image_for_each_slide = IMAGE_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
        .then_some(true);

    let slide_count = SLIDE_COUNT
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|count| *count > 0);

    ParsedHints {
        model,
        template,
        slide_count,
        image_for_each_slide,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_full_hint_set() {
        let hints = extract_hints("Make 5 slides about cats using gpt-4 with images");
        assert_eq!(hints.slide_count, Some(5));
        assert_eq!(hints.model, Some(HintModel::Gpt4));
        assert_eq!(hints.image_for_each_slide, Some(true));
        assert_eq!(hints.template, None);
    }

    #[test]
    fn test_model_hints() {
        assert_eq!(extract_hints("use GPT4 please").model, Some(HintModel::Gpt4));
        assert_eq!(extract_hints("Gemini deck").model, Some(HintModel::Gemini));
        assert_eq!(extract_hints("gpt-4 or gemini").model, Some(HintModel::Gpt4));
        assert_eq!(extract_hints("a deck about whales").model, None);
    }

    #[test]
    fn test_template_prefers_specific_alias() {
        assert_eq!(
            extract_hints("use the ed bullet point template").template.as_deref(),
            Some("ed-bullet-point1")
        );
        assert_eq!(
            extract_hints("Bullet Point style").template.as_deref(),
            Some("bullet-point1")
        );
        assert_eq!(
            extract_hints("a minimal look").template.as_deref(),
            Some("minimal1")
        );
    }

    #[test]
    fn test_slide_count_first_match() {
        assert_eq!(extract_hints("12 Slides, not 3 slides").slide_count, Some(12));
        assert_eq!(extract_hints("7slides on rust").slide_count, Some(7));
        assert_eq!(extract_hints("1 slide summary").slide_count, Some(1));
        assert_eq!(extract_hints("0 slides").slide_count, None);
        assert_eq!(extract_hints("slides about 2024").slide_count, None);
        assert_eq!(extract_hints("5 slideshows").slide_count, None);
        assert_eq!(extract_hints("99999999999 slides").slide_count, None);
    }

    #[test]
    fn test_absent_image_phrase_is_unset() {
        assert_eq!(extract_hints("no images please").image_for_each_slide, None);
        assert!(extract_hints("a deck about whales").is_empty());
    }
}
