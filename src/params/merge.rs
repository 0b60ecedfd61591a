//! Merge hints, inferred values and defaults into final generation parameters.
//!
//! Precedence, per field:
//!
//! | field                  | 1st      | 2nd            | 3rd     |
//! |------------------------|----------|----------------|---------|
//! | `slide_count`          | hint     | inferred       | default |
//! | `model`                | hint     | inferred       | default |
//! | `template`             | hint     | inferred       | default |
//! | `image_for_each_slide` | hint     | inferred       | default |
//! | `language`             | -        | inferred       | default |
//! | `image_source`         | -        | inferred       | default |
//! | `topic`                | -        | rewritten text | trimmed raw text |

use super::hints::ParsedHints;
use super::inference::InferredParameters;
use crate::config::GenerationDefaults;
use serde::Serialize;

/// Fully resolved parameters for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub topic: String,
    pub slide_count: u32,
    pub image_for_each_slide: bool,
    pub language: String,
    pub model: String,
    pub template: String,
    pub image_source: String,
}

/// Apply the precedence table. `inferred` is `None` when inference failed.
pub fn merge_parameters(
    raw_text: &str,
    hints: &ParsedHints,
    inferred: Option<&InferredParameters>,
    defaults: &GenerationDefaults,
) -> GenerationParameters {
    let empty = InferredParameters::default();
    let inferred = inferred.unwrap_or(&empty);

    GenerationParameters {
        topic: inferred
            .topic
            .clone()
            .unwrap_or_else(|| raw_text.trim().to_string()),
        slide_count: hints
            .slide_count
            .or(inferred.slide_count)
            .unwrap_or(defaults.slide_count),
        image_for_each_slide: hints
            .image_for_each_slide
            .or(inferred.image_for_each_slide)
            .unwrap_or(defaults.image_for_each_slide),
        language: inferred
            .language
            .clone()
            .unwrap_or_else(|| defaults.language.clone()),
        model: hints
            .model
            .map(|m| m.as_str().to_string())
            .or_else(|| inferred.model.clone())
            .unwrap_or_else(|| defaults.model.clone()),
        template: hints
            .template
            .clone()
            .or_else(|| inferred.template.clone())
            .unwrap_or_else(|| defaults.template.clone()),
        image_source: inferred
            .image_source
            .clone()
            .unwrap_or_else(|| defaults.image_source.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::hints::{extract_hints, HintModel};

    #[test]
    fn test_defaults_only() {
        let params = merge_parameters(
            "  whales  ",
            &ParsedHints::default(),
            None,
            &GenerationDefaults::default(),
        );
        assert_eq!(
            params,
            GenerationParameters {
                topic: "whales".to_string(),
                slide_count: 10,
                image_for_each_slide: false,
                language: "en".to_string(),
                model: "gemini".to_string(),
                template: "bullet-point1".to_string(),
                image_source: "google".to_string(),
            }
        );
    }

    #[test]
    fn test_hints_beat_inferred_values() {
        let text = "5 slides about cats with gpt-4";
        let hints = extract_hints(text);
        let inferred = InferredParameters {
            slide_count: Some(20),
            model: Some("gemini".to_string()),
            language: Some("fr".to_string()),
            ..Default::default()
        };

        let params = merge_parameters(text, &hints, Some(&inferred), &GenerationDefaults::default());
        assert_eq!(params.slide_count, 5);
        assert_eq!(params.model, "gpt-4");
        assert_eq!(params.language, "fr");
    }

    #[test]
    fn test_template_hint_beats_inferred_template() {
        let text = "minimal slides about tide pools";
        let hints = extract_hints(text);
        let inferred = InferredParameters {
            template: Some("bullet-point1".to_string()),
            ..Default::default()
        };

        let params = merge_parameters(text, &hints, Some(&inferred), &GenerationDefaults::default());
        assert_eq!(params.template, "minimal1");
    }

    #[test]
    fn test_inferred_fills_gaps_and_topic_is_rewritten() {
        let inferred = InferredParameters {
            topic: Some("A history of volcanoes".to_string()),
            template: Some("minimal1".to_string()),
            image_for_each_slide: Some(true),
            image_source: Some("ai".to_string()),
            ..Default::default()
        };

        let params = merge_parameters(
            "volcanoes",
            &ParsedHints::default(),
            Some(&inferred),
            &GenerationDefaults::default(),
        );
        assert_eq!(params.topic, "A history of volcanoes");
        assert_eq!(params.template, "minimal1");
        assert!(params.image_for_each_slide);
        assert_eq!(params.image_source, "ai");
        assert_eq!(params.slide_count, 10);
    }

    #[test]
    fn test_image_hint_true_wins_over_inferred_false() {
        let hints = ParsedHints {
            image_for_each_slide: Some(true),
            model: Some(HintModel::Gemini),
            ..Default::default()
        };
        let inferred = InferredParameters {
            image_for_each_slide: Some(false),
            model: Some("gpt-4".to_string()),
            ..Default::default()
        };
        let params = merge_parameters("x", &hints, Some(&inferred), &GenerationDefaults::default());
        assert!(params.image_for_each_slide);
        assert_eq!(params.model, "gemini");
    }
}
