//! Params command - show how a piece of text would be turned into generation parameters.

use crate::cli::output::content_preview;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::params::{extract_hints, ParameterInferencer};
use anyhow::Result;

/// Resolve and print generation parameters for `text`.
pub async fn run_params(text: &str, offline: bool, settings: Settings) -> Result<()> {
    let hints = extract_hints(text);

    let params = if offline {
        ParameterInferencer::offline(settings.defaults.clone())
            .infer_parameters(text)
            .await
    } else {
        let orchestrator = Orchestrator::new(settings)?;
        let spinner = Output::spinner("Inferring parameters...");
        let params = orchestrator.infer_parameters(text).await;
        spinner.finish_and_clear();
        params
    };

    Output::header("Explicit hints");
    if hints.is_empty() {
        Output::info("No explicit hints found in the text.");
    } else {
        println!("{}", serde_json::to_string_pretty(&hints)?);
    }

    Output::header("Resolved parameters");
    Output::kv("Topic", &content_preview(&params.topic, 120));
    Output::kv("Slides", &params.slide_count.to_string());
    Output::kv("Model", &params.model);
    Output::kv("Template", &params.template);
    Output::kv("Language", &params.language);
    Output::kv("Images on each slide", &params.image_for_each_slide.to_string());
    Output::kv("Image source", &params.image_source);

    Ok(())
}
