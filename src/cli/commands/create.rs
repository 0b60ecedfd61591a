//! Create command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the full generation pipeline from the terminal.
pub async fn run_create(input: &str, account: &str, json: bool, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Generating presentation...");
    let outcome = orchestrator.create_presentation(input, account).await;
    spinner.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            Output::error(&e.to_string());
            if let Some(url) = e.upgrade_url() {
                Output::info(&format!("See plans at {}", url));
            }
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    Output::success("Presentation created!");
    if let Some(url) = &result.presentation_url {
        Output::kv("Presentation", url);
    }
    if let Some(url) = &result.pdf_url {
        Output::kv("PDF", url);
    }
    if let Some(id) = &result.presentation_id {
        Output::kv("ID", id);
    }
    if let Some(count) = result.slide_count {
        Output::kv("Slides", &count.to_string());
    }

    Ok(())
}
