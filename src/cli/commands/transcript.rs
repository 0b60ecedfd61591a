//! Transcript command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Fetch a YouTube transcript and print it to stdout.
pub async fn run_transcript(url: &str, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let outcome = orchestrator.fetch_transcript(url).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(transcript) => {
            println!("{}", transcript);
            Ok(())
        }
        Err(e) => {
            Output::error(&e.to_string());
            Err(e.into())
        }
    }
}
