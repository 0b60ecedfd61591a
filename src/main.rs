//! MagicSlides CLI entry point.

use anyhow::Result;
use clap::Parser;
use magicslides::cli::{commands, Cli, Commands};
use magicslides::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?.with_api_key(cli.api_key.clone());

    // Initialize logging (stderr only: stdout carries the JSON-RPC stream)
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("magicslides={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command.unwrap_or(Commands::Mcp) {
        Commands::Mcp => {
            commands::run_mcp(settings).await?;
        }

        Commands::Create { input, account, json } => {
            commands::run_create(&input, &account, json, settings).await?;
        }

        Commands::Transcript { url } => {
            commands::run_transcript(&url, settings).await?;
        }

        Commands::Params { text, offline } => {
            commands::run_params(&text, offline, settings).await?;
        }

        Commands::Doctor => {
            let path = config_path.unwrap_or_else(Settings::default_config_path);
            commands::run_doctor(&settings, &path)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings, config_path)?;
        }
    }

    Ok(())
}
