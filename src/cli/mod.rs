//! CLI module for MagicSlides.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// MagicSlides MCP - slide decks from text or YouTube videos
///
/// Runs as an MCP tool server by default; the other subcommands drive the
/// same pipeline from the terminal.
#[derive(Parser, Debug)]
#[command(name = "magicslides")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// API key for the generation service
    #[arg(long, env = "MAGICSLIDES_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server for AI assistant integration (default)
    Mcp,

    /// Generate a presentation from text or a YouTube URL
    Create {
        /// Topic text or YouTube URL
        input: String,

        /// MagicSlides account ID
        #[arg(short, long, env = "MAGICSLIDES_ACCOUNT_ID")]
        account: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the transcript of a YouTube video
    Transcript {
        /// YouTube video URL
        url: String,
    },

    /// Show the generation parameters resolved for a piece of text
    Params {
        /// Topic text
        text: String,

        /// Use explicit hints and defaults only (skip the inference service)
        #[arg(long)]
        offline: bool,
    },

    /// Check configuration and credentials
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "defaults.template")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["magicslides"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "magicslides",
            "-vv",
            "create",
            "5 slides about owls",
            "--account",
            "acc-1",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Create { input, account, json }) => {
                assert_eq!(input, "5 slides about owls");
                assert_eq!(account, "acc-1");
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
