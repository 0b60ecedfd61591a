//! MagicSlides MCP - slide decks from text or YouTube videos
//!
//! A tool server that lets an AI agent turn free-form text, or a YouTube video
//! URL, into a generated slide deck.
//!
//! # Overview
//!
//! One call to [`orchestrator::Orchestrator::create_presentation`]:
//! - resolves the caller's plan and rejects plans that may not generate decks
//! - replaces a YouTube URL with the video's transcript
//! - infers slide count, model, template and image settings; explicit hints in
//!   the text win over the inference service, and defaults cover the rest
//! - submits one generation request and validates the response
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `source` - YouTube URL detection and transcript retrieval
//! - `account` - Entitlement (email/plan) lookup
//! - `params` - Hint extraction, parameter inference and merging
//! - `generation` - Generation request payload and response validation
//! - `orchestrator` - Pipeline coordination
//! - `mcp` - MCP stdio server exposing the two tools
//!
//! # Example
//!
//! ```rust,no_run
//! use magicslides::config::Settings;
//! use magicslides::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?.with_api_key(std::env::var("MAGICSLIDES_API_KEY").ok());
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let result = orchestrator
//!         .create_presentation("8 slides about volcanoes with images", "my-account-id")
//!         .await?;
//!     println!("{:?}", result.presentation_url);
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod http;
pub mod mcp;
pub mod orchestrator;
pub mod params;
pub mod source;

pub use error::{Result, SlidesError};
