//! CLI command implementations.

mod config;
mod create;
mod doctor;
mod mcp;
mod params;
mod transcript;

pub use config::run_config;
pub use create::run_create;
pub use doctor::run_doctor;
pub use mcp::run_mcp;
pub use params::run_params;
pub use transcript::run_transcript;
