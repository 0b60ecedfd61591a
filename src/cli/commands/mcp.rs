//! MCP command implementation.

use crate::config::{CredentialStatus, Settings};
use crate::mcp::McpServer;
use anyhow::Result;
use tracing::warn;

/// Run the MCP server.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    if settings.credential_status() == CredentialStatus::Missing {
        warn!("MAGICSLIDES_API_KEY is not set; create_ppt_from_text will fail until it is configured");
    }

    let server = McpServer::new(settings)?;
    server.run().await
}
