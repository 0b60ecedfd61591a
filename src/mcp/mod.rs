//! MCP (Model Context Protocol) server for MagicSlides.
//!
//! Exposes `create_ppt_from_text` and `get_youtube_transcript` to AI assistants.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
