//! MCP (Model Context Protocol) server for Tubecap.
//!
//! Exposes read-only YouTube tools (videos, transcripts, channels and
//! playlists) to AI assistants. Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;
