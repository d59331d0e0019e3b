//! MCP command implementation.

use crate::config::Settings;
use crate::mcp::McpServer;
use anyhow::Result;

/// Run the MCP server on stdio until the client disconnects.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    let server = McpServer::new(&settings)?;
    server.run().await
}
