//! MCP command implementation.

use crate::mcp::McpServer;
use crate::session::CourseSession;
use anyhow::Result;

/// Run the MCP server.
pub async fn run_mcp(session: CourseSession) -> Result<()> {
    let mut server = McpServer::new(session);
    server.run().await
}
