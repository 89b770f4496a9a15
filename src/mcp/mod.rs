//! MCP (Model Context Protocol) server for Pensum.
//!
//! Exposes the course tools to MCP clients.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;

pub use server::McpServer;
