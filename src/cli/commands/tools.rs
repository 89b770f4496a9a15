//! Tools command implementation.

use crate::session::CourseSession;
use anyhow::Result;

/// Print tool definitions as JSON.
pub fn run_tools(session: &CourseSession) -> Result<()> {
    let definitions = session.tool_definitions();
    println!("{}", serde_json::to_string_pretty(&definitions)?);
    Ok(())
}
