//! CLI command implementations.

mod call;
mod config;
mod courses;
mod mcp;
mod serve;
mod tools;

pub use call::{run_call, run_outline, run_search};
pub use config::run_config;
pub use courses::run_courses;
pub use mcp::run_mcp;
pub use serve::{router, run_serve};
pub use tools::run_tools;
