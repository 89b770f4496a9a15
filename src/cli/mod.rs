//! CLI module for Pensum.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Pensum - course-content tools for LLM assistants
///
/// Runs the course search and outline tools against a course library,
/// directly or as an MCP/HTTP tool host.
/// The name "Pensum" is the Norwegian word for "syllabus."
#[derive(Parser, Debug)]
#[command(name = "pensum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PENSUM_CONFIG")]
    pub config: Option<String>,

    /// Path to the course library (overrides the configured one)
    #[arg(long, global = true, env = "PENSUM_LIBRARY")]
    pub library: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tool definitions advertised to the model
    Tools,

    /// Search course content
    Search {
        /// What to search for
        query: String,

        /// Course title (partial matches work)
        #[arg(long)]
        course: Option<String>,

        /// Lesson number to search within
        #[arg(long)]
        lesson: Option<i64>,
    },

    /// Show a course outline
    Outline {
        /// Course title (partial matches work)
        course: String,
    },

    /// Call any registered tool by name
    Call {
        /// Tool name
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// List catalog courses
    Courses,

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start MCP server for AI assistant integration
    Mcp,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}
