//! Pensum CLI entry point.

use anyhow::Result;
use clap::Parser;
use pensum::cli::{commands, Cli, Commands};
use pensum::config::Settings;
use pensum::session::CourseSession;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let mut settings = Settings::load_from(config_path.as_ref())?;
    if let Some(library) = &cli.library {
        settings.store.library_path = library.clone();
    }

    // Initialize logging; stderr keeps the MCP stdio channel clean
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pensum={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Config { action } => {
            commands::run_config(action, &settings, config_path.as_ref())?;
        }

        Commands::Tools => {
            let session = CourseSession::from_settings(&settings)?;
            commands::run_tools(&session)?;
        }

        Commands::Search {
            query,
            course,
            lesson,
        } => {
            let mut session = CourseSession::from_settings(&settings)?;
            commands::run_search(query, course.clone(), *lesson, &mut session).await?;
        }

        Commands::Outline { course } => {
            let mut session = CourseSession::from_settings(&settings)?;
            commands::run_outline(course, &mut session).await?;
        }

        Commands::Call { name, args } => {
            let mut session = CourseSession::from_settings(&settings)?;
            commands::run_call(name, args, &mut session).await?;
        }

        Commands::Courses => {
            let session = CourseSession::from_settings(&settings)?;
            commands::run_courses(&session).await?;
        }

        Commands::Serve { host, port } => {
            let session = CourseSession::from_settings(&settings)?;
            let host = host.clone().unwrap_or_else(|| settings.server.host.clone());
            let port = port.unwrap_or(settings.server.port);
            commands::run_serve(&host, port, session).await?;
        }

        Commands::Mcp => {
            let session = CourseSession::from_settings(&settings)?;
            commands::run_mcp(session).await?;
        }
    }

    Ok(())
}
