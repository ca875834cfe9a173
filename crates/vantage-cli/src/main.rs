//! Vantage CLI - AI initiative portfolio tracker
//!
//! Usage:
//!   vantage init                       Initialize database
//!   vantage seed --file data.yaml      Seed sample portfolio data
//!   vantage status                     Portfolio summary with health score
//!   vantage report executive           Generate an executive summary

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Seed { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_seed(&db, &file)
        }
        Commands::Reset { yes } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_reset(&db, yes)
        }
        Commands::Projects { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(ProjectsAction::List) => commands::cmd_projects_list(&db),
                Some(ProjectsAction::Show { id }) => commands::cmd_projects_show(&db, id),
            }
        }
        Commands::Status => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_status(&db, &config)
        }
        Commands::Health => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_health(&db, &config)
        }
        Commands::Roi => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_roi(&db, &config)
        }
        Commands::Trends => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_trends(&db, &config)
        }
        Commands::Variance { by } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_variance(&db, &by)
        }
        Commands::Report {
            kind,
            format,
            output,
        } => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_report(&db, &config, &kind, &format, output.as_deref())
        }
    }
}
