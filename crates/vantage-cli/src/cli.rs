//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vantage - Track and score a portfolio of AI initiatives
#[derive(Parser)]
#[command(name = "vantage")]
#[command(about = "AI initiative portfolio tracker and analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "vantage.db", global = true)]
    pub db: PathBuf,

    /// Analytics configuration file (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Seed the database from a YAML file
    Seed {
        /// YAML file with projects, KPIs, budgets, and risks
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Clear all portfolio data from the database
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List or inspect projects
    Projects {
        #[command(subcommand)]
        action: Option<ProjectsAction>,
    },

    /// Show portfolio summary (counts, budget totals, health score)
    Status,

    /// Show per-project health scores and dimensions
    Health,

    /// Show return on investment per project
    Roi,

    /// Show KPI trend classification per metric
    Trends,

    /// Show budget variance analysis
    Variance {
        /// Grouping: project or category
        #[arg(short, long, default_value = "project")]
        by: String,
    },

    /// Generate a report
    Report {
        /// Report kind: overview, budget, risks, executive
        kind: String,

        /// Output format: markdown, html, or json
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProjectsAction {
    /// List all projects
    List,

    /// Show one project with its KPIs, budgets, and risks
    Show {
        /// Project id
        id: i64,
    },
}
