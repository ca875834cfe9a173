//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `load_config` - Shared utilities
//! - `cmd_init` - Initialize the database
//! - `cmd_seed` - Seed portfolio data from YAML
//! - `cmd_reset` - Clear all portfolio data

use std::path::Path;

use anyhow::{Context, Result};
use vantage_core::{db::Database, seed::seed_from_yaml, AnalyticsConfig};

/// Open the database, creating it (and its schema) if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path.to_str().context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Load the analytics config, validating weights and thresholds
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load analytics config")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Seed sample data: vantage seed --file data/sample_projects.yaml");
    println!("  2. Check the portfolio: vantage status");

    Ok(())
}

pub fn cmd_seed(db: &Database, file: &Path) -> Result<()> {
    println!("🌱 Seeding from {}...", file.display());

    let stats = seed_from_yaml(db, file).context("Failed to seed database")?;

    println!(
        "✅ Seeded {} project(s), {} KPI(s), {} budget entr(ies), {} risk(s)",
        stats.projects, stats.kpis, stats.budgets, stats.risks
    );

    Ok(())
}

pub fn cmd_reset(db: &Database, yes: bool) -> Result<()> {
    use std::io::{self, Write};

    if !yes {
        print!("⚠️  This will delete all projects, KPIs, budgets, and risks.\n\n");
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    db.reset()?;

    println!("✅ Database reset complete.");
    Ok(())
}
