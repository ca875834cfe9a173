//! Portfolio summary command

use anyhow::Result;
use chrono::Utc;
use vantage_core::{
    analytics::{health, PortfolioSnapshot},
    db::Database,
    AnalyticsConfig,
};

pub fn cmd_status(db: &Database, config: &AnalyticsConfig) -> Result<()> {
    let snapshot = PortfolioSnapshot::load(db, Utc::now().date_naive())?;
    let stats = snapshot.stats();

    println!();
    println!("📊 Portfolio Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Projects:       {} ({} active)", stats.total_projects, stats.active_projects);

    let counts = db.get_project_count_by_status()?;
    for (status, count) in counts {
        println!("     {:12} {}", format!("{}:", status), count);
    }

    println!("   KPIs tracked:   {}", stats.kpis_tracked);
    println!("   Open risks:     {}", stats.open_risks);

    let totals = db.get_budget_totals()?;
    println!(
        "   Budget:         {:.2} planned / {:.2} actual ({:+.2})",
        totals.total_planned, totals.total_actual, totals.total_variance
    );

    println!();
    match health::score_portfolio(&snapshot, config) {
        health::PortfolioHealth::Scored { score, label, .. } => {
            println!("   Health score:   {}/100 ({})", score, label);
        }
        health::PortfolioHealth::InsufficientData => {
            println!("   Health score:   unavailable (no projects recorded)");
        }
    }

    Ok(())
}
