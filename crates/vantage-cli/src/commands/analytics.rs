//! Health, ROI, trend, and variance command implementations

use anyhow::Result;
use chrono::Utc;
use vantage_core::{
    analytics::{health, roi, trend, variance, PortfolioSnapshot},
    db::Database,
    AnalyticsConfig,
};

use super::truncate;

pub fn cmd_health(db: &Database, config: &AnalyticsConfig) -> Result<()> {
    let snapshot = PortfolioSnapshot::load(db, Utc::now().date_naive())?;

    println!();
    println!("💚 Portfolio Health");
    println!("   ─────────────────────────────────────────────────────────────");

    match health::score_portfolio(&snapshot, config) {
        health::PortfolioHealth::Scored {
            score,
            label,
            projects,
        } => {
            println!(
                "   {:25} │ {:>5} │ {:>6} │ {:>6} │ {:>6} │ {:>6}",
                "Project", "Score", "Status", "Risk", "Budget", "KPI"
            );
            println!("   ──────────────────────────┼───────┼────────┼────────┼────────┼───────");
            for p in &projects {
                println!(
                    "   {:25} │ {:>5} │ {:>6.1} │ {:>6.1} │ {:>6.1} │ {:>6.1}",
                    truncate(&p.project_name, 25),
                    p.score,
                    p.dimensions.status,
                    p.dimensions.risk,
                    p.dimensions.budget,
                    p.dimensions.kpi
                );
            }
            println!();
            println!("   Portfolio: {}/100 ({})", score, label);
        }
        health::PortfolioHealth::InsufficientData => {
            println!("   No projects recorded; nothing to score.");
        }
    }

    Ok(())
}

pub fn cmd_roi(db: &Database, config: &AnalyticsConfig) -> Result<()> {
    let snapshot = PortfolioSnapshot::load(db, Utc::now().date_naive())?;
    let results = roi::compute_portfolio_roi(&snapshot, config);

    println!();
    println!("💰 Return on Investment");
    println!("   ─────────────────────────────────────────────────────────────");

    if results.is_empty() {
        println!("   No projects recorded.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:>12} │ {:>12} │ {:>10}",
        "Project", "Investment", "Value", "ROI"
    );
    println!("   ──────────────────────────┼──────────────┼──────────────┼───────────");

    for r in &results {
        match &r.outcome {
            roi::RoiOutcome::Defined(result) => {
                let payback = match result.payback_months {
                    Some(m) => format!(" (payback {:.1} mo)", m),
                    None => String::new(),
                };
                println!(
                    "   {:25} │ {:>12.2} │ {:>12.2} │ {:>+9.1}%{}",
                    truncate(&r.project_name, 25),
                    result.total_cost,
                    result.value_generated,
                    result.ratio * 100.0,
                    payback
                );
            }
            roi::RoiOutcome::Undefined { reason } => {
                println!(
                    "   {:25} │ {:>12} │ {:>12} │ undefined ({})",
                    truncate(&r.project_name, 25),
                    "-",
                    "-",
                    reason.explanation()
                );
            }
        }
    }

    Ok(())
}

pub fn cmd_trends(db: &Database, config: &AnalyticsConfig) -> Result<()> {
    let snapshot = PortfolioSnapshot::load(db, Utc::now().date_naive())?;
    let analyses = trend::analyze_all(&snapshot, config);

    println!();
    println!("📈 KPI Trends");
    println!("   ─────────────────────────────────────────────────────────────");

    if analyses.is_empty() {
        println!("   No KPI observations recorded.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:25} │ {:>17} │ {:>8} │ {:>4}",
        "Project", "Metric", "Trend", "Delta", "Obs"
    );
    println!("   ──────────────────────────┼───────────────────────────┼───────────────────┼──────────┼─────");

    for a in &analyses {
        println!(
            "   {:25} │ {:25} │ {:>17} │ {:>+8.2} │ {:>4}",
            truncate(&snapshot.project_name(a.project_id), 25),
            truncate(&a.metric_name, 25),
            a.direction.as_str(),
            a.delta,
            a.observations
        );
    }

    let summary = trend::summarize(&analyses);
    println!();
    println!(
        "   {} improving, {} stable, {} declining, {} with insufficient data",
        summary.improving, summary.stable, summary.declining, summary.insufficient
    );

    Ok(())
}

pub fn cmd_variance(db: &Database, by: &str) -> Result<()> {
    let grouping = match by.to_lowercase().as_str() {
        "project" => variance::VarianceGrouping::ByProject,
        "category" => variance::VarianceGrouping::ByCategory,
        _ => anyhow::bail!("Unknown grouping: {} (valid: project, category)", by),
    };

    let snapshot = PortfolioSnapshot::load(db, Utc::now().date_naive())?;
    let report = variance::analyze(&snapshot, grouping);

    println!();
    println!("💸 Budget Variance ({})", report.grouping.as_str());
    println!("   ─────────────────────────────────────────────────────────────");

    if report.groups.is_empty() {
        println!("   No budget entries recorded.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:>12} │ {:>12} │ {:>12} │ {:>8} │ {:8}",
        "Group", "Planned", "Actual", "Variance", "Var %", "Standing"
    );
    println!("   ──────────────────────────┼──────────────┼──────────────┼──────────────┼──────────┼─────────");

    let mut rows: Vec<&variance::VarianceSummary> = report.groups.iter().collect();
    rows.push(&report.totals);
    for g in rows {
        let pct = match g.percentage {
            Some(p) => format!("{:+.1}%", p),
            None => "n/a".to_string(),
        };
        println!(
            "   {:25} │ {:>12.2} │ {:>12.2} │ {:>+12.2} │ {:>8} │ {:8}",
            truncate(&g.key, 25),
            g.planned,
            g.actual,
            g.variance,
            pct,
            g.standing.label()
        );
    }

    Ok(())
}
