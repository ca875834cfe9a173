//! Report generation command

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use vantage_core::{
    analytics::PortfolioSnapshot,
    db::Database,
    report::{self, html, markdown, ReportKind},
    AnalyticsConfig,
};

pub fn cmd_report(
    db: &Database,
    config: &AnalyticsConfig,
    kind: &str,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let kind: ReportKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let snapshot = PortfolioSnapshot::load(db, Utc::now().date_naive())?;
    let doc = report::build(kind, &snapshot, config);

    let rendered = match format.to_lowercase().as_str() {
        "markdown" | "md" => markdown::render(&doc),
        "html" => html::render(&doc),
        // The raw document model, for downstream tooling
        "json" => {
            let mut out = serde_json::to_string_pretty(&doc)?;
            out.push('\n');
            out
        }
        _ => anyhow::bail!("Unknown format: {} (valid: markdown, html, json)", format),
    };
    tracing::debug!(kind = %kind, format = format, bytes = rendered.len(), "Report rendered");

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Wrote {} report to {}", kind, path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
