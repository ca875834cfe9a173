//! Report generation
//!
//! Composes analytics outputs into four report kinds over one shared
//! `Document` model. Rendering (markdown or HTML) is a separate, stateless
//! step - computation never happens per format.
//!
//! Reports are idempotent: the same snapshot and config produce byte-identical
//! output. Generation headers use the snapshot's `as_of` date, not the clock.

pub mod document;
pub mod html;
pub mod markdown;

use crate::analytics::{health, risk, roi, trend, variance, PortfolioSnapshot};
use crate::config::AnalyticsConfig;
use crate::models::{Priority, ProjectStatus};

use document::{Document, Section, Table};

/// The four report kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    PortfolioOverview,
    BudgetVariance,
    RiskRegister,
    ExecutiveSummary,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PortfolioOverview => "overview",
            Self::BudgetVariance => "budget",
            Self::RiskRegister => "risks",
            Self::ExecutiveSummary => "executive",
        }
    }

    pub fn all() -> &'static [ReportKind] {
        &[
            Self::PortfolioOverview,
            Self::BudgetVariance,
            Self::RiskRegister,
            Self::ExecutiveSummary,
        ]
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overview" => Ok(Self::PortfolioOverview),
            "budget" => Ok(Self::BudgetVariance),
            "risks" => Ok(Self::RiskRegister),
            "executive" => Ok(Self::ExecutiveSummary),
            _ => Err(format!(
                "Unknown report kind: {} (valid: overview, budget, risks, executive)",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the document for a report kind
pub fn build(kind: ReportKind, snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Document {
    match kind {
        ReportKind::PortfolioOverview => portfolio_overview(snapshot, config),
        ReportKind::BudgetVariance => budget_variance(snapshot),
        ReportKind::RiskRegister => risk_register(snapshot),
        ReportKind::ExecutiveSummary => executive_summary(snapshot, config),
    }
}

// ── Formatting helpers ────────────────────────────────────────

/// Format a currency amount with thousands separators: $1,234.56
pub(crate) fn fmt_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let dollars = cents / 100;
    let rem = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, rem)
}

/// Format a variance amount with an explicit sign: +$2,000.00
fn fmt_money_signed(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", fmt_money(amount))
    } else {
        fmt_money(amount)
    }
}

/// Format an optional percentage, showing undefined values explicitly
fn fmt_pct(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{:+.1}%", p),
        None => "n/a".to_string(),
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ── Portfolio Overview ────────────────────────────────────────

fn portfolio_overview(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Document {
    let mut doc = Document::new("AI Portfolio Overview Report")
        .subtitle_line(format!("Generated: {}", snapshot.as_of));

    // Health score breakdown
    let mut section = Section::new("Health Score");
    match health::score_portfolio(snapshot, config) {
        health::PortfolioHealth::Scored {
            score,
            label,
            projects,
        } => {
            section = section.paragraph(format!(
                "Overall portfolio health: {}/100 ({})",
                score, label
            ));
            let mut table = Table::new(&["Project", "Score", "Status", "Risk", "Budget", "KPI"]);
            for p in &projects {
                table.row(vec![
                    p.project_name.clone(),
                    format!("{}", p.score),
                    format!("{:.1}", p.dimensions.status),
                    format!("{:.1}", p.dimensions.risk),
                    format!("{:.1}", p.dimensions.budget),
                    format!("{:.1}", p.dimensions.kpi),
                ]);
            }
            section = section.table(table);
        }
        health::PortfolioHealth::InsufficientData => {
            section = section.note("No projects recorded; the health score is unavailable.");
        }
    }
    doc = doc.section(section);

    // Project listing, highest priority first
    let mut section = Section::new("Projects");
    if snapshot.projects.is_empty() {
        section = section.note("No projects recorded.");
    } else {
        let mut projects: Vec<_> = snapshot.projects.iter().collect();
        projects.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then_with(|| a.name.cmp(&b.name))
        });
        let mut table = Table::new(&["Project", "Status", "Priority", "Owner", "Department"]);
        for p in projects {
            table.row(vec![
                p.name.clone(),
                title_case(p.status.as_str()),
                title_case(p.priority.as_str()),
                p.owner.clone(),
                p.department.clone(),
            ]);
        }
        section = section.table(table);
    }
    doc = doc.section(section);

    // Quick stats
    let stats = snapshot.stats();
    doc.section(Section::new("Quick Stats").bullets(vec![
        format!("Total Projects: {}", stats.total_projects),
        format!("Active Projects: {}", stats.active_projects),
        format!(
            "Total Budget: {} planned / {} actual",
            fmt_money(stats.total_planned),
            fmt_money(stats.total_actual)
        ),
        format!("Open Risks: {}", stats.open_risks),
        format!("KPIs Tracked: {}", stats.kpis_tracked),
    ]))
}

// ── Budget Variance ───────────────────────────────────────────

fn variance_table(groups: &[variance::VarianceSummary], key_header: &str) -> Table {
    let mut table = Table::new(&[key_header, "Planned", "Actual", "Variance", "Variance %", "Standing"]);
    for g in groups {
        table.row(vec![
            g.key.clone(),
            fmt_money(g.planned),
            fmt_money(g.actual),
            fmt_money_signed(g.variance),
            fmt_pct(g.percentage),
            g.standing.label().to_string(),
        ]);
    }
    table
}

fn budget_variance(snapshot: &PortfolioSnapshot) -> Document {
    let doc = Document::new("Budget Variance Report")
        .subtitle_line(format!("Generated: {}", snapshot.as_of));

    if snapshot.budgets.is_empty() {
        return doc.section(Section::new("Overall Summary").note("No budget data available."));
    }

    let by_project = variance::analyze(snapshot, variance::VarianceGrouping::ByProject);
    let by_category = variance::analyze(snapshot, variance::VarianceGrouping::ByCategory);

    let totals = &by_project.totals;
    let mut summary = Table::new(&["Metric", "Amount"]);
    summary.row(vec!["Total Planned".to_string(), fmt_money(totals.planned)]);
    summary.row(vec!["Total Actual".to_string(), fmt_money(totals.actual)]);
    summary.row(vec![
        "Variance".to_string(),
        format!(
            "{} ({})",
            fmt_money_signed(totals.variance),
            fmt_pct(totals.percentage)
        ),
    ]);

    doc.section(Section::new("Overall Summary").table(summary))
        .section(Section::new("By Project").table(variance_table(&by_project.groups, "Project")))
        .section(Section::new("By Category").table(variance_table(&by_category.groups, "Category")))
}

// ── Risk Register ─────────────────────────────────────────────

fn risk_register(snapshot: &PortfolioSnapshot) -> Document {
    let doc = Document::new("Risk Register Report")
        .subtitle_line(format!("Generated: {}", snapshot.as_of));

    if snapshot.risks.is_empty() {
        return doc.section(Section::new("Summary").note("No risks recorded."));
    }

    let profile = risk::profile(&snapshot.risks);
    let mut bullets = vec![
        format!("Total Risks: {}", profile.total),
        format!("Open: {}", profile.open),
        format!("Mitigating: {}", profile.mitigating),
        format!("Resolved: {}", profile.resolved),
    ];
    if profile.critical_open > 0 {
        bullets.push(format!(
            "Critical risks requiring immediate attention: {}",
            profile.critical_open
        ));
    }

    // Probability x impact matrix of active risks
    let matrix = risk::risk_matrix(&snapshot.risks);
    let mut matrix_table = Table::new(&["", "Impact 1", "Impact 2", "Impact 3", "Impact 4", "Impact 5"]);
    for probability in (1..=5u8).rev() {
        let mut row = vec![format!("P{}", probability)];
        for impact in 1..=5u8 {
            let count = matrix.count(probability, impact);
            row.push(if count > 0 {
                count.to_string()
            } else {
                "-".to_string()
            });
        }
        matrix_table.row(row);
    }

    let mut details = Table::new(&["Project", "Risk", "P", "I", "Score", "Level", "Status", "Mitigation"]);
    for r in risk::register_order(&snapshot.risks) {
        details.row(vec![
            snapshot.project_name(r.project_id),
            truncate(&r.description, 40),
            r.probability.to_string(),
            r.impact.to_string(),
            r.score().to_string(),
            title_case(r.level().as_str()),
            title_case(r.status.as_str()),
            truncate(&r.mitigation, 50),
        ]);
    }

    doc.section(Section::new("Summary").bullets(bullets))
        .section(Section::new("Risk Matrix (Probability x Impact)").table(matrix_table))
        .section(Section::new("Risk Details").table(details))
}

// ── Executive Summary ─────────────────────────────────────────

fn executive_summary(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Document {
    let mut doc = Document::new("Executive Summary - AI Portfolio")
        .subtitle_line(format!("Generated: {}", snapshot.as_of))
        .subtitle_line(format!(
            "Report Period: {}",
            snapshot.as_of.format("%B %Y")
        ));

    let portfolio_health = health::score_portfolio(snapshot, config);

    // Overview narrative
    let mut section = Section::new("Portfolio Overview");
    match &portfolio_health {
        health::PortfolioHealth::Scored {
            score,
            label,
            projects,
        } => {
            let stats = snapshot.stats();
            section = section.paragraph(format!(
                "The AI portfolio consists of {} projects, of which {} are actively \
                 in development, testing, or production. The overall portfolio health \
                 score is {}/100 ({}).",
                stats.total_projects, stats.active_projects, score, label
            ));

            let n = projects.len() as f64;
            let avg_status = projects.iter().map(|p| p.dimensions.status).sum::<f64>() / n;
            let avg_risk = projects.iter().map(|p| p.dimensions.risk).sum::<f64>() / n;
            let avg_budget = projects.iter().map(|p| p.dimensions.budget).sum::<f64>() / n;
            let avg_kpi = projects.iter().map(|p| p.dimensions.kpi).sum::<f64>() / n;
            section = section.bullets(vec![
                format!(
                    "Status ({:.1}): {}",
                    avg_status,
                    health::status_commentary(avg_status)
                ),
                format!("Risk ({:.1}): {}", avg_risk, health::risk_commentary(avg_risk)),
                format!(
                    "Budget ({:.1}): {}",
                    avg_budget,
                    health::budget_commentary(avg_budget)
                ),
                format!("KPI ({:.1}): {}", avg_kpi, health::kpi_commentary(avg_kpi)),
            ]);
        }
        health::PortfolioHealth::InsufficientData => {
            section = section.note("No projects recorded; portfolio metrics are unavailable.");
        }
    }
    doc = doc.section(section);

    doc = doc.section(status_distribution_section(snapshot));
    doc = doc.section(budget_summary_section(snapshot));
    doc = doc.section(kpi_performance_section(snapshot, config));
    doc = doc.section(risk_profile_section(snapshot));
    doc = doc.section(roi_section(snapshot, config));
    doc.section(recommendations_section(snapshot, config, &portfolio_health))
}

fn status_distribution_section(snapshot: &PortfolioSnapshot) -> Section {
    let mut section = Section::new("Project Status Distribution");
    if snapshot.projects.is_empty() {
        return section.note("No projects recorded.");
    }

    let mut bullets = Vec::new();
    for status in ProjectStatus::all() {
        let count = snapshot
            .projects
            .iter()
            .filter(|p| p.status == *status)
            .count();
        if count > 0 {
            bullets.push(format!("{}: {} project(s)", title_case(status.as_str()), count));
        }
    }
    section = section.bullets(bullets);

    let critical: Vec<&str> = snapshot
        .projects
        .iter()
        .filter(|p| p.priority == Priority::Critical)
        .map(|p| p.name.as_str())
        .collect();
    if !critical.is_empty() {
        section = section.paragraph(format!(
            "Critical priority projects: {}",
            critical.join(", ")
        ));
    }
    section
}

fn budget_summary_section(snapshot: &PortfolioSnapshot) -> Section {
    let section = Section::new("Budget Summary");
    if snapshot.budgets.is_empty() {
        return section.note("No budget data available.");
    }

    let totals = variance::analyze(snapshot, variance::VarianceGrouping::ByProject).totals;
    let standing = if totals.variance <= 0.0 {
        "under budget"
    } else {
        "over budget"
    };
    section.bullets(vec![
        format!("Total Planned: {}", fmt_money(totals.planned)),
        format!("Total Actual: {}", fmt_money(totals.actual)),
        format!(
            "Variance: {} ({} {})",
            fmt_money(totals.variance.abs()),
            match totals.percentage {
                Some(p) => format!("{:.1}%", p.abs()),
                None => "n/a".to_string(),
            },
            standing
        ),
    ])
}

fn kpi_performance_section(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Section {
    let mut section = Section::new("KPI Performance");
    let latest = trend::latest_observations(snapshot);
    if latest.is_empty() {
        return section.note("No KPI data available.");
    }

    let on_target = latest.iter().filter(|k| k.is_on_target()).count();
    let rates: Vec<f64> = latest.iter().filter_map(|k| k.achievement_rate()).collect();
    let avg_achievement = if rates.is_empty() {
        None
    } else {
        Some(rates.iter().sum::<f64>() / rates.len() as f64)
    };

    let analyses = trend::analyze_all(snapshot, config);
    let trends = trend::summarize(&analyses);

    let mut bullets = vec![
        format!("Metrics tracked: {}", latest.len()),
        format!(
            "On target: {}/{} ({:.0}%)",
            on_target,
            latest.len(),
            (on_target as f64 / latest.len() as f64) * 100.0
        ),
        match avg_achievement {
            Some(avg) => format!("Average achievement: {:.1}%", avg),
            None => "Average achievement: n/a (no targets set)".to_string(),
        },
        format!(
            "Trends: {} improving, {} stable, {} declining",
            trends.improving, trends.stable, trends.declining
        ),
    ];
    if trends.insufficient > 0 {
        bullets.push(format!(
            "{} metric(s) have too few observations for trend analysis",
            trends.insufficient
        ));
    }
    section = section.bullets(bullets);

    let top = trend::top_performers(snapshot, 1);
    if let Some(best) = top.first() {
        if let Some(rate) = best.achievement_rate() {
            section = section.paragraph(format!(
                "Top performer: {} ({}) at {:.1}% of target.",
                best.metric_name,
                snapshot.project_name(best.project_id),
                rate
            ));
        }
    }

    let underperforming = trend::underperforming_kpis(snapshot, config);
    if !underperforming.is_empty() {
        section = section.paragraph(format!(
            "Attention needed: {} KPI(s) below {:.0}% of target.",
            underperforming.len(),
            config.underperformance_threshold
        ));
    }
    section
}

fn risk_profile_section(snapshot: &PortfolioSnapshot) -> Section {
    let section = Section::new("Risk Profile");
    if snapshot.risks.is_empty() {
        return section.note("No risks recorded.");
    }

    let profile = risk::profile(&snapshot.risks);
    let mut section = section.bullets(vec![
        format!("Open risks: {}", profile.open),
        format!("Being mitigated: {}", profile.mitigating),
        format!("Resolved: {}", profile.resolved),
    ]);
    if profile.critical_open > 0 {
        section = section.paragraph(format!(
            "Critical risks ({}) require immediate attention.",
            profile.critical_open
        ));
    }
    section
}

fn roi_section(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Section {
    let section = Section::new("Return on Investment");
    if snapshot.projects.is_empty() {
        return section.note("No projects recorded.");
    }

    let results = roi::compute_portfolio_roi(snapshot, config);
    let mut table = Table::new(&["Project", "Investment", "Value Generated", "ROI"]);
    for r in &results {
        match &r.outcome {
            roi::RoiOutcome::Defined(result) => table.row(vec![
                r.project_name.clone(),
                fmt_money(result.total_cost),
                fmt_money(result.value_generated),
                format!("{:+.1}%", result.ratio * 100.0),
            ]),
            roi::RoiOutcome::Undefined { reason } => table.row(vec![
                r.project_name.clone(),
                "-".to_string(),
                "-".to_string(),
                format!("undefined ({})", reason.explanation()),
            ]),
        }
    }
    section.table(table)
}

/// Minimum variance percentage that flags a project for budget review
const OVERRUN_FLAG_PCT: f64 = 20.0;
/// Dimension score below which a recommendation fires
const DIMENSION_ATTENTION_THRESHOLD: f64 = 70.0;
/// Share of planning-stage projects that flags a slow pipeline
const PLANNING_HEAVY_SHARE: f64 = 0.4;

fn recommendations_section(
    snapshot: &PortfolioSnapshot,
    config: &AnalyticsConfig,
    portfolio_health: &health::PortfolioHealth,
) -> Section {
    let mut recs: Vec<String> = Vec::new();

    // Projects over planned budget beyond the flag threshold
    let by_project = variance::analyze(snapshot, variance::VarianceGrouping::ByProject);
    let overruns: Vec<&str> = by_project
        .groups
        .iter()
        .filter(|g| g.percentage.map(|p| p > OVERRUN_FLAG_PCT).unwrap_or(false))
        .map(|g| g.key.as_str())
        .collect();
    if !overruns.is_empty() {
        recs.push(format!(
            "Budget Review: {} project(s) are over planned budget by more than {:.0}% \
             ({}). Conduct an immediate review and implement cost controls.",
            overruns.len(),
            OVERRUN_FLAG_PCT,
            overruns.join(", ")
        ));
    }

    // Low portfolio-average dimensions
    if let health::PortfolioHealth::Scored { projects, .. } = portfolio_health {
        let n = projects.len() as f64;
        let avg_budget = projects.iter().map(|p| p.dimensions.budget).sum::<f64>() / n;
        let avg_risk = projects.iter().map(|p| p.dimensions.risk).sum::<f64>() / n;

        if avg_budget < DIMENSION_ATTENTION_THRESHOLD && overruns.is_empty() {
            recs.push(
                "Budget Review: budget adherence is weak across the portfolio. \
                 Review spending against plans and implement cost controls."
                    .to_string(),
            );
        }
        if avg_risk < DIMENSION_ATTENTION_THRESHOLD {
            recs.push(
                "Risk Mitigation: prioritize mitigation plans for high-impact risks \
                 in the active portfolio."
                    .to_string(),
            );
        }
    }

    let underperforming = trend::underperforming_kpis(snapshot, config);
    if !underperforming.is_empty() {
        recs.push(format!(
            "KPI Improvement: {} KPI(s) are significantly below target. \
             Consider resource reallocation or scope adjustment.",
            underperforming.len()
        ));
    }

    let planning = snapshot
        .projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Planning)
        .count();
    if !snapshot.projects.is_empty()
        && (planning as f64) > (snapshot.projects.len() as f64) * PLANNING_HEAVY_SHARE
    {
        recs.push(
            "Pipeline Acceleration: a large portion of the portfolio is still in \
             planning. Consider accelerating development timelines."
                .to_string(),
        );
    }

    if recs.is_empty() {
        recs.push("Portfolio is performing well. Continue current trajectory.".to_string());
    }

    Section::new("Recommendations").bullets(recs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_fixtures::*;
    use crate::models::{BudgetCategory, RiskStatus};

    fn sample_snapshot() -> PortfolioSnapshot {
        let mut snapshot = empty_snapshot();
        snapshot.projects = vec![
            project(1, "Chatbot", ProjectStatus::Production, Priority::Critical),
            project(2, "Recommender", ProjectStatus::Development, Priority::High),
        ];
        snapshot.kpis = vec![
            kpi(1, 1, "Accuracy", 95.0, 92.0, date(2025, 5, 1)),
            kpi(2, 1, "Accuracy", 95.0, 94.0, date(2025, 6, 1)),
            kpi(3, 2, "CTR", 15.0, 8.0, date(2025, 6, 1)),
        ];
        snapshot.budgets = vec![
            budget(1, 1, BudgetCategory::Compute, 15000.0, 14000.0),
            budget(2, 2, BudgetCategory::Compute, 10000.0, 13000.0),
        ];
        snapshot.risks = vec![risk(1, 1, 4, 5, RiskStatus::Open)];
        snapshot
    }

    #[test]
    fn test_fmt_money() {
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_money(1234.5), "$1,234.50");
        assert_eq!(fmt_money(1234567.891), "$1,234,567.89");
        assert_eq!(fmt_money(-42.0), "-$42.00");
    }

    #[test]
    fn test_fmt_pct() {
        assert_eq!(fmt_pct(Some(5.0)), "+5.0%");
        assert_eq!(fmt_pct(Some(-12.34)), "-12.3%");
        assert_eq!(fmt_pct(None), "n/a");
    }

    #[test]
    fn test_report_kind_parsing() {
        for kind in ReportKind::all() {
            let parsed: ReportKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
        assert!("weekly".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_overview_contains_health_and_projects() {
        let doc = build(
            ReportKind::PortfolioOverview,
            &sample_snapshot(),
            &AnalyticsConfig::default(),
        );
        let md = markdown::render(&doc);
        assert!(md.contains("# AI Portfolio Overview Report"));
        assert!(md.contains("## Health Score"));
        assert!(md.contains("Chatbot"));
        assert!(md.contains("Total Projects: 2"));
    }

    #[test]
    fn test_overview_with_empty_portfolio_notes_missing_data() {
        let doc = build(
            ReportKind::PortfolioOverview,
            &empty_snapshot(),
            &AnalyticsConfig::default(),
        );
        let md = markdown::render(&doc);
        assert!(md.contains("health score is unavailable"));
        assert!(md.contains("No projects recorded."));
    }

    #[test]
    fn test_budget_report_flags_overrun() {
        let doc = build(
            ReportKind::BudgetVariance,
            &sample_snapshot(),
            &AnalyticsConfig::default(),
        );
        let md = markdown::render(&doc);
        assert!(md.contains("## By Project"));
        assert!(md.contains("## By Category"));
        assert!(md.contains("Over"));
        assert!(md.contains("$25,000.00"));
    }

    #[test]
    fn test_risk_register_matrix() {
        let doc = build(
            ReportKind::RiskRegister,
            &sample_snapshot(),
            &AnalyticsConfig::default(),
        );
        let md = markdown::render(&doc);
        assert!(md.contains("Risk Matrix"));
        assert!(md.contains("| P4 | - | - | - | - | 1 |"));
        assert!(md.contains("Critical"));
    }

    #[test]
    fn test_executive_summary_recommendations() {
        let doc = build(
            ReportKind::ExecutiveSummary,
            &sample_snapshot(),
            &AnalyticsConfig::default(),
        );
        let md = markdown::render(&doc);
        // 30% overrun on Recommender and an underperforming CTR metric
        assert!(md.contains("Budget Review"));
        assert!(md.contains("Recommender"));
        assert!(md.contains("KPI Improvement"));
        assert!(md.contains("Risk Mitigation"));
    }

    #[test]
    fn test_executive_summary_healthy_portfolio() {
        let mut snapshot = empty_snapshot();
        snapshot.projects = vec![project(1, "Chatbot", ProjectStatus::Production, Priority::High)];
        snapshot.kpis = vec![kpi(1, 1, "Accuracy", 95.0, 96.0, date(2025, 6, 1))];

        let doc = build(
            ReportKind::ExecutiveSummary,
            &snapshot,
            &AnalyticsConfig::default(),
        );
        let md = markdown::render(&doc);
        assert!(md.contains("Portfolio is performing well. Continue current trajectory."));
    }

    #[test]
    fn test_roi_undefined_rendered_explicitly() {
        let mut snapshot = empty_snapshot();
        snapshot.projects = vec![project(1, "Unfunded", ProjectStatus::Planning, Priority::Low)];

        let doc = build(
            ReportKind::ExecutiveSummary,
            &snapshot,
            &AnalyticsConfig::default(),
        );
        let md = markdown::render(&doc);
        assert!(md.contains("undefined (no budget entries recorded)"));
    }

    #[test]
    fn test_reports_are_idempotent() {
        let snapshot = sample_snapshot();
        let config = AnalyticsConfig::default();
        for kind in ReportKind::all() {
            let a = build(*kind, &snapshot, &config);
            let b = build(*kind, &snapshot, &config);
            assert_eq!(markdown::render(&a), markdown::render(&b));
            assert_eq!(html::render(&a), html::render(&b));
        }
    }
}
