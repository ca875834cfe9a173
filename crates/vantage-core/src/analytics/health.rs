//! Portfolio health scoring
//!
//! A weighted 0-100 composite of four dimensions: project status, risk
//! profile, budget adherence, and KPI achievement. Each dimension is
//! normalized to 0-100 before the configured weights are applied.

use serde::{Deserialize, Serialize};

use crate::config::{AnalyticsConfig, NoDataPolicy};
use crate::models::{BudgetEntry, KpiEntry, Project, ProjectStatus, RiskEntry};

use super::PortfolioSnapshot;

/// Per-KPI achievement is clamped to this percentage before averaging
const KPI_ACHIEVEMENT_CAP: f64 = 120.0;

/// Health contribution per project status
///
/// Exhaustive by construction: adding a status forces an update here.
fn status_contribution(status: ProjectStatus) -> f64 {
    match status {
        ProjectStatus::Production => 100.0,
        ProjectStatus::Testing => 80.0,
        ProjectStatus::Development => 60.0,
        ProjectStatus::Planning => 40.0,
        ProjectStatus::Retired => 0.0,
    }
}

/// Qualitative band for a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLabel {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl HealthLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=100 => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::NeedsAttention,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

impl std::fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unrounded dimension scores, each in [0, 100]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DimensionScores {
    pub status: f64,
    pub risk: f64,
    pub budget: f64,
    pub kpi: f64,
}

/// Health score for a single project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHealth {
    pub project_id: i64,
    pub project_name: String,
    pub dimensions: DimensionScores,
    /// Weighted composite, rounded and clamped to [0, 100]
    pub score: u8,
    pub label: HealthLabel,
}

/// Portfolio-wide health outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PortfolioHealth {
    Scored {
        /// Arithmetic mean of per-project scores, equal weight per project
        score: u8,
        label: HealthLabel,
        projects: Vec<ProjectHealth>,
    },
    /// No projects in the snapshot
    InsufficientData,
}

/// Score one project across all four dimensions
pub fn score_project(
    project: &Project,
    kpis: &[&KpiEntry],
    budgets: &[&BudgetEntry],
    risks: &[&RiskEntry],
    config: &AnalyticsConfig,
) -> ProjectHealth {
    let dimensions = DimensionScores {
        status: status_contribution(project.status),
        risk: risk_dimension(risks, config.no_data_policy),
        budget: budget_dimension(budgets, config),
        kpi: kpi_dimension(kpis, config.no_data_policy),
    };

    let weights = &config.weights;
    let composite = dimensions.status * weights.status
        + dimensions.risk * weights.risk
        + dimensions.budget * weights.budget
        + dimensions.kpi * weights.kpi;
    let score = composite.round().clamp(0.0, 100.0) as u8;

    ProjectHealth {
        project_id: project.id,
        project_name: project.name.clone(),
        dimensions,
        score,
        label: HealthLabel::from_score(score),
    }
}

/// Score the whole portfolio: every project, plus the equal-weight mean
pub fn score_portfolio(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> PortfolioHealth {
    if snapshot.projects.is_empty() {
        return PortfolioHealth::InsufficientData;
    }

    let projects: Vec<ProjectHealth> = snapshot
        .projects
        .iter()
        .map(|p| {
            score_project(
                p,
                &snapshot.kpis_for(p.id),
                &snapshot.budgets_for(p.id),
                &snapshot.risks_for(p.id),
                config,
            )
        })
        .collect();

    let mean =
        projects.iter().map(|p| p.score as f64).sum::<f64>() / projects.len() as f64;
    let score = mean.round().clamp(0.0, 100.0) as u8;

    PortfolioHealth::Scored {
        score,
        label: HealthLabel::from_score(score),
        projects,
    }
}

/// Risk dimension: 100 minus the average normalized score of open risks.
/// A project with no open risks is not penalized.
fn risk_dimension(risks: &[&RiskEntry], no_data: NoDataPolicy) -> f64 {
    if risks.is_empty() {
        return no_data.dimension_score();
    }
    let open: Vec<_> = risks.iter().filter(|r| r.is_open()).collect();
    if open.is_empty() {
        // All risks resolved counts as managed, not missing
        return 100.0;
    }
    let avg = open.iter().map(|r| r.normalized_score()).sum::<f64>() / open.len() as f64;
    (100.0 - avg * 100.0).clamp(0.0, 100.0)
}

/// Budget dimension: variance ratio inverted and clamped, saturating to 0 at
/// the configured threshold
fn budget_dimension(budgets: &[&BudgetEntry], config: &AnalyticsConfig) -> f64 {
    let planned: f64 = budgets.iter().map(|b| b.planned_amount).sum();
    if budgets.is_empty() || planned == 0.0 {
        return config.no_data_policy.dimension_score();
    }
    let actual: f64 = budgets.iter().map(|b| b.actual_amount).sum();
    let ratio = (actual - planned).abs() / planned;
    100.0 * (1.0 - (ratio / config.budget_saturation).min(1.0))
}

/// KPI dimension: mean achievement rate, per-KPI capped, final capped at 100
fn kpi_dimension(kpis: &[&KpiEntry], no_data: NoDataPolicy) -> f64 {
    let rates: Vec<f64> = kpis
        .iter()
        .filter_map(|k| k.achievement_rate())
        .map(|r| r.clamp(0.0, KPI_ACHIEVEMENT_CAP))
        .collect();
    if rates.is_empty() {
        return no_data.dimension_score();
    }
    let avg = rates.iter().sum::<f64>() / rates.len() as f64;
    avg.min(100.0)
}

/// One-line commentary on the status dimension, for executive summaries
pub fn status_commentary(score: f64) -> &'static str {
    if score >= 80.0 {
        "Strong project pipeline with active production systems"
    } else if score >= 60.0 {
        "Healthy mix of projects across lifecycle stages"
    } else {
        "Portfolio needs attention - many projects in early or retired stages"
    }
}

pub fn risk_commentary(score: f64) -> &'static str {
    if score >= 80.0 {
        "Risk profile is well managed"
    } else if score >= 60.0 {
        "Some risks require attention"
    } else {
        "Significant risks need immediate mitigation"
    }
}

pub fn budget_commentary(score: f64) -> &'static str {
    if score >= 80.0 {
        "Budget is on track or under planned spending"
    } else if score >= 60.0 {
        "Minor budget overruns detected"
    } else {
        "Significant budget overruns require corrective action"
    }
}

pub fn kpi_commentary(score: f64) -> &'static str {
    if score >= 80.0 {
        "KPIs are largely on target"
    } else if score >= 60.0 {
        "Some KPIs are below target"
    } else {
        "Multiple KPIs significantly below target"
    }
}
