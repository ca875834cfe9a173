//! Return on investment calculations
//!
//! Investment is the sum of budget actuals. Generated value is derived, in
//! order of preference, from a configured monthly return estimate, configured
//! per-metric monetary unit values, or an achievement-rate proxy over the
//! project's KPIs.

use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::{BudgetEntry, KpiEntry, Project};

use super::PortfolioSnapshot;

/// Per-KPI achievement is clamped to this percentage before averaging,
/// so a single runaway metric cannot dominate the proxy
const ACHIEVEMENT_CAP: f64 = 150.0;

/// Why an ROI could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiUndefinedReason {
    /// The project has no budget entries at all
    NoBudgetEntries,
    /// Budget entries exist but actual spend sums to zero
    ZeroCost,
}

impl RoiUndefinedReason {
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::NoBudgetEntries => "no budget entries recorded",
            Self::ZeroCost => "no actual spend recorded",
        }
    }
}

/// A computed ROI, with the raw numerator and denominator for auditability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiResult {
    /// Signed ratio: (value_generated - total_cost) / total_cost
    pub ratio: f64,
    pub value_generated: f64,
    pub total_cost: f64,
    /// Months to recoup the investment, when a monthly return is configured
    pub payback_months: Option<f64>,
}

/// ROI outcome: a defined ratio, or an explicit marker that none exists.
/// Never a numeric zero standing in for "unknown".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoiOutcome {
    Defined(RoiResult),
    Undefined { reason: RoiUndefinedReason },
}

impl RoiOutcome {
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

/// ROI for one project within a portfolio run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRoi {
    pub project_id: i64,
    pub project_name: String,
    pub outcome: RoiOutcome,
}

/// Compute ROI for a single project
pub fn compute_roi(
    project: &Project,
    budgets: &[&BudgetEntry],
    kpis: &[&KpiEntry],
    config: &AnalyticsConfig,
    as_of: chrono::NaiveDate,
) -> RoiOutcome {
    if budgets.is_empty() {
        return RoiOutcome::Undefined {
            reason: RoiUndefinedReason::NoBudgetEntries,
        };
    }

    let total_cost: f64 = budgets.iter().map(|b| b.actual_amount).sum();
    if total_cost <= 0.0 {
        return RoiOutcome::Undefined {
            reason: RoiUndefinedReason::ZeroCost,
        };
    }

    let monthly_return = config
        .monthly_return_estimates
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(&project.name))
        .map(|(_, v)| *v)
        .filter(|v| *v > 0.0);

    let value_generated = if let Some(monthly) = monthly_return {
        let months_active = ((as_of - project.start_date).num_days() as f64 / 30.0).max(1.0);
        monthly * months_active
    } else if kpis.iter().any(|k| config.unit_value_for(&k.metric_name).is_some()) {
        kpis.iter()
            .filter_map(|k| {
                config
                    .unit_value_for(&k.metric_name)
                    .map(|unit| k.actual_value * unit)
            })
            .sum()
    } else {
        // Achievement-rate proxy: value scales with how much of the KPI
        // targets the spend has bought
        let rates: Vec<f64> = kpis
            .iter()
            .filter_map(|k| k.achievement_rate())
            .map(|r| r.clamp(0.0, ACHIEVEMENT_CAP))
            .collect();
        if rates.is_empty() {
            0.0
        } else {
            let avg = rates.iter().sum::<f64>() / rates.len() as f64;
            total_cost * (avg / 100.0)
        }
    };

    let payback_months = monthly_return.map(|monthly| total_cost / monthly);

    RoiOutcome::Defined(RoiResult {
        ratio: (value_generated - total_cost) / total_cost,
        value_generated,
        total_cost,
        payback_months,
    })
}

/// Compute ROI for every project in the snapshot
///
/// An undefined outcome for one project never suppresses the others.
pub fn compute_portfolio_roi(
    snapshot: &PortfolioSnapshot,
    config: &AnalyticsConfig,
) -> Vec<ProjectRoi> {
    snapshot
        .projects
        .iter()
        .map(|project| ProjectRoi {
            project_id: project.id,
            project_name: project.name.clone(),
            outcome: compute_roi(
                project,
                &snapshot.budgets_for(project.id),
                &snapshot.kpis_for(project.id),
                config,
                snapshot.as_of,
            ),
        })
        .collect()
}
