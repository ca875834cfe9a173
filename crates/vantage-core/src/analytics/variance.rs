//! Budget variance analysis
//!
//! Planned vs actual totals per group (project or category) with an explicit
//! over/under/on-track standing. Percentage variance is None when no planned
//! baseline exists - never zero, never infinity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::BudgetEntry;

use super::PortfolioSnapshot;

/// How to group budget entries for variance analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceGrouping {
    ByProject,
    ByCategory,
}

impl VarianceGrouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByProject => "by_project",
            Self::ByCategory => "by_category",
        }
    }
}

/// Whether a group is over, under, or exactly on budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStanding {
    OverBudget,
    UnderBudget,
    OnTrack,
}

impl BudgetStanding {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OverBudget => "Over",
            Self::UnderBudget => "Under",
            Self::OnTrack => "On Track",
        }
    }

    fn from_variance(variance: f64) -> Self {
        if variance > 0.0 {
            Self::OverBudget
        } else if variance < 0.0 {
            Self::UnderBudget
        } else {
            Self::OnTrack
        }
    }
}

/// Variance totals for one group of budget entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceSummary {
    pub key: String,
    pub planned: f64,
    pub actual: f64,
    /// actual - planned
    pub variance: f64,
    /// Variance as a percentage of planned, None when planned is zero
    pub percentage: Option<f64>,
    pub standing: BudgetStanding,
}

impl VarianceSummary {
    fn from_entries(key: String, entries: &[&BudgetEntry]) -> Self {
        let planned: f64 = entries.iter().map(|b| b.planned_amount).sum();
        let actual: f64 = entries.iter().map(|b| b.actual_amount).sum();
        let variance = actual - planned;
        let percentage = if planned != 0.0 {
            Some((variance / planned) * 100.0)
        } else {
            None
        };
        Self {
            key,
            planned,
            actual,
            variance,
            percentage,
            standing: BudgetStanding::from_variance(variance),
        }
    }
}

/// Per-group and aggregate variance for a snapshot's budget entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceReport {
    pub grouping: VarianceGrouping,
    /// Groups sorted by key for deterministic output
    pub groups: Vec<VarianceSummary>,
    pub totals: VarianceSummary,
}

/// Analyze budget variance, grouping entries by project or category
pub fn analyze(snapshot: &PortfolioSnapshot, grouping: VarianceGrouping) -> VarianceReport {
    let mut grouped: BTreeMap<String, Vec<&BudgetEntry>> = BTreeMap::new();
    for entry in &snapshot.budgets {
        let key = match grouping {
            VarianceGrouping::ByProject => snapshot.project_name(entry.project_id),
            VarianceGrouping::ByCategory => entry.category.label().to_string(),
        };
        grouped.entry(key).or_default().push(entry);
    }

    let groups: Vec<VarianceSummary> = grouped
        .into_iter()
        .map(|(key, entries)| VarianceSummary::from_entries(key, &entries))
        .collect();

    let all: Vec<&BudgetEntry> = snapshot.budgets.iter().collect();
    let totals = VarianceSummary::from_entries("Total".to_string(), &all);

    VarianceReport {
        grouping,
        groups,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_fixtures::*;
    use crate::models::{BudgetCategory, Priority, ProjectStatus};

    fn sample_snapshot() -> crate::analytics::PortfolioSnapshot {
        let mut snapshot = empty_snapshot();
        snapshot.projects = vec![
            project(1, "Chatbot", ProjectStatus::Production, Priority::High),
            project(2, "Recommender", ProjectStatus::Development, Priority::Medium),
        ];
        snapshot.budgets = vec![
            budget(1, 1, BudgetCategory::Compute, 15000.0, 14000.0),
            budget(2, 1, BudgetCategory::ApiCalls, 25000.0, 28000.0),
            budget(3, 2, BudgetCategory::Compute, 30000.0, 32000.0),
        ];
        snapshot
    }

    #[test]
    fn test_variance_by_project() {
        let report = analyze(&sample_snapshot(), VarianceGrouping::ByProject);

        assert_eq!(report.groups.len(), 2);
        // Sorted by project name
        assert_eq!(report.groups[0].key, "Chatbot");
        assert_eq!(report.groups[0].planned, 40000.0);
        assert_eq!(report.groups[0].actual, 42000.0);
        assert_eq!(report.groups[0].variance, 2000.0);
        assert_eq!(report.groups[0].percentage, Some(5.0));
        assert_eq!(report.groups[0].standing, BudgetStanding::OverBudget);

        assert_eq!(report.groups[1].key, "Recommender");
        assert_eq!(report.totals.planned, 70000.0);
        assert_eq!(report.totals.actual, 74000.0);
        assert_eq!(report.totals.standing, BudgetStanding::OverBudget);
    }

    #[test]
    fn test_variance_by_category() {
        let report = analyze(&sample_snapshot(), VarianceGrouping::ByCategory);

        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].key, "API Calls");
        assert_eq!(report.groups[1].key, "Compute");
        assert_eq!(report.groups[1].planned, 45000.0);
        assert_eq!(report.groups[1].actual, 46000.0);
    }

    #[test]
    fn test_percentage_undefined_when_planned_is_zero() {
        let mut snapshot = empty_snapshot();
        snapshot.projects = vec![project(1, "Chatbot", ProjectStatus::Production, Priority::High)];
        snapshot.budgets = vec![budget(1, 1, BudgetCategory::Other, 0.0, 500.0)];

        let report = analyze(&snapshot, VarianceGrouping::ByProject);
        assert_eq!(report.groups[0].percentage, None);
        assert_eq!(report.groups[0].variance, 500.0);
        assert_eq!(report.groups[0].standing, BudgetStanding::OverBudget);
    }

    #[test]
    fn test_under_budget_and_on_track() {
        let mut snapshot = empty_snapshot();
        snapshot.projects = vec![
            project(1, "Under", ProjectStatus::Production, Priority::High),
            project(2, "Exact", ProjectStatus::Production, Priority::High),
        ];
        snapshot.budgets = vec![
            budget(1, 1, BudgetCategory::Compute, 1000.0, 900.0),
            budget(2, 2, BudgetCategory::Compute, 1000.0, 1000.0),
        ];

        let report = analyze(&snapshot, VarianceGrouping::ByProject);
        assert_eq!(report.groups[0].key, "Exact");
        assert_eq!(report.groups[0].standing, BudgetStanding::OnTrack);
        assert_eq!(report.groups[1].standing, BudgetStanding::UnderBudget);
        assert_eq!(report.groups[1].percentage, Some(-10.0));
    }

    #[test]
    fn test_empty_snapshot_has_empty_groups() {
        let report = analyze(&empty_snapshot(), VarianceGrouping::ByCategory);
        assert!(report.groups.is_empty());
        assert_eq!(report.totals.planned, 0.0);
        assert_eq!(report.totals.percentage, None);
        assert_eq!(report.totals.standing, BudgetStanding::OnTrack);
    }
}
