//! Analytics engine
//!
//! Pure computations from portfolio records to derived metrics:
//! - `roi` - Return on investment per project and portfolio-wide
//! - `health` - Weighted 0-100 health scoring
//! - `trend` - KPI trend classification over time series
//! - `variance` - Budget variance analysis with grouping
//! - `risk` - Risk matrix and profile scoring
//!
//! Every computation is a function of `(&PortfolioSnapshot, &AnalyticsConfig)`
//! with no internal I/O, locking, or wall-clock reads. Results for identical
//! inputs are bit-reproducible.

pub mod health;
pub mod risk;
pub mod roi;
pub mod trend;
pub mod variance;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::Database;
use crate::error::Result;
use crate::models::{BudgetEntry, KpiEntry, Project, RiskEntry};

/// One consistent read of all four record kinds
///
/// Loaded from the storage port once, before any computation begins. The
/// `as_of` date anchors every time-dependent derivation (months active,
/// report headers) so that analytics runs stay deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub projects: Vec<Project>,
    pub kpis: Vec<KpiEntry>,
    pub budgets: Vec<BudgetEntry>,
    pub risks: Vec<RiskEntry>,
    pub as_of: NaiveDate,
}

impl PortfolioSnapshot {
    /// Load the current state of all records from the database
    pub fn load(db: &Database, as_of: NaiveDate) -> Result<Self> {
        let snapshot = Self {
            projects: db.get_all_projects()?,
            kpis: db.get_all_kpis(None)?,
            budgets: db.get_all_budgets(None)?,
            risks: db.get_all_risks(None)?,
            as_of,
        };
        debug!(
            projects = snapshot.projects.len(),
            kpis = snapshot.kpis.len(),
            budgets = snapshot.budgets.len(),
            risks = snapshot.risks.len(),
            "Loaded portfolio snapshot"
        );
        Ok(snapshot)
    }

    /// KPI observations belonging to one project
    pub fn kpis_for(&self, project_id: i64) -> Vec<&KpiEntry> {
        self.kpis
            .iter()
            .filter(|k| k.project_id == project_id)
            .collect()
    }

    /// Budget entries belonging to one project
    pub fn budgets_for(&self, project_id: i64) -> Vec<&BudgetEntry> {
        self.budgets
            .iter()
            .filter(|b| b.project_id == project_id)
            .collect()
    }

    /// Risk entries belonging to one project
    pub fn risks_for(&self, project_id: i64) -> Vec<&RiskEntry> {
        self.risks
            .iter()
            .filter(|r| r.project_id == project_id)
            .collect()
    }

    /// Project name lookup, falling back to the raw id for orphaned records
    pub fn project_name(&self, project_id: i64) -> String {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("project {}", project_id))
    }

    /// Headline counts for dashboards and report quick stats
    pub fn stats(&self) -> PortfolioStats {
        let total_planned: f64 = self.budgets.iter().map(|b| b.planned_amount).sum();
        let total_actual: f64 = self.budgets.iter().map(|b| b.actual_amount).sum();
        PortfolioStats {
            total_projects: self.projects.len(),
            active_projects: self.projects.iter().filter(|p| p.is_active()).count(),
            open_risks: self.risks.iter().filter(|r| r.is_open()).count(),
            kpis_tracked: self.kpis.len(),
            total_planned,
            total_actual,
        }
    }
}

/// Headline portfolio counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub open_risks: usize,
    pub kpis_tracked: usize,
    pub total_planned: f64,
    pub total_actual: f64,
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    //! Shared sample portfolio for analytics tests

    use chrono::{NaiveDate, Utc};

    use super::PortfolioSnapshot;
    use crate::models::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn project(id: i64, name: &str, status: ProjectStatus, priority: Priority) -> Project {
        Project {
            id,
            name: name.to_string(),
            description: String::new(),
            status,
            priority,
            owner: "Alice".to_string(),
            department: "Engineering".to_string(),
            model_used: String::new(),
            use_case: String::new(),
            start_date: date(2024, 1, 1),
            target_date: None,
            completed_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn kpi(
        id: i64,
        project_id: i64,
        metric: &str,
        target: f64,
        actual: f64,
        recorded: NaiveDate,
    ) -> KpiEntry {
        KpiEntry {
            id,
            project_id,
            metric_name: metric.to_string(),
            target_value: target,
            actual_value: actual,
            unit: String::new(),
            recorded_date: recorded,
            created_at: Utc::now(),
        }
    }

    pub fn budget(
        id: i64,
        project_id: i64,
        category: BudgetCategory,
        planned: f64,
        actual: f64,
    ) -> BudgetEntry {
        BudgetEntry {
            id,
            project_id,
            category,
            planned_amount: planned,
            actual_amount: actual,
            currency: "USD".to_string(),
            period: "2025-Q1".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn risk(id: i64, project_id: i64, probability: u8, impact: u8, status: RiskStatus) -> RiskEntry {
        RiskEntry {
            id,
            project_id,
            description: format!("risk {}", id),
            probability,
            impact,
            mitigation: String::new(),
            status,
            created_at: Utc::now(),
        }
    }

    pub fn empty_snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            projects: vec![],
            kpis: vec![],
            budgets: vec![],
            risks: vec![],
            as_of: date(2025, 7, 1),
        }
    }
}
