//! YAML seeding of portfolio data
//!
//! Seed files nest KPIs, budgets, and risks under each project; records pass
//! through the same validation as any other write.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::models::{NewBudgetEntry, NewKpiEntry, NewProject, NewRiskEntry};

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    projects: Vec<SeedProject>,
}

#[derive(Debug, Deserialize)]
struct SeedProject {
    #[serde(flatten)]
    project: NewProject,
    #[serde(default)]
    kpis: Vec<NewKpiEntry>,
    #[serde(default)]
    budgets: Vec<NewBudgetEntry>,
    #[serde(default)]
    risks: Vec<NewRiskEntry>,
}

/// Counts of records inserted by a seed run
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedStats {
    pub projects: usize,
    pub kpis: usize,
    pub budgets: usize,
    pub risks: usize,
}

/// Populate the database from a YAML file with sample data
pub fn seed_from_yaml(db: &Database, path: &Path) -> Result<SeedStats> {
    let raw = std::fs::read_to_string(path)?;
    let seed: SeedFile = serde_yaml::from_str(&raw)?;

    let mut stats = SeedStats::default();
    for entry in &seed.projects {
        let project_id = db.add_project(&entry.project)?;
        stats.projects += 1;

        for kpi in &entry.kpis {
            db.add_kpi(project_id, kpi)?;
            stats.kpis += 1;
        }
        for budget in &entry.budgets {
            db.add_budget(project_id, budget)?;
            stats.budgets += 1;
        }
        for risk in &entry.risks {
            db.add_risk(project_id, risk)?;
            stats.risks += 1;
        }
    }

    info!(
        path = %path.display(),
        projects = stats.projects,
        kpis = stats.kpis,
        budgets = stats.budgets,
        risks = stats.risks,
        "Seeded database from YAML"
    );
    Ok(stats)
}
