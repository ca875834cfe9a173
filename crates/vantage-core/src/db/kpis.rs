//! KPI observation operations

use chrono::NaiveDate;
use rusqlite::{params, Row};

use super::{parse_date, parse_datetime, Database};
use crate::error::Result;
use crate::models::{KpiEntry, NewKpiEntry};

fn row_to_kpi(row: &Row<'_>) -> rusqlite::Result<KpiEntry> {
    Ok(KpiEntry {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        metric_name: row.get("metric_name")?,
        target_value: row.get("target_value")?,
        actual_value: row.get("actual_value")?,
        unit: row.get("unit")?,
        recorded_date: parse_date(&row.get::<_, String>("recorded_date")?),
        created_at: parse_datetime(&row.get::<_, String>("created_at")?),
    })
}

impl Database {
    /// Insert a KPI observation for a project
    pub fn add_kpi(&self, project_id: i64, kpi: &NewKpiEntry) -> Result<i64> {
        kpi.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO kpis (project_id, metric_name, target_value, actual_value, unit, recorded_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                project_id,
                kpi.metric_name,
                kpi.target_value,
                kpi.actual_value,
                kpi.unit,
                kpi.recorded_date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Retrieve KPI observations, optionally filtered by project,
    /// ordered by recorded date ascending
    pub fn get_all_kpis(&self, project_id: Option<i64>) -> Result<Vec<KpiEntry>> {
        let conn = self.conn()?;
        let kpis = match project_id {
            Some(pid) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM kpis WHERE project_id = ? ORDER BY recorded_date, id",
                )?;
                let rows = stmt
                    .query_map(params![pid], row_to_kpi)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt =
                    conn.prepare("SELECT * FROM kpis ORDER BY recorded_date, id")?;
                let rows = stmt
                    .query_map([], row_to_kpi)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(kpis)
    }

    /// Retrieve the time series for one (project, metric) pair,
    /// ordered by recorded date ascending
    pub fn get_kpis_for_metric(&self, project_id: i64, metric_name: &str) -> Result<Vec<KpiEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM kpis
            WHERE project_id = ? AND metric_name = ? COLLATE NOCASE
            ORDER BY recorded_date, id
            "#,
        )?;
        let kpis = stmt
            .query_map(params![project_id, metric_name], row_to_kpi)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(kpis)
    }

    /// Retrieve KPI observations recorded within a date range (inclusive)
    pub fn get_kpis_recorded_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<KpiEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM kpis WHERE recorded_date BETWEEN ? AND ? ORDER BY recorded_date, id",
        )?;
        let kpis = stmt
            .query_map(params![from.to_string(), to.to_string()], row_to_kpi)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(kpis)
    }
}
