//! Risk register operations

use rusqlite::{params, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewRiskEntry, RiskEntry, RiskStatus};

fn row_to_risk(row: &Row<'_>) -> rusqlite::Result<RiskEntry> {
    Ok(RiskEntry {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        description: row.get("description")?,
        probability: row.get("probability")?,
        impact: row.get("impact")?,
        mitigation: row.get("mitigation")?,
        status: row
            .get::<_, String>("status")?
            .parse()
            .unwrap_or(RiskStatus::Open),
        created_at: parse_datetime(&row.get::<_, String>("created_at")?),
    })
}

impl Database {
    /// Insert a risk entry for a project
    pub fn add_risk(&self, project_id: i64, risk: &NewRiskEntry) -> Result<i64> {
        risk.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO risks (project_id, description, probability, impact, mitigation, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                project_id,
                risk.description,
                risk.probability,
                risk.impact,
                risk.mitigation,
                risk.status.as_str(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Retrieve risk entries, optionally filtered by project
    pub fn get_all_risks(&self, project_id: Option<i64>) -> Result<Vec<RiskEntry>> {
        let conn = self.conn()?;
        let risks = match project_id {
            Some(pid) => {
                let mut stmt =
                    conn.prepare("SELECT * FROM risks WHERE project_id = ? ORDER BY id")?;
                let rows = stmt
                    .query_map(params![pid], row_to_risk)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare("SELECT * FROM risks ORDER BY id")?;
                let rows = stmt
                    .query_map([], row_to_risk)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(risks)
    }

    /// Open and mitigating risks, highest risk score first
    pub fn get_risk_register(&self) -> Result<Vec<RiskEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM risks
            WHERE status IN ('open', 'mitigating')
            ORDER BY (probability * impact) DESC, id
            "#,
        )?;
        let risks = stmt
            .query_map([], row_to_risk)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(risks)
    }
}
