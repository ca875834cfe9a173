//! Budget entry operations

use rusqlite::{params, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{BudgetCategory, BudgetEntry, BudgetTotals, NewBudgetEntry};

fn row_to_budget(row: &Row<'_>) -> rusqlite::Result<BudgetEntry> {
    Ok(BudgetEntry {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        category: row
            .get::<_, String>("category")?
            .parse()
            .unwrap_or(BudgetCategory::Other),
        planned_amount: row.get("planned_amount")?,
        actual_amount: row.get("actual_amount")?,
        currency: row.get("currency")?,
        period: row.get("period")?,
        created_at: parse_datetime(&row.get::<_, String>("created_at")?),
    })
}

impl Database {
    /// Insert a budget entry for a project
    pub fn add_budget(&self, project_id: i64, budget: &NewBudgetEntry) -> Result<i64> {
        budget.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO budgets (project_id, category, planned_amount, actual_amount, currency, period)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                project_id,
                budget.category.as_str(),
                budget.planned_amount,
                budget.actual_amount,
                budget.currency,
                budget.period,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Retrieve budget entries, optionally filtered by project
    pub fn get_all_budgets(&self, project_id: Option<i64>) -> Result<Vec<BudgetEntry>> {
        let conn = self.conn()?;
        let budgets = match project_id {
            Some(pid) => {
                let mut stmt =
                    conn.prepare("SELECT * FROM budgets WHERE project_id = ? ORDER BY id")?;
                let rows = stmt
                    .query_map(params![pid], row_to_budget)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare("SELECT * FROM budgets ORDER BY id")?;
                let rows = stmt
                    .query_map([], row_to_budget)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(budgets)
    }

    /// Aggregate planned/actual totals across all budget entries
    pub fn get_budget_totals(&self) -> Result<BudgetTotals> {
        let conn = self.conn()?;
        let (total_planned, total_actual): (f64, f64) = conn.query_row(
            r#"
            SELECT COALESCE(SUM(planned_amount), 0), COALESCE(SUM(actual_amount), 0)
            FROM budgets
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(BudgetTotals {
            total_planned,
            total_actual,
            total_variance: total_actual - total_planned,
        })
    }
}
