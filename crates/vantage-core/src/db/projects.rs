//! Project operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewProject, Priority, Project, ProjectStatus};

fn row_to_project(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status: row
            .get::<_, String>("status")?
            .parse()
            .unwrap_or(ProjectStatus::Planning),
        priority: row
            .get::<_, String>("priority")?
            .parse()
            .unwrap_or(Priority::Medium),
        owner: row.get("owner")?,
        department: row.get("department")?,
        model_used: row.get("model_used")?,
        use_case: row.get("use_case")?,
        start_date: parse_date(&row.get::<_, String>("start_date")?),
        target_date: row
            .get::<_, Option<String>>("target_date")?
            .map(|s| parse_date(&s)),
        completed_date: row
            .get::<_, Option<String>>("completed_date")?
            .map(|s| parse_date(&s)),
        created_at: parse_datetime(&row.get::<_, String>("created_at")?),
    })
}

impl Database {
    /// Insert a project, validating invariants first
    pub fn add_project(&self, project: &NewProject) -> Result<i64> {
        project.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO projects (name, description, status, priority, owner, department, model_used, use_case, start_date, target_date, completed_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                project.name,
                project.description,
                project.status.as_str(),
                project.priority.as_str(),
                project.owner,
                project.department,
                project.model_used,
                project.use_case,
                project.start_date.to_string(),
                project.target_date.map(|d| d.to_string()),
                project.completed_date.map(|d| d.to_string()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Retrieve a project by id
    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        let conn = self.conn()?;
        let project = conn
            .query_row(
                "SELECT * FROM projects WHERE id = ?",
                params![id],
                row_to_project,
            )
            .optional()?;
        Ok(project)
    }

    /// Retrieve all projects, newest start date first
    pub fn get_all_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT * FROM projects ORDER BY start_date DESC, id")?;
        let projects = stmt
            .query_map([], row_to_project)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Update an existing project; errors if the id is unknown
    pub fn update_project(&self, id: i64, project: &NewProject) -> Result<()> {
        project.validate()?;
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE projects SET
                name = ?, description = ?, status = ?, priority = ?, owner = ?,
                department = ?, model_used = ?, use_case = ?, start_date = ?,
                target_date = ?, completed_date = ?
            WHERE id = ?
            "#,
            params![
                project.name,
                project.description,
                project.status.as_str(),
                project.priority.as_str(),
                project.owner,
                project.department,
                project.model_used,
                project.use_case,
                project.start_date.to_string(),
                project.target_date.map(|d| d.to_string()),
                project.completed_date.map(|d| d.to_string()),
                id,
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("project {}", id)));
        }
        Ok(())
    }

    /// Delete a project and all associated KPIs, budgets, and risks
    pub fn delete_project(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM projects WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// Retrieve projects filtered by status
    pub fn get_projects_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM projects WHERE status = ? ORDER BY start_date DESC, id",
        )?;
        let projects = stmt
            .query_map(params![status.as_str()], row_to_project)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Retrieve projects filtered by priority
    pub fn get_projects_by_priority(&self, priority: Priority) -> Result<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM projects WHERE priority = ? ORDER BY start_date DESC, id",
        )?;
        let projects = stmt
            .query_map(params![priority.as_str()], row_to_project)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Retrieve projects filtered by department (case-insensitive)
    pub fn get_projects_by_department(&self, department: &str) -> Result<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM projects WHERE department = ? COLLATE NOCASE ORDER BY start_date DESC, id",
        )?;
        let projects = stmt
            .query_map(params![department], row_to_project)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Count projects grouped by status, in lifecycle order
    pub fn get_project_count_by_status(&self) -> Result<Vec<(ProjectStatus, i64)>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT status, COUNT(*) FROM projects GROUP BY status")?;
        let raw: Vec<(String, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut counts = Vec::new();
        for status in ProjectStatus::all() {
            if let Some((_, n)) = raw.iter().find(|(s, _)| s == status.as_str()) {
                counts.push((*status, *n));
            }
        }
        Ok(counts)
    }
}
