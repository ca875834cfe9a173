//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: String::new(),
            status: ProjectStatus::Development,
            priority: Priority::High,
            owner: "Alice".to_string(),
            department: "Engineering".to_string(),
            model_used: "claude-sonnet-4".to_string(),
            use_case: "Support automation".to_string(),
            start_date: date(2025, 1, 1),
            target_date: Some(date(2025, 12, 31)),
            completed_date: None,
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        let projects = db.get_all_projects().unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_project_crud() {
        let db = Database::in_memory().unwrap();

        let id = db.add_project(&sample_project("Chatbot")).unwrap();
        assert!(id > 0);

        let project = db.get_project(id).unwrap().unwrap();
        assert_eq!(project.name, "Chatbot");
        assert_eq!(project.status, ProjectStatus::Development);
        assert_eq!(project.target_date, Some(date(2025, 12, 31)));

        let mut updated = sample_project("Chatbot");
        updated.status = ProjectStatus::Production;
        db.update_project(id, &updated).unwrap();
        let project = db.get_project(id).unwrap().unwrap();
        assert_eq!(project.status, ProjectStatus::Production);

        assert!(db.delete_project(id).unwrap());
        assert!(db.get_project(id).unwrap().is_none());
        assert!(!db.delete_project(id).unwrap());
    }

    #[test]
    fn test_get_nonexistent_project() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_project(999).unwrap().is_none());
    }

    #[test]
    fn test_add_project_rejects_invalid() {
        let db = Database::in_memory().unwrap();
        let mut project = sample_project("Bad Dates");
        project.target_date = Some(date(2024, 1, 1));
        assert!(db.add_project(&project).is_err());
    }

    #[test]
    fn test_update_unknown_project_errors() {
        let db = Database::in_memory().unwrap();
        let result = db.update_project(42, &sample_project("Ghost"));
        assert!(matches!(result, Err(crate::error::Error::NotFound(_))));
    }

    #[test]
    fn test_kpi_series_ordering() {
        let db = Database::in_memory().unwrap();
        let pid = db.add_project(&sample_project("Chatbot")).unwrap();

        // Insert out of order; reads must come back date-ascending
        for (day, value) in [(20, 92.0), (5, 88.0), (12, 90.0)] {
            db.add_kpi(
                pid,
                &NewKpiEntry {
                    metric_name: "Accuracy".to_string(),
                    target_value: 95.0,
                    actual_value: value,
                    unit: "%".to_string(),
                    recorded_date: date(2025, 6, day),
                },
            )
            .unwrap();
        }

        let series = db.get_kpis_for_metric(pid, "accuracy").unwrap();
        assert_eq!(series.len(), 3);
        let values: Vec<f64> = series.iter().map(|k| k.actual_value).collect();
        assert_eq!(values, vec![88.0, 90.0, 92.0]);
    }

    #[test]
    fn test_kpis_filtered_by_project() {
        let db = Database::in_memory().unwrap();
        let p1 = db.add_project(&sample_project("One")).unwrap();
        let p2 = db.add_project(&sample_project("Two")).unwrap();

        let kpi = NewKpiEntry {
            metric_name: "CTR".to_string(),
            target_value: 15.0,
            actual_value: 8.0,
            unit: "%".to_string(),
            recorded_date: date(2025, 6, 1),
        };
        db.add_kpi(p1, &kpi).unwrap();
        db.add_kpi(p2, &kpi).unwrap();

        assert_eq!(db.get_all_kpis(None).unwrap().len(), 2);
        assert_eq!(db.get_all_kpis(Some(p1)).unwrap().len(), 1);
    }

    #[test]
    fn test_kpis_recorded_between() {
        let db = Database::in_memory().unwrap();
        let pid = db.add_project(&sample_project("Chatbot")).unwrap();
        for month in [1, 3, 6] {
            db.add_kpi(
                pid,
                &NewKpiEntry {
                    metric_name: "Accuracy".to_string(),
                    target_value: 95.0,
                    actual_value: 90.0,
                    unit: "%".to_string(),
                    recorded_date: date(2025, month, 1),
                },
            )
            .unwrap();
        }

        let window = db
            .get_kpis_recorded_between(date(2025, 2, 1), date(2025, 4, 1))
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].recorded_date, date(2025, 3, 1));
    }

    #[test]
    fn test_budget_totals() {
        let db = Database::in_memory().unwrap();
        let pid = db.add_project(&sample_project("Chatbot")).unwrap();

        db.add_budget(
            pid,
            &NewBudgetEntry {
                category: BudgetCategory::Compute,
                planned_amount: 15000.0,
                actual_amount: 14000.0,
                currency: "USD".to_string(),
                period: "2025-Q1".to_string(),
            },
        )
        .unwrap();
        db.add_budget(
            pid,
            &NewBudgetEntry {
                category: BudgetCategory::ApiCalls,
                planned_amount: 25000.0,
                actual_amount: 28000.0,
                currency: "USD".to_string(),
                period: "2025-Q1".to_string(),
            },
        )
        .unwrap();

        let totals = db.get_budget_totals().unwrap();
        assert_eq!(totals.total_planned, 40000.0);
        assert_eq!(totals.total_actual, 42000.0);
        assert_eq!(totals.total_variance, 2000.0);
    }

    #[test]
    fn test_risk_register_ordering() {
        let db = Database::in_memory().unwrap();
        let pid = db.add_project(&sample_project("Chatbot")).unwrap();

        let add = |p: u8, i: u8, status: RiskStatus| {
            db.add_risk(
                pid,
                &NewRiskEntry {
                    description: format!("risk {}x{}", p, i),
                    probability: p,
                    impact: i,
                    mitigation: String::new(),
                    status,
                },
            )
            .unwrap()
        };
        add(2, 2, RiskStatus::Open);
        add(4, 5, RiskStatus::Mitigating);
        add(5, 5, RiskStatus::Resolved);

        let register = db.get_risk_register().unwrap();
        // Resolved risks excluded; highest score first
        assert_eq!(register.len(), 2);
        assert_eq!(register[0].score(), 20);
        assert_eq!(register[1].score(), 4);
    }

    #[test]
    fn test_reset_clears_all_tables() {
        let db = Database::in_memory().unwrap();
        let pid = db.add_project(&sample_project("Chatbot")).unwrap();
        db.add_budget(
            pid,
            &NewBudgetEntry {
                category: BudgetCategory::Compute,
                planned_amount: 1000.0,
                actual_amount: 900.0,
                currency: "USD".to_string(),
                period: String::new(),
            },
        )
        .unwrap();

        db.reset().unwrap();
        assert!(db.get_all_projects().unwrap().is_empty());
        assert!(db.get_all_budgets(None).unwrap().is_empty());
    }

    #[test]
    fn test_delete_project_cascades() {
        let db = Database::in_memory().unwrap();
        let pid = db.add_project(&sample_project("Chatbot")).unwrap();
        db.add_kpi(
            pid,
            &NewKpiEntry {
                metric_name: "Accuracy".to_string(),
                target_value: 95.0,
                actual_value: 90.0,
                unit: String::new(),
                recorded_date: date(2025, 6, 1),
            },
        )
        .unwrap();
        db.add_risk(
            pid,
            &NewRiskEntry {
                description: "Model drift".to_string(),
                probability: 3,
                impact: 3,
                mitigation: String::new(),
                status: RiskStatus::Open,
            },
        )
        .unwrap();

        db.delete_project(pid).unwrap();
        assert!(db.get_all_kpis(None).unwrap().is_empty());
        assert!(db.get_all_risks(None).unwrap().is_empty());
    }

    #[test]
    fn test_project_count_by_status() {
        let db = Database::in_memory().unwrap();
        let mut p = sample_project("A");
        p.status = ProjectStatus::Production;
        db.add_project(&p).unwrap();
        let mut p = sample_project("B");
        p.status = ProjectStatus::Production;
        db.add_project(&p).unwrap();
        let mut p = sample_project("C");
        p.status = ProjectStatus::Planning;
        db.add_project(&p).unwrap();

        let counts = db.get_project_count_by_status().unwrap();
        assert_eq!(
            counts,
            vec![(ProjectStatus::Planning, 1), (ProjectStatus::Production, 2)]
        );
    }

    #[test]
    fn test_projects_by_status_and_priority() {
        let db = Database::in_memory().unwrap();
        let mut p = sample_project("A");
        p.status = ProjectStatus::Production;
        p.priority = Priority::Critical;
        db.add_project(&p).unwrap();
        db.add_project(&sample_project("B")).unwrap();

        let production = db.get_projects_by_status(ProjectStatus::Production).unwrap();
        assert_eq!(production.len(), 1);
        assert_eq!(production[0].name, "A");

        let critical = db.get_projects_by_priority(Priority::Critical).unwrap();
        assert_eq!(critical.len(), 1);
        assert!(db
            .get_projects_by_priority(Priority::Low)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_projects_by_department() {
        let db = Database::in_memory().unwrap();
        let mut p = sample_project("A");
        p.department = "Marketing".to_string();
        db.add_project(&p).unwrap();
        db.add_project(&sample_project("B")).unwrap();

        let marketing = db.get_projects_by_department("marketing").unwrap();
        assert_eq!(marketing.len(), 1);
        assert_eq!(marketing[0].name, "A");
    }
}
