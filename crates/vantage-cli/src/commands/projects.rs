//! Project listing and inspection commands

use anyhow::{anyhow, Result};
use vantage_core::db::Database;

use super::truncate;

pub fn cmd_projects_list(db: &Database) -> Result<()> {
    let projects = db.get_all_projects()?;

    println!();
    println!("📁 Projects");
    println!("   ─────────────────────────────────────────────────────────────");

    if projects.is_empty() {
        println!("   No projects recorded. Seed some with: vantage seed --file <yaml>");
        return Ok(());
    }

    println!(
        "   {:>4} │ {:25} │ {:11} │ {:8} │ {:15}",
        "ID", "Name", "Status", "Priority", "Owner"
    );
    println!("   ─────┼───────────────────────────┼─────────────┼──────────┼────────────────");

    for p in &projects {
        println!(
            "   {:>4} │ {:25} │ {:11} │ {:8} │ {:15}",
            p.id,
            truncate(&p.name, 25),
            p.status.as_str(),
            p.priority.as_str(),
            truncate(&p.owner, 15)
        );
    }

    println!();
    println!("   {} project(s)", projects.len());
    Ok(())
}

pub fn cmd_projects_show(db: &Database, id: i64) -> Result<()> {
    let project = db
        .get_project(id)?
        .ok_or_else(|| anyhow!("Project {} not found", id))?;

    println!();
    println!("📁 {} (#{})", project.name, project.id);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Status:     {}", project.status);
    println!("   Priority:   {}", project.priority);
    println!("   Owner:      {}", project.owner);
    if !project.department.is_empty() {
        println!("   Department: {}", project.department);
    }
    if !project.model_used.is_empty() {
        println!("   Model:      {}", project.model_used);
    }
    if !project.use_case.is_empty() {
        println!("   Use case:   {}", project.use_case);
    }
    println!("   Started:    {}", project.start_date);
    if let Some(target) = project.target_date {
        let remaining = project
            .days_until_target(chrono::Utc::now().date_naive())
            .unwrap_or(0);
        if project.completed_date.is_none() && remaining >= 0 {
            println!("   Target:     {} ({} day(s) remaining)", target, remaining);
        } else {
            println!("   Target:     {}", target);
        }
    }
    if let Some(completed) = project.completed_date {
        println!("   Completed:  {}", completed);
    }

    let kpis = db.get_all_kpis(Some(id))?;
    if !kpis.is_empty() {
        println!();
        println!("   KPIs ({}):", kpis.len());
        for k in &kpis {
            let rate = match k.achievement_rate() {
                Some(r) => format!("{:.1}%", r),
                None => "n/a".to_string(),
            };
            println!(
                "     {} │ {} │ target {} actual {} │ achievement {}",
                k.recorded_date,
                truncate(&k.metric_name, 25),
                k.target_value,
                k.actual_value,
                rate
            );
        }
    }

    let budgets = db.get_all_budgets(Some(id))?;
    if !budgets.is_empty() {
        println!();
        println!("   Budgets ({}):", budgets.len());
        for b in &budgets {
            println!(
                "     {} │ planned {:.2} actual {:.2} │ variance {:+.2}",
                b.category.label(),
                b.planned_amount,
                b.actual_amount,
                b.variance()
            );
        }
    }

    let risks = db.get_all_risks(Some(id))?;
    if !risks.is_empty() {
        println!();
        println!("   Risks ({}):", risks.len());
        for r in &risks {
            println!(
                "     [{}] P{} x I{} = {} ({}) │ {}",
                r.status,
                r.probability,
                r.impact,
                r.score(),
                r.level(),
                truncate(&r.description, 50)
            );
        }
    }

    Ok(())
}
