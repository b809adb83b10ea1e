use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitfeast_core::catalog::{self, WORKOUT_GOALS};
use fitfeast_core::models::{SavedWorkoutPlan, WorkoutDay};
use fitfeast_core::service::FitFeastService;

use super::helpers::{slugify, truncate};

/// Plan file layout accepted by `plan import`. `id` and `created_at` are
/// assigned on import.
#[derive(Debug, Deserialize)]
struct PlanFile {
    name: String,
    #[serde(default)]
    goal: String,
    #[serde(default)]
    days: Vec<WorkoutDay>,
}

fn parse_plan_file(content: &str, created_at: DateTime<Utc>) -> Result<SavedWorkoutPlan> {
    let file: PlanFile = serde_json::from_str(content).context("Invalid workout plan JSON")?;
    let id = slugify(&file.name);
    if id.is_empty() {
        bail!("Plan name must contain at least one letter or digit");
    }
    Ok(SavedWorkoutPlan {
        id,
        name: file.name.trim().to_string(),
        goal: file.goal,
        days: file.days,
        created_at,
    })
}

pub(crate) fn cmd_plan_import(svc: &mut FitFeastService, path: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let plan = parse_plan_file(&content, svc.now())?;
    let id = plan.id.clone();
    let name = plan.name.clone();

    if !svc.favorites_mut().save_workout(plan) {
        bail!("Workout plan '{name}' is already saved");
    }

    if json {
        println!("{}", serde_json::json!({ "id": id }));
    } else {
        println!("Saved workout plan '{name}' [{id}]");
    }

    Ok(())
}

fn print_plan(plan: &SavedWorkoutPlan) {
    println!("{} [{}]", plan.name, plan.id);
    for day in &plan.days {
        if day.rest_day {
            println!("  {}: rest", day.day);
            continue;
        }
        println!("  {}:", day.day);
        for e in &day.exercises {
            match &e.notes {
                Some(notes) => println!("    {} {}x{} ({notes})", e.name, e.sets, e.reps),
                None => println!("    {} {}x{}", e.name, e.sets, e.reps),
            }
        }
    }
}

/// Show the 7-day plan for `goal`, saving it with `save`.
pub(crate) fn cmd_plan_generate(
    svc: &mut FitFeastService,
    goal: &str,
    save: bool,
    json: bool,
) -> Result<()> {
    let plan = if save {
        match svc.save_generated_plan(goal) {
            Some(plan) => plan,
            None => bail!("Today's {goal} plan is already saved"),
        }
    } else {
        catalog::generate_workout_plan(goal, svc.now(), svc.today())
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "plan": plan, "saved": save })
        );
        return Ok(());
    }

    if plan.goal != catalog::normalize_goal(goal) {
        eprintln!(
            "Unknown goal '{goal}', showing {}. Goals: {}",
            plan.goal,
            WORKOUT_GOALS.join(", ")
        );
    }
    print_plan(&plan);
    if save {
        println!("\nSaved to favorites.");
    }

    Ok(())
}

pub(crate) fn cmd_plan_list(svc: &FitFeastService, json: bool) -> Result<()> {
    let plans = svc.favorites().workouts();

    if json {
        println!("{}", serde_json::to_string_pretty(plans)?);
        return Ok(());
    }
    if plans.is_empty() {
        eprintln!("No saved workout plans. Use `fitfeast plan generate <goal> --save` to add one.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct PlanRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Goal")]
        goal: String,
        #[tabled(rename = "Training days")]
        training: usize,
        #[tabled(rename = "Exercises")]
        exercises: usize,
    }

    let rows: Vec<PlanRow> = plans
        .iter()
        .map(|p| PlanRow {
            id: p.id.clone(),
            name: truncate(&p.name, 30),
            goal: truncate(&p.goal, 20),
            training: p.days.iter().filter(|d| !d.rest_day).count(),
            exercises: p.days.iter().map(|d| d.exercises.len()).sum(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

pub(crate) fn cmd_plan_remove(svc: &mut FitFeastService, id: &str, json: bool) -> Result<()> {
    if !svc.favorites_mut().remove_workout(id) {
        bail!("No saved workout plan with id '{id}'");
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Removed workout plan {id}");
    }

    Ok(())
}
