use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitfeast_core::service::FitFeastService;

use super::helpers::{print_badge_table, print_challenge, progress_bar};

pub(crate) fn cmd_status(svc: &FitFeastService, json: bool) -> Result<()> {
    let dash = svc.dashboard();

    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }

    let date = &dash.date;
    println!("=== {date} ===\n");

    let streak = dash.current_streak;
    let longest = dash.longest_streak;
    let flame = if streak >= 7 { " 🔥" } else { "" };
    println!("  STREAK: {streak} days (best {longest}){flame}");
    println!(
        "  WORKOUTS: {} | RECIPES: {} | BADGES: {}/{}",
        dash.total_workouts_completed, dash.total_recipes_made, dash.earned_badges, dash.total_badges
    );
    println!();

    if let Some(ch) = &dash.challenge {
        println!("  TODAY'S CHALLENGE");
        print_challenge(ch);
        println!();
    }

    let h = &dash.hydration;
    println!(
        "  WATER: {} {}/{} glasses",
        progress_bar(dash.hydration_percent, 20),
        h.glasses,
        h.goal
    );
    match &dash.sleep {
        Some(s) => println!("  SLEEP: {:.1}h ({})", s.hours, s.quality.as_str()),
        None => println!("  SLEEP: not logged"),
    }
    println!("  MEDITATION: {} min total", dash.meditation_minutes);
    println!(
        "  FAVORITES: {} recipes, {} workout plans",
        dash.saved_recipes, dash.saved_workouts
    );

    Ok(())
}

pub(crate) fn cmd_badges(svc: &FitFeastService, earned_only: bool, json: bool) -> Result<()> {
    let engine = svc.gamification();
    let badges: Vec<_> = if earned_only {
        engine.earned_badges()
    } else {
        engine.state().badges.iter().collect()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&badges)?);
    } else if badges.is_empty() {
        eprintln!("No badges earned yet. Log a workout with `fitfeast workout` to get started.");
    } else {
        print_badge_table(&badges);
    }

    Ok(())
}

pub(crate) fn cmd_week(svc: &FitFeastService, json: bool) -> Result<()> {
    let progress = &svc.gamification().state().weekly_progress;

    if json {
        println!("{}", serde_json::to_string_pretty(progress)?);
    } else if progress.is_empty() {
        eprintln!("No weekly progress yet. Use `fitfeast workout` to record one.");
    } else {
        #[derive(Tabled)]
        struct WeekRow {
            #[tabled(rename = "Date")]
            date: String,
            #[tabled(rename = "Workouts")]
            workouts: u32,
            #[tabled(rename = "Calories")]
            calories: u32,
        }

        let rows: Vec<WeekRow> = progress
            .iter()
            .map(|p| WeekRow {
                date: p.date.format("%Y-%m-%d").to_string(),
                workouts: p.workouts,
                calories: p.calories,
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
            .to_string();
        println!("{table}");
    }

    Ok(())
}
