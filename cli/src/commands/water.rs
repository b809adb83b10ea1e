use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitfeast_core::models::HydrationLog;
use fitfeast_core::service::FitFeastService;

use super::helpers::{announce_badges, progress_bar};

fn print_hydration(log: &HydrationLog) {
    println!(
        "{}: {} {}/{} glasses ({:.0}%)",
        log.date.format("%Y-%m-%d"),
        progress_bar(log.progress_percent(), 20),
        log.glasses,
        log.goal,
        log.progress_percent()
    );
}

pub(crate) fn cmd_water_add(svc: &mut FitFeastService, json: bool) -> Result<()> {
    let update = svc.drink_water();

    if json {
        println!("{}", serde_json::to_string_pretty(&update)?);
    } else {
        print_hydration(&update.log);
        if update.challenge.as_ref().is_some_and(|c| c.completed) {
            println!("  Hydration challenge complete!");
        }
        announce_badges(&update.unlocked);
    }

    Ok(())
}

pub(crate) fn cmd_water_remove(svc: &mut FitFeastService, json: bool) -> Result<()> {
    let log = svc.wellness_mut().remove_water_glass();

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        print_hydration(&log);
    }

    Ok(())
}

pub(crate) fn cmd_water_today(svc: &FitFeastService, json: bool) -> Result<()> {
    let log = svc.wellness().todays_hydration();

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        print_hydration(&log);
        if svc.wellness().state().hydration_reminders {
            println!("  Reminders: on");
        }
    }

    Ok(())
}

pub(crate) fn cmd_water_week(svc: &FitFeastService, json: bool) -> Result<()> {
    let week = svc.wellness().weekly_hydration();

    if json {
        println!("{}", serde_json::to_string_pretty(&week)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct WaterRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Glasses")]
        glasses: u32,
        #[tabled(rename = "Goal")]
        goal: u32,
        #[tabled(rename = "Progress")]
        bar: String,
    }

    let rows: Vec<WaterRow> = week
        .iter()
        .map(|l| WaterRow {
            date: l.date.format("%a %Y-%m-%d").to_string(),
            glasses: l.glasses,
            goal: l.goal,
            bar: progress_bar(l.progress_percent(), 10),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    let streak = svc.wellness().hydration_goal_streak();
    if streak > 0 {
        println!("Goal met {streak} days in a row");
    }

    Ok(())
}

pub(crate) fn cmd_water_goal(svc: &mut FitFeastService, glasses: u32, json: bool) -> Result<()> {
    svc.wellness_mut().set_daily_water_goal(glasses);

    if json {
        println!("{}", serde_json::json!({ "daily_water_goal": glasses }));
    } else {
        println!("Daily water goal set to {glasses} glasses");
    }

    Ok(())
}

pub(crate) fn cmd_water_reminders(svc: &mut FitFeastService, json: bool) -> Result<()> {
    let enabled = svc.wellness_mut().toggle_hydration_reminders();

    if json {
        println!("{}", serde_json::json!({ "hydration_reminders": enabled }));
    } else {
        let state = if enabled { "on" } else { "off" };
        println!("Hydration reminders turned {state}");
    }

    Ok(())
}
