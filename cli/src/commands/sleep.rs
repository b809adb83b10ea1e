use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitfeast_core::models::SleepQuality;
use fitfeast_core::service::FitFeastService;

use super::helpers::{json_error, parse_clock_time, parse_hours};

pub(crate) fn cmd_sleep_log(
    svc: &mut FitFeastService,
    hours: &str,
    quality: &str,
    bed: Option<&str>,
    wake: Option<&str>,
    json: bool,
) -> Result<()> {
    let hours = parse_hours(hours)?;
    let quality = SleepQuality::parse(quality)?;
    let bed = parse_clock_time(bed.unwrap_or_default())?;
    let wake = parse_clock_time(wake.unwrap_or_default())?;

    let log = svc.wellness_mut().log_sleep(hours, quality, &bed, &wake);

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        println!(
            "Logged {:.1}h of {} sleep for {}",
            log.hours,
            log.quality.as_str(),
            log.date.format("%Y-%m-%d")
        );
        let goal = svc.wellness().state().daily_sleep_goal;
        if log.hours < f64::from(goal) {
            println!("  {:.1}h short of your {goal}h goal", f64::from(goal) - log.hours);
        }
    }

    Ok(())
}

pub(crate) fn cmd_sleep_today(svc: &FitFeastService, json: bool) -> Result<()> {
    if let Some(log) = svc.wellness().todays_sleep() {
        if json {
            println!("{}", serde_json::to_string_pretty(log)?);
        } else {
            println!(
                "{}: {:.1}h ({})",
                log.date.format("%Y-%m-%d"),
                log.hours,
                log.quality.as_str()
            );
            if !log.bed_time.is_empty() || !log.wake_time.is_empty() {
                println!("  {} to {}", log.bed_time, log.wake_time);
            }
        }
    } else if json {
        println!("{}", json_error("No sleep logged today"));
    } else {
        eprintln!("No sleep logged today. Use `fitfeast sleep log <hours>` to record it.");
    }

    Ok(())
}

pub(crate) fn cmd_sleep_week(svc: &FitFeastService, json: bool) -> Result<()> {
    let week = svc.wellness().weekly_sleep();

    if json {
        println!("{}", serde_json::to_string_pretty(&week)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct SleepRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Hours")]
        hours: String,
        #[tabled(rename = "Quality")]
        quality: String,
        #[tabled(rename = "Bed")]
        bed: String,
        #[tabled(rename = "Wake")]
        wake: String,
    }

    let rows: Vec<SleepRow> = week
        .iter()
        .map(|l| SleepRow {
            date: l.date.format("%a %Y-%m-%d").to_string(),
            hours: if l.hours > 0.0 {
                format!("{:.1}", l.hours)
            } else {
                "-".to_string()
            },
            quality: l.quality.as_str().to_string(),
            bed: l.bed_time.clone(),
            wake: l.wake_time.clone(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    if let Some(avg) = svc.wellness().average_sleep_hours() {
        println!("Average: {avg:.1}h");
    }

    Ok(())
}

pub(crate) fn cmd_sleep_goal(svc: &mut FitFeastService, hours: u32, json: bool) -> Result<()> {
    svc.wellness_mut().set_daily_sleep_goal(hours);

    if json {
        println!("{}", serde_json::json!({ "daily_sleep_goal": hours }));
    } else {
        println!("Daily sleep goal set to {hours}h");
    }

    Ok(())
}

pub(crate) fn cmd_meditate(svc: &mut FitFeastService, minutes: u32, json: bool) -> Result<()> {
    let total = svc.wellness_mut().add_meditation_minutes(minutes);

    if json {
        println!(
            "{}",
            serde_json::json!({ "added": minutes, "meditation_minutes": total })
        );
    } else {
        println!("Meditated {minutes} min ({total} min total)");
    }

    Ok(())
}
