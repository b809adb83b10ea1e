use anyhow::Result;

use fitfeast_core::service::FitFeastService;

use super::helpers::{announce_badges, parse_calories};

pub(crate) fn cmd_workout(svc: &mut FitFeastService, calories: Option<&str>, json: bool) -> Result<()> {
    let calories = calories.map(parse_calories).transpose()?.unwrap_or(0);
    let unlocked = svc.complete_workout(calories);

    if json {
        let state = svc.gamification().state();
        println!(
            "{}",
            serde_json::json!({
                "total_workouts_completed": state.total_workouts_completed,
                "current_streak": state.current_streak,
                "longest_streak": state.longest_streak,
                "unlocked": unlocked,
            })
        );
    } else {
        let state = svc.gamification().state();
        println!(
            "Workout logged ({} total). Streak: {} days",
            state.total_workouts_completed, state.current_streak
        );
        announce_badges(&unlocked);
    }

    Ok(())
}
