use anyhow::Result;

use fitfeast_core::models::ChallengeKind;
use fitfeast_core::service::FitFeastService;

use super::helpers::{json_error, print_challenge};

pub(crate) fn cmd_challenge_show(svc: &mut FitFeastService, json: bool) -> Result<()> {
    let ch = svc.gamification_mut().refresh_daily_challenge().clone();

    if json {
        println!("{}", serde_json::to_string_pretty(&ch)?);
    } else {
        println!("TODAY'S CHALLENGE ({})", ch.date.format("%Y-%m-%d"));
        print_challenge(&ch);
    }

    Ok(())
}

pub(crate) fn cmd_challenge_progress(
    svc: &mut FitFeastService,
    kind: &str,
    amount: u32,
    json: bool,
) -> Result<()> {
    let kind = ChallengeKind::parse(kind)?;
    let engine = svc.gamification_mut();
    engine.refresh_daily_challenge();

    match engine.record_challenge_progress(kind, amount) {
        Some(ch) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ch)?);
            } else {
                print_challenge(&ch);
                if ch.completed {
                    println!("  Challenge complete!");
                }
            }
        }
        None => {
            let message = "Today's challenge is a different kind; nothing recorded";
            if json {
                println!("{}", json_error(message));
            } else {
                eprintln!("{message}");
            }
        }
    }

    Ok(())
}
