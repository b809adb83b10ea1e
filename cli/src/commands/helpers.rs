use anyhow::{Context, Result, bail};
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitfeast_core::models::{Badge, DailyChallenge};

/// Parse a non-negative whole number such as "350" or "350kcal".
pub(crate) fn parse_calories(s: &str) -> Result<u32> {
    let trimmed = s.trim().trim_end_matches("kcal").trim();
    trimmed.parse().with_context(|| {
        format!("Invalid calories: '{s}'. Use a whole number like '350' or '350kcal'")
    })
}

/// Parse a duration in hours: "7.5", "7h", or "7h30m".
pub(crate) fn parse_hours(s: &str) -> Result<f64> {
    let s = s.trim();
    let hours = if let Some((h, rest)) = s.split_once('h') {
        let h: f64 = h
            .trim()
            .parse()
            .with_context(|| format!("Invalid hours: '{s}'"))?;
        let rest = rest.trim().trim_end_matches('m').trim();
        let m: f64 = if rest.is_empty() {
            0.0
        } else {
            rest.parse()
                .with_context(|| format!("Invalid minutes in '{s}'"))?
        };
        h + m / 60.0
    } else {
        s.parse()
            .with_context(|| format!("Invalid hours: '{s}'. Use '7.5', '7h', or '7h30m'"))?
    };
    if !hours.is_finite() || hours < 0.0 {
        bail!("Sleep hours must be a non-negative number");
    }
    if hours > 24.0 {
        bail!("Sleep hours cannot exceed 24");
    }
    Ok(hours)
}

/// Validate an `HH:MM` clock time. Empty input is allowed.
pub(crate) fn parse_clock_time(s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(String::new());
    }
    chrono::NaiveTime::parse_from_str(s, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .with_context(|| format!("Invalid time '{s}'. Use HH:MM (e.g. 22:30)"))
}

/// Stable id for a user-named item: lowercase ASCII words joined by '-'.
pub(crate) fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub(crate) fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    #[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn challenge_lines(ch: &DailyChallenge) -> [String; 2] {
    let status = if ch.completed { "done" } else { "in progress" };
    let pct = if ch.target == 0 {
        100.0
    } else {
        f64::from(ch.current) / f64::from(ch.target) * 100.0
    };
    [
        format!("  {}: {}", ch.title, ch.description),
        format!("  {} {}/{} ({status})", progress_bar(pct, 20), ch.current, ch.target),
    ]
}

pub(crate) fn print_challenge(ch: &DailyChallenge) {
    for line in challenge_lines(ch) {
        println!("{line}");
    }
}

fn badge_line(b: &Badge) -> String {
    format!("  Badge unlocked: {} {} - {}", b.icon, b.name, b.description)
}

pub(crate) fn announce_badges(unlocked: &[Badge]) {
    for b in unlocked {
        println!("{}", badge_line(b));
    }
}

pub(crate) fn print_badge_table(badges: &[&Badge]) {
    #[derive(Tabled)]
    struct BadgeRow {
        #[tabled(rename = "")]
        icon: String,
        #[tabled(rename = "Badge")]
        name: String,
        #[tabled(rename = "Description")]
        description: String,
        #[tabled(rename = "Goal")]
        requirement: u32,
        #[tabled(rename = "Earned")]
        earned: String,
    }

    let rows: Vec<BadgeRow> = badges
        .iter()
        .map(|b| BadgeRow {
            icon: b.icon.clone(),
            name: b.name.clone(),
            description: truncate(&b.description, 35),
            requirement: b.requirement,
            earned: b
                .earned_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..4)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calories() {
        assert_eq!(parse_calories("350").unwrap(), 350);
        assert_eq!(parse_calories("350kcal").unwrap(), 350);
        assert_eq!(parse_calories(" 0 ").unwrap(), 0);
    }

    #[test]
    fn test_parse_calories_invalid() {
        assert!(parse_calories("abc").is_err());
        assert!(parse_calories("-50").is_err());
        assert!(parse_calories("12.5").is_err());
    }

    #[test]
    fn test_parse_hours_formats() {
        assert!((parse_hours("7.5").unwrap() - 7.5).abs() < f64::EPSILON);
        assert!((parse_hours("7h").unwrap() - 7.0).abs() < f64::EPSILON);
        assert!((parse_hours("7h30m").unwrap() - 7.5).abs() < f64::EPSILON);
        assert!((parse_hours("6h 45").unwrap() - 6.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_hours_rejects_out_of_range() {
        assert!(parse_hours("-1").is_err());
        assert!(parse_hours("25").is_err());
        assert!(parse_hours("NaN").is_err());
        assert!(parse_hours("lots").is_err());
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("22:30").unwrap(), "22:30");
        assert_eq!(parse_clock_time(" 06:05 ").unwrap(), "06:05");
        assert_eq!(parse_clock_time("").unwrap(), "");
        assert!(parse_clock_time("25:00").is_err());
        assert!(parse_clock_time("late").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Overnight Oats"), "overnight-oats");
        assert_eq!(slugify("  Chili (Vegan!) v2 "), "chili-vegan-v2");
        assert_eq!(slugify("Crème brûlée"), "cr-me-br-l-e");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(50.0, 4), "[##--]");
        assert_eq!(progress_bar(150.0, 4), "[####]");
    }

    #[test]
    fn test_output_lines_are_ascii_separated() {
        let template = fitfeast_core::models::CHALLENGE_TEMPLATES[2];
        let mut ch = template.instantiate(chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        ch.advance(4);
        let [title, progress] = challenge_lines(&ch);
        assert_eq!(title, "  Stay Hydrated: Drink 8 glasses of water");
        assert_eq!(progress, "  [##########----------] 4/8 (in progress)");

        let badges = fitfeast_core::models::default_badges();
        let badge = &badges[0];
        let line = badge_line(badge);
        assert!(line.starts_with("  Badge unlocked: "));
        assert!(line.contains(&format!("{} - {}", badge.name, badge.description)));
        assert!(!line.contains('\u{2014}'));
    }

    #[test]
    fn test_json_error() {
        assert_eq!(json_error("nope"), r#"{"error":"nope"}"#);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("Müsli", 10), "Müsli");
    }
}
