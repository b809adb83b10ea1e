use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// --- Gamification types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Workouts,
    Recipes,
    Streak,
    Hydration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement: u32,
    pub kind: BadgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<DateTime<Utc>>,
}

impl Badge {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        requirement: u32,
        kind: BadgeKind,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            requirement,
            kind,
            earned_at: None,
        }
    }

    #[must_use]
    pub fn is_earned(&self) -> bool {
        self.earned_at.is_some()
    }
}

/// The static badge catalog every new installation starts from.
#[must_use]
#[rustfmt::skip]
pub fn default_badges() -> Vec<Badge> {
    use BadgeKind::{Hydration, Recipes, Streak, Workouts};
    vec![
        Badge::new("first_workout", "First Steps", "Complete your first workout", "🏃", 1, Workouts),
        Badge::new("workout_warrior", "Workout Warrior", "Complete 10 workouts", "💪", 10, Workouts),
        Badge::new("gym_legend", "Gym Legend", "Complete 50 workouts", "🏆", 50, Workouts),
        Badge::new("first_recipe", "Chef Beginner", "Save your first recipe", "👨‍🍳", 1, Recipes),
        Badge::new("home_chef", "Home Chef", "Save 10 recipes", "🍳", 10, Recipes),
        Badge::new("master_chef", "Master Chef", "Save 25 recipes", "⭐", 25, Recipes),
        Badge::new("streak_3", "On Fire", "Maintain a 3-day streak", "🔥", 3, Streak),
        Badge::new("streak_7", "Week Warrior", "Maintain a 7-day streak", "🌟", 7, Streak),
        Badge::new("streak_30", "Monthly Master", "Maintain a 30-day streak", "🎖️", 30, Streak),
        Badge::new("hydration_hero", "Hydration Hero", "Meet water goal for 7 days", "💧", 7, Hydration),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    Workout,
    Recipe,
    Hydration,
    Steps,
}

pub const CHALLENGE_KINDS: &[&str] = &["workout", "recipe", "hydration", "steps"];

impl ChallengeKind {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "workout" => Ok(Self::Workout),
            "recipe" => Ok(Self::Recipe),
            "hydration" | "water" => Ok(Self::Hydration),
            "steps" => Ok(Self::Steps),
            _ => anyhow::bail!(
                "Invalid challenge kind '{s}'. Must be one of: {}",
                CHALLENGE_KINDS.join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub target: u32,
    pub current: u32,
    pub completed: bool,
    pub date: NaiveDate,
}

impl DailyChallenge {
    /// Add progress, keeping `completed` in sync with `current >= target`.
    pub fn advance(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
        self.completed = self.current >= self.target;
    }

    /// Raise progress to at least `value`. Never lowers it.
    pub fn raise_to(&mut self, value: u32) {
        self.current = self.current.max(value);
        self.completed = self.current >= self.target;
    }
}

/// A challenge template before it is dated and given an id.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: ChallengeKind,
    pub target: u32,
}

pub const CHALLENGE_TEMPLATES: &[ChallengeTemplate] = &[
    ChallengeTemplate {
        title: "Quick Workout",
        description: "Complete a 15-minute workout",
        kind: ChallengeKind::Workout,
        target: 1,
    },
    ChallengeTemplate {
        title: "Try New Recipe",
        description: "Save a new healthy recipe",
        kind: ChallengeKind::Recipe,
        target: 1,
    },
    ChallengeTemplate {
        title: "Stay Hydrated",
        description: "Drink 8 glasses of water",
        kind: ChallengeKind::Hydration,
        target: 8,
    },
    ChallengeTemplate {
        title: "Move More",
        description: "Take 5000 steps today",
        kind: ChallengeKind::Steps,
        target: 5000,
    },
];

impl ChallengeTemplate {
    #[must_use]
    pub fn instantiate(&self, date: NaiveDate) -> DailyChallenge {
        DailyChallenge {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            target: self.target,
            current: 0,
            completed: false,
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub date: NaiveDate,
    pub workouts: u32,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationState {
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
    pub total_workouts_completed: u32,
    pub total_recipes_made: u32,
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub daily_challenges: Vec<DailyChallenge>,
    #[serde(default)]
    pub weekly_progress: Vec<WeeklyProgress>,
}

impl Default for GamificationState {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_active_date: None,
            total_workouts_completed: 0,
            total_recipes_made: 0,
            badges: default_badges(),
            daily_challenges: Vec::new(),
            weekly_progress: Vec::new(),
        }
    }
}

// --- Wellness types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationLog {
    pub date: NaiveDate,
    pub glasses: u32,
    pub goal: u32,
}

impl HydrationLog {
    #[must_use]
    pub fn empty(date: NaiveDate, goal: u32) -> Self {
        Self {
            date,
            glasses: 0,
            goal,
        }
    }

    #[must_use]
    pub fn goal_met(&self) -> bool {
        self.goal > 0 && self.glasses >= self.goal
    }

    /// Progress toward the goal as a percentage, clamped to 100 for display.
    /// The stored glass count is never clamped.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.goal == 0 {
            return if self.glasses > 0 { 100.0 } else { 0.0 };
        }
        (f64::from(self.glasses) / f64::from(self.goal) * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

pub const SLEEP_QUALITIES: &[&str] = &["poor", "fair", "good", "excellent"];

impl SleepQuality {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "poor" => Ok(Self::Poor),
            "fair" => Ok(Self::Fair),
            "good" => Ok(Self::Good),
            "excellent" => Ok(Self::Excellent),
            _ => anyhow::bail!(
                "Invalid sleep quality '{s}'. Must be one of: {}",
                SLEEP_QUALITIES.join(", ")
            ),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepLog {
    pub date: NaiveDate,
    pub hours: f64,
    pub quality: SleepQuality,
    pub bed_time: String,
    pub wake_time: String,
}

impl SleepLog {
    #[must_use]
    pub fn placeholder(date: NaiveDate) -> Self {
        Self {
            date,
            hours: 0.0,
            quality: SleepQuality::Fair,
            bed_time: String::new(),
            wake_time: String::new(),
        }
    }
}

pub const DEFAULT_WATER_GOAL: u32 = 8;
pub const DEFAULT_SLEEP_GOAL: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessState {
    #[serde(default)]
    pub hydration_logs: Vec<HydrationLog>,
    #[serde(default)]
    pub sleep_logs: Vec<SleepLog>,
    pub daily_water_goal: u32,
    pub daily_sleep_goal: u32,
    pub hydration_reminders: bool,
    pub meditation_minutes: u64,
}

impl Default for WellnessState {
    fn default() -> Self {
        Self {
            hydration_logs: Vec::new(),
            sleep_logs: Vec::new(),
            daily_water_goal: DEFAULT_WATER_GOAL,
            daily_sleep_goal: DEFAULT_SLEEP_GOAL,
            hydration_reminders: true,
            meditation_minutes: 0,
        }
    }
}

// --- Favorites types ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub day: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub rest_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkoutPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub days: Vec<WorkoutDay>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_badge_catalog() {
        let badges = default_badges();
        assert_eq!(badges.len(), 10);
        assert!(badges.iter().all(|b| !b.is_earned()));

        let ids: Vec<&str> = badges.iter().map(|b| b.id.as_str()).collect();
        assert!(ids.contains(&"first_workout"));
        assert!(ids.contains(&"workout_warrior"));
        assert!(ids.contains(&"hydration_hero"));

        let warrior = badges.iter().find(|b| b.id == "workout_warrior").unwrap();
        assert_eq!(warrior.requirement, 10);
        assert_eq!(warrior.kind, BadgeKind::Workouts);
    }

    #[test]
    fn test_challenge_advance_tracks_completion() {
        let mut ch = CHALLENGE_TEMPLATES[2].instantiate(date(2024, 6, 15));
        assert_eq!(ch.kind, ChallengeKind::Hydration);
        assert_eq!(ch.target, 8);
        assert!(!ch.completed);

        ch.advance(7);
        assert!(!ch.completed);
        ch.advance(1);
        assert!(ch.completed);
        ch.advance(3);
        assert_eq!(ch.current, 11);
        assert!(ch.completed);
    }

    #[test]
    fn test_challenge_kind_parse() {
        assert_eq!(ChallengeKind::parse("Steps").unwrap(), ChallengeKind::Steps);
        assert_eq!(
            ChallengeKind::parse("water").unwrap(),
            ChallengeKind::Hydration
        );
        assert!(ChallengeKind::parse("yoga").is_err());
    }

    #[test]
    fn test_sleep_quality_parse() {
        assert_eq!(SleepQuality::parse("GOOD").unwrap(), SleepQuality::Good);
        assert_eq!(SleepQuality::Excellent.as_str(), "excellent");
        assert!(SleepQuality::parse("great").is_err());
    }

    #[test]
    fn test_hydration_progress_is_clamped_for_display() {
        let log = HydrationLog {
            date: date(2024, 6, 15),
            glasses: 9,
            goal: 8,
        };
        assert_eq!(log.glasses, 9);
        assert!(log.goal_met());
        assert!((log.progress_percent() - 100.0).abs() < f64::EPSILON);

        let half = HydrationLog {
            date: date(2024, 6, 15),
            glasses: 4,
            goal: 8,
        };
        assert!((half.progress_percent() - 50.0).abs() < f64::EPSILON);
        assert!(!half.goal_met());
    }

    #[test]
    fn test_zero_goal_progress() {
        let log = HydrationLog::empty(date(2024, 6, 15), 0);
        assert!((log.progress_percent() - 0.0).abs() < f64::EPSILON);
        assert!(!log.goal_met());
    }

    #[test]
    fn test_state_serde_uses_snake_case_kinds() {
        let state = GamificationState::default();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"kind\":\"workouts\""));
        assert!(!json.contains("earned_at"));

        let back: GamificationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_wellness_defaults() {
        let w = WellnessState::default();
        assert_eq!(w.daily_water_goal, 8);
        assert_eq!(w.daily_sleep_goal, 8);
        assert!(w.hydration_reminders);
        assert_eq!(w.meditation_minutes, 0);
    }
}
