use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::catalog;
use crate::clock::{Clock, SystemClock};
use crate::favorites::FavoritesStore;
use crate::gamification::GamificationEngine;
use crate::models::{
    Badge, ChallengeKind, DailyChallenge, HydrationLog, SavedRecipe, SavedWorkoutPlan, SleepLog,
    WeeklyProgress,
};
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};
use crate::wellness::WellnessEngine;

/// Read-only snapshot for dashboards and `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub date: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_workouts_completed: u32,
    pub total_recipes_made: u32,
    pub earned_badges: usize,
    pub total_badges: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<DailyChallenge>,
    pub hydration: HydrationLog,
    pub hydration_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<SleepLog>,
    pub meditation_minutes: u64,
    pub saved_recipes: usize,
    pub saved_workouts: usize,
    pub weekly_progress: Vec<WeeklyProgress>,
}

/// What a hydration action changed beyond the glass count.
#[derive(Debug, Clone, Serialize)]
pub struct HydrationUpdate {
    pub log: HydrationLog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<DailyChallenge>,
    pub unlocked: Vec<Badge>,
}

/// Owns the store, the clock, and every engine for one installation.
pub struct FitFeastService {
    clock: Rc<dyn Clock>,
    gamification: GamificationEngine,
    wellness: WellnessEngine,
    favorites: FavoritesStore,
}

impl FitFeastService {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        let gamification = GamificationEngine::load(store.clone(), clock.clone());
        Self::with_engine(gamification, store, clock)
    }

    /// Build around a preconfigured gamification engine (e.g. a seeded RNG).
    pub fn with_engine(
        mut gamification: GamificationEngine,
        store: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        gamification.refresh_daily_challenge();
        let wellness = WellnessEngine::load(store.clone(), clock.clone());
        let favorites = FavoritesStore::load(store);
        Self {
            clock,
            gamification,
            wellness,
            favorites,
        }
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        let store = SqliteStore::open(db_path)?;
        Ok(Self::new(Rc::new(store), Rc::new(SystemClock)))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()), Rc::new(SystemClock))
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // --- Engine access ---

    #[must_use]
    pub fn gamification(&self) -> &GamificationEngine {
        &self.gamification
    }

    pub fn gamification_mut(&mut self) -> &mut GamificationEngine {
        &mut self.gamification
    }

    #[must_use]
    pub fn wellness(&self) -> &WellnessEngine {
        &self.wellness
    }

    pub fn wellness_mut(&mut self) -> &mut WellnessEngine {
        &mut self.wellness
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    // --- Cross-engine flows ---

    /// Log a finished workout and fold it into today's weekly rollup.
    pub fn complete_workout(&mut self, calories: u32) -> Vec<Badge> {
        self.gamification.refresh_daily_challenge();
        let unlocked = self.gamification.log_workout();
        self.gamification.add_weekly_progress(1, calories);
        unlocked
    }

    /// Save a recipe to favorites. Only a newly saved recipe counts toward
    /// recipe badges and the recipe challenge; returns `None` for duplicates.
    pub fn save_recipe(&mut self, recipe: SavedRecipe) -> Option<Vec<Badge>> {
        if !self.favorites.save_recipe(recipe) {
            return None;
        }
        self.gamification.refresh_daily_challenge();
        Some(self.gamification.log_recipe())
    }

    /// Generate today's plan for `goal` and save it to favorites. Returns
    /// `None` if that plan was already saved today.
    pub fn save_generated_plan(&mut self, goal: &str) -> Option<SavedWorkoutPlan> {
        let plan = catalog::generate_workout_plan(goal, self.clock.now(), self.clock.today());
        self.favorites.save_workout(plan.clone()).then_some(plan)
    }

    /// Add a glass of water, bring the hydration challenge up to today's
    /// glass count, and check the hydration badge against the run of days
    /// with the goal met.
    pub fn drink_water(&mut self) -> HydrationUpdate {
        self.gamification.refresh_daily_challenge();
        let log = self.wellness.add_water_glass();
        let challenge = self
            .gamification
            .sync_challenge_progress(ChallengeKind::Hydration, log.glasses);
        let unlocked = self
            .gamification
            .evaluate_hydration_badges(self.wellness.hydration_goal_streak());
        HydrationUpdate {
            log,
            challenge,
            unlocked,
        }
    }

    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        let state = self.gamification.state();
        let wellness = self.wellness.state();
        let hydration = self.wellness.todays_hydration();
        Dashboard {
            date: self.clock.today().format("%Y-%m-%d").to_string(),
            current_streak: state.current_streak,
            longest_streak: state.longest_streak,
            total_workouts_completed: state.total_workouts_completed,
            total_recipes_made: state.total_recipes_made,
            earned_badges: self.gamification.earned_badges().len(),
            total_badges: state.badges.len(),
            challenge: self.gamification.todays_challenge().cloned(),
            hydration_percent: hydration.progress_percent(),
            hydration,
            sleep: self.wellness.todays_sleep().cloned(),
            meditation_minutes: wellness.meditation_minutes,
            saved_recipes: self.favorites.recipes().len(),
            saved_workouts: self.favorites.workouts().len(),
            weekly_progress: state.weekly_progress.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{CHALLENGE_TEMPLATES, GamificationState, Nutrition};
    use crate::store::GAMIFICATION_KEY;
    use chrono::{NaiveDate, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Rc<MemoryStore>, Rc<FixedClock>, FitFeastService) {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::at_date(date(2024, 6, 15)));
        let svc = FitFeastService::new(store.clone(), clock.clone());
        (store, clock, svc)
    }

    /// Start from a stored state whose challenge for today is of `kind`.
    fn setup_with_challenge(kind: ChallengeKind) -> FitFeastService {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::at_date(date(2024, 6, 15)));
        let template = CHALLENGE_TEMPLATES.iter().find(|t| t.kind == kind).unwrap();
        let state = GamificationState {
            daily_challenges: vec![template.instantiate(clock.today())],
            ..GamificationState::default()
        };
        crate::store::set(store.as_ref(), GAMIFICATION_KEY, &state);
        FitFeastService::new(store, clock)
    }

    fn recipe(id: &str) -> SavedRecipe {
        SavedRecipe {
            id: id.to_string(),
            name: "Chickpea Salad".to_string(),
            prep_time: "15 min".to_string(),
            ingredients: vec![],
            instructions: vec![],
            nutrition: Nutrition::default(),
            image_url: None,
            saved_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_service_has_todays_challenge() {
        let (_, _, svc) = setup();
        let ch = svc.gamification().todays_challenge().unwrap();
        assert_eq!(ch.date, date(2024, 6, 15));
    }

    #[test]
    fn test_reopen_keeps_same_challenge() {
        let (store, clock, svc) = setup();
        let id = svc.gamification().todays_challenge().unwrap().id.clone();
        let again = FitFeastService::new(store, clock);
        assert_eq!(again.gamification().todays_challenge().unwrap().id, id);
    }

    #[test]
    fn test_seeded_engine() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let clock: Rc<dyn Clock> = Rc::new(FixedClock::at_date(date(2024, 6, 15)));
        let engine = GamificationEngine::load(store.clone(), clock.clone())
            .with_rng(StdRng::seed_from_u64(1));
        let svc = FitFeastService::with_engine(engine, store, clock);
        assert!(svc.gamification().todays_challenge().is_some());
    }

    #[test]
    fn test_complete_workout_updates_rollup() {
        let (_, _, mut svc) = setup();
        let unlocked = svc.complete_workout(320);
        assert!(unlocked.iter().any(|b| b.id == "first_workout"));
        svc.complete_workout(180);

        let dash = svc.dashboard();
        assert_eq!(dash.total_workouts_completed, 2);
        assert_eq!(dash.current_streak, 1);
        assert_eq!(dash.weekly_progress.len(), 1);
        assert_eq!(dash.weekly_progress[0].workouts, 2);
        assert_eq!(dash.weekly_progress[0].calories, 180);
    }

    #[test]
    fn test_save_recipe_counts_once() {
        let (_, _, mut svc) = setup();
        let unlocked = svc.save_recipe(recipe("r1")).unwrap();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first_recipe");

        assert!(svc.save_recipe(recipe("r1")).is_none());
        assert_eq!(svc.gamification().state().total_recipes_made, 1);
        assert_eq!(svc.favorites().recipes().len(), 1);
    }

    #[test]
    fn test_save_recipe_advances_recipe_challenge() {
        let mut svc = setup_with_challenge(ChallengeKind::Recipe);
        svc.save_recipe(recipe("r1"));
        assert!(svc.gamification().todays_challenge().unwrap().completed);
    }

    #[test]
    fn test_drink_water_advances_hydration_challenge() {
        let mut svc = setup_with_challenge(ChallengeKind::Hydration);
        let mut last = None;
        for _ in 0..8 {
            last = svc.drink_water().challenge;
        }
        let ch = last.unwrap();
        assert_eq!(ch.current, 8);
        assert!(ch.completed);
    }

    #[test]
    fn test_undoing_glasses_does_not_complete_hydration_challenge() {
        let mut svc = setup_with_challenge(ChallengeKind::Hydration);
        for _ in 0..8 {
            svc.drink_water();
            svc.wellness_mut().remove_water_glass();
        }

        assert_eq!(svc.wellness().todays_hydration().glasses, 0);
        let ch = svc.gamification().todays_challenge().unwrap();
        assert_eq!(ch.current, 1);
        assert!(!ch.completed);
    }

    #[test]
    fn test_hydration_hero_after_seven_days() {
        let (_, clock, mut svc) = setup();
        svc.wellness_mut().set_daily_water_goal(1);

        let mut unlocked = Vec::new();
        for _ in 0..7 {
            unlocked.extend(svc.drink_water().unlocked);
            clock.advance_days(1);
        }
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "hydration_hero");
    }

    #[test]
    fn test_dashboard_clamps_hydration_percent() {
        let (_, _, mut svc) = setup();
        for _ in 0..9 {
            svc.drink_water();
        }
        let dash = svc.dashboard();
        assert_eq!(dash.hydration.glasses, 9);
        assert!((dash.hydration_percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(dash.date, "2024-06-15");
    }

    #[test]
    fn test_opening_does_not_overwrite_newer_state() {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::at_date(date(2024, 6, 15)));
        let newer = r#"{"version":99,"data":{"future":true}}"#;
        store.insert_raw(GAMIFICATION_KEY, newer);

        let mut svc = FitFeastService::new(store.clone(), clock);
        assert!(svc.gamification().todays_challenge().is_some());
        let _ = svc.dashboard();
        assert_eq!(store.raw(GAMIFICATION_KEY).as_deref(), Some(newer));

        svc.complete_workout(100);
        assert_ne!(store.raw(GAMIFICATION_KEY).as_deref(), Some(newer));
    }

    #[test]
    fn test_save_generated_plan_uses_clock() {
        let (_, clock, mut svc) = setup();
        let plan = svc.save_generated_plan("endurance").unwrap();
        assert_eq!(plan.created_at, clock.now());
        assert_eq!(plan.id, "endurance-plan-2024-06-15");
        assert!(svc.save_generated_plan("endurance").is_none());

        clock.advance_days(1);
        svc.save_generated_plan("endurance").unwrap();
        assert_eq!(svc.favorites().workouts().len(), 2);
        assert_eq!(svc.favorites().workouts()[0].id, "endurance-plan-2024-06-16");
    }

    #[test]
    fn test_catalog_recipe_counts_toward_badges() {
        let (_, _, mut svc) = setup();
        let picks = catalog::match_recipes(&catalog::parse_ingredients("tofu"));
        let unlocked = svc.save_recipe(picks[0].to_saved(svc.now())).unwrap();
        assert_eq!(unlocked[0].id, "first_recipe");
        assert_eq!(svc.favorites().recipes()[0].id, "asian-stir-fry-bowl");
        assert!(svc.save_recipe(picks[0].to_saved(svc.now())).is_none());
    }

    #[test]
    fn test_in_memory_service() {
        let mut svc = FitFeastService::in_memory();
        svc.complete_workout(100);
        assert_eq!(svc.dashboard().total_workouts_completed, 1);
    }
}
