use std::rc::Rc;

use chrono::{Duration, NaiveDate};

use crate::clock::Clock;
use crate::models::{HydrationLog, SleepLog, SleepQuality, WellnessState};
use crate::store::{self, KeyValueStore, WELLNESS_KEY};

/// Maximum number of sleep entries kept.
pub const SLEEP_HISTORY_DAYS: usize = 30;

const MAX_SLEEP_HOURS: f64 = 24.0;

/// Hydration, sleep, and meditation logs for one installation.
pub struct WellnessEngine {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    state: WellnessState,
}

impl WellnessEngine {
    pub fn load(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        let state = store::get_or_default(store.as_ref(), WELLNESS_KEY, WellnessState::default());
        tracing::debug!(
            hydration_logs = state.hydration_logs.len(),
            sleep_logs = state.sleep_logs.len(),
            "loaded wellness state"
        );
        Self {
            store,
            clock,
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WellnessState {
        &self.state
    }

    // --- Hydration ---

    /// Today's entry, or an unsaved zero entry against the current goal.
    #[must_use]
    pub fn todays_hydration(&self) -> HydrationLog {
        let today = self.clock.today();
        self.hydration_on(today)
    }

    fn hydration_on(&self, date: NaiveDate) -> HydrationLog {
        self.state
            .hydration_logs
            .iter()
            .find(|l| l.date == date)
            .cloned()
            .unwrap_or_else(|| HydrationLog::empty(date, self.state.daily_water_goal))
    }

    pub fn add_water_glass(&mut self) -> HydrationLog {
        let today = self.clock.today();
        let goal = self.state.daily_water_goal;
        let logs = &mut self.state.hydration_logs;

        let log = if let Some(log) = logs.iter_mut().find(|l| l.date == today) {
            log.glasses = log.glasses.saturating_add(1);
            log.clone()
        } else {
            let log = HydrationLog {
                date: today,
                glasses: 1,
                goal,
            };
            logs.push(log.clone());
            log
        };
        self.persist();
        log
    }

    /// Take back one glass from today. Never goes below zero; with no entry
    /// for today nothing is written.
    pub fn remove_water_glass(&mut self) -> HydrationLog {
        let today = self.clock.today();
        let removed = match self.state.hydration_logs.iter_mut().find(|l| l.date == today) {
            Some(log) if log.glasses > 0 => {
                log.glasses -= 1;
                true
            }
            _ => false,
        };
        if removed {
            self.persist();
        }
        self.todays_hydration()
    }

    /// The trailing seven days ending today, oldest first. Days without a log
    /// are filled with zero entries against the current goal.
    #[must_use]
    pub fn weekly_hydration(&self) -> Vec<HydrationLog> {
        self.last_seven_days()
            .map(|date| self.hydration_on(date))
            .collect()
    }

    /// Consecutive days with the water goal met, ending today. If today's goal
    /// is not met yet the run may still end yesterday.
    #[must_use]
    pub fn hydration_goal_streak(&self) -> u32 {
        let today = self.clock.today();
        let met = |date: NaiveDate| {
            self.state
                .hydration_logs
                .iter()
                .any(|l| l.date == date && l.goal_met())
        };

        let mut day = if met(today) {
            today
        } else {
            today - Duration::days(1)
        };
        let mut streak = 0;
        while met(day) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }

    pub fn set_daily_water_goal(&mut self, glasses: u32) {
        self.state.daily_water_goal = glasses;
        self.persist();
    }

    /// Flip the reminder flag and return the new value.
    pub fn toggle_hydration_reminders(&mut self) -> bool {
        self.state.hydration_reminders = !self.state.hydration_reminders;
        self.persist();
        self.state.hydration_reminders
    }

    // --- Sleep ---

    /// Record last night's sleep under today's date, replacing any entry
    /// already logged today.
    pub fn log_sleep(
        &mut self,
        hours: f64,
        quality: SleepQuality,
        bed_time: &str,
        wake_time: &str,
    ) -> SleepLog {
        let today = self.clock.today();
        let log = SleepLog {
            date: today,
            hours: clamp_hours(hours),
            quality,
            bed_time: bed_time.to_string(),
            wake_time: wake_time.to_string(),
        };

        let logs = &mut self.state.sleep_logs;
        if let Some(existing) = logs.iter_mut().find(|l| l.date == today) {
            *existing = log.clone();
        } else {
            let keep = SLEEP_HISTORY_DAYS - 1;
            if logs.len() > keep {
                logs.drain(..logs.len() - keep);
            }
            logs.push(log.clone());
        }
        self.persist();
        log
    }

    #[must_use]
    pub fn todays_sleep(&self) -> Option<&SleepLog> {
        let today = self.clock.today();
        self.state.sleep_logs.iter().find(|l| l.date == today)
    }

    #[must_use]
    pub fn weekly_sleep(&self) -> Vec<SleepLog> {
        self.last_seven_days()
            .map(|date| {
                self.state
                    .sleep_logs
                    .iter()
                    .find(|l| l.date == date)
                    .cloned()
                    .unwrap_or_else(|| SleepLog::placeholder(date))
            })
            .collect()
    }

    /// Mean hours over the days of the past week that have a sleep log.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_sleep_hours(&self) -> Option<f64> {
        let days: Vec<NaiveDate> = self.last_seven_days().collect();
        let hours: Vec<f64> = self
            .state
            .sleep_logs
            .iter()
            .filter(|l| days.contains(&l.date))
            .map(|l| l.hours)
            .collect();
        if hours.is_empty() {
            return None;
        }
        Some(hours.iter().sum::<f64>() / hours.len() as f64)
    }

    pub fn set_daily_sleep_goal(&mut self, hours: u32) {
        self.state.daily_sleep_goal = hours;
        self.persist();
    }

    // --- Meditation ---

    pub fn add_meditation_minutes(&mut self, minutes: u32) -> u64 {
        self.state.meditation_minutes = self
            .state
            .meditation_minutes
            .saturating_add(u64::from(minutes));
        self.persist();
        self.state.meditation_minutes
    }

    fn last_seven_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let today = self.clock.today();
        (0..7).rev().map(move |i| today - Duration::days(i))
    }

    fn persist(&self) {
        store::set(self.store.as_ref(), WELLNESS_KEY, &self.state);
    }
}

fn clamp_hours(hours: f64) -> f64 {
    if hours.is_finite() {
        hours.clamp(0.0, MAX_SLEEP_HOURS)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Rc<MemoryStore>, Rc<FixedClock>, WellnessEngine) {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::at_date(date(2024, 6, 15)));
        let engine = WellnessEngine::load(store.clone(), clock.clone());
        (store, clock, engine)
    }

    #[test]
    fn test_todays_hydration_does_not_persist() {
        let (store, _, engine) = setup();
        let log = engine.todays_hydration();
        assert_eq!(log.date, date(2024, 6, 15));
        assert_eq!(log.glasses, 0);
        assert_eq!(log.goal, 8);
        assert!(engine.state().hydration_logs.is_empty());
        assert!(store.raw(WELLNESS_KEY).is_none());
    }

    #[test]
    fn test_add_and_remove_water_glass() {
        let (_, _, mut engine) = setup();
        engine.add_water_glass();
        engine.add_water_glass();
        assert_eq!(engine.todays_hydration().glasses, 2);

        engine.add_water_glass();
        engine.remove_water_glass();
        assert_eq!(engine.todays_hydration().glasses, 2);
        assert_eq!(engine.state().hydration_logs.len(), 1);
    }

    #[test]
    fn test_remove_water_glass_without_entry_is_noop() {
        let (store, _, mut engine) = setup();
        let before = engine.state().clone();
        let log = engine.remove_water_glass();
        assert_eq!(log.glasses, 0);
        assert_eq!(engine.state(), &before);
        assert!(store.raw(WELLNESS_KEY).is_none());
    }

    #[test]
    fn test_remove_water_glass_stops_at_zero() {
        let (_, _, mut engine) = setup();
        engine.add_water_glass();
        engine.remove_water_glass();
        let before = engine.state().clone();
        engine.remove_water_glass();
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.todays_hydration().glasses, 0);
    }

    #[test]
    fn test_nine_glasses_over_goal_of_eight() {
        let (_, _, mut engine) = setup();
        for _ in 0..9 {
            engine.add_water_glass();
        }
        let today = engine.todays_hydration();
        assert_eq!(today.glasses, 9);
        assert_eq!(today.goal, 8);
        assert!(f64::from(today.glasses) / f64::from(today.goal) * 100.0 > 100.0);
        assert!((today.progress_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weekly_hydration_is_always_seven_days() {
        let (_, clock, mut engine) = setup();
        engine.add_water_glass();
        clock.advance_days(2);
        engine.add_water_glass();
        engine.add_water_glass();

        let week = engine.weekly_hydration();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2024, 6, 11));
        assert_eq!(week[6].date, date(2024, 6, 17));
        assert_eq!(week[4].glasses, 1);
        assert_eq!(week[5].glasses, 0);
        assert_eq!(week[6].glasses, 2);
        assert_eq!(engine.state().hydration_logs.len(), 2);
    }

    #[test]
    fn test_water_goal_applies_to_new_entries_only() {
        let (_, clock, mut engine) = setup();
        engine.add_water_glass();
        engine.set_daily_water_goal(10);
        assert_eq!(engine.todays_hydration().goal, 8);

        clock.advance_days(1);
        assert_eq!(engine.todays_hydration().goal, 10);
        engine.add_water_glass();
        assert_eq!(engine.todays_hydration().goal, 10);
        assert_eq!(engine.weekly_hydration()[5].goal, 8);
    }

    #[test]
    fn test_hydration_goal_streak() {
        let (_, clock, mut engine) = setup();
        engine.set_daily_water_goal(2);
        for _ in 0..3 {
            engine.add_water_glass();
            engine.add_water_glass();
            clock.advance_days(1);
        }
        // Today has nothing yet; the run ending yesterday still counts
        assert_eq!(engine.hydration_goal_streak(), 3);

        engine.add_water_glass();
        assert_eq!(engine.hydration_goal_streak(), 3);
        engine.add_water_glass();
        assert_eq!(engine.hydration_goal_streak(), 4);

        clock.advance_days(2);
        assert_eq!(engine.hydration_goal_streak(), 0);
    }

    #[test]
    fn test_toggle_hydration_reminders() {
        let (_, _, mut engine) = setup();
        assert!(!engine.toggle_hydration_reminders());
        assert!(engine.toggle_hydration_reminders());
    }

    #[test]
    fn test_log_sleep_replaces_same_day() {
        let (_, _, mut engine) = setup();
        engine.log_sleep(6.5, SleepQuality::Fair, "23:30", "06:00");
        engine.log_sleep(7.5, SleepQuality::Good, "22:30", "06:00");

        assert_eq!(engine.state().sleep_logs.len(), 1);
        let today = engine.todays_sleep().unwrap();
        assert!((today.hours - 7.5).abs() < f64::EPSILON);
        assert_eq!(today.quality, SleepQuality::Good);
        assert_eq!(today.bed_time, "22:30");
    }

    #[test]
    fn test_todays_sleep_is_none_without_entry() {
        let (_, _, engine) = setup();
        assert!(engine.todays_sleep().is_none());
    }

    #[test]
    fn test_sleep_history_is_bounded() {
        let (_, clock, mut engine) = setup();
        for _ in 0..35 {
            engine.log_sleep(8.0, SleepQuality::Good, "22:00", "06:00");
            clock.advance_days(1);
        }
        let logs = &engine.state().sleep_logs;
        assert_eq!(logs.len(), SLEEP_HISTORY_DAYS);
        assert_eq!(logs[0].date, date(2024, 6, 15) + Duration::days(5));
    }

    #[test]
    fn test_weekly_sleep_placeholders() {
        let (_, _, mut engine) = setup();
        engine.log_sleep(7.0, SleepQuality::Excellent, "23:00", "06:00");

        let week = engine.weekly_sleep();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], SleepLog::placeholder(date(2024, 6, 9)));
        assert_eq!(week[0].quality, SleepQuality::Fair);
        assert_eq!(week[6].quality, SleepQuality::Excellent);
    }

    #[test]
    fn test_average_sleep_hours() {
        let (_, clock, mut engine) = setup();
        assert!(engine.average_sleep_hours().is_none());
        engine.log_sleep(6.0, SleepQuality::Poor, "", "");
        clock.advance_days(1);
        engine.log_sleep(8.0, SleepQuality::Good, "", "");
        let avg = engine.average_sleep_hours().unwrap();
        assert!((avg - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sleep_hours_are_clamped() {
        let (_, clock, mut engine) = setup();
        assert!((engine.log_sleep(-3.0, SleepQuality::Poor, "", "").hours - 0.0).abs() < f64::EPSILON);
        clock.advance_days(1);
        assert!((engine.log_sleep(30.0, SleepQuality::Poor, "", "").hours - 24.0).abs() < f64::EPSILON);
        clock.advance_days(1);
        assert!((engine.log_sleep(f64::NAN, SleepQuality::Poor, "", "").hours - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_meditation_minutes_accumulate() {
        let (_, _, mut engine) = setup();
        assert_eq!(engine.add_meditation_minutes(10), 10);
        assert_eq!(engine.add_meditation_minutes(0), 10);
        assert_eq!(engine.add_meditation_minutes(15), 25);
    }

    #[test]
    fn test_wellness_state_reloads() {
        let (store, clock, mut engine) = setup();
        engine.add_water_glass();
        engine.log_sleep(7.0, SleepQuality::Good, "23:00", "06:00");
        engine.add_meditation_minutes(5);
        engine.set_daily_sleep_goal(9);

        let reloaded = WellnessEngine::load(store, clock);
        assert_eq!(reloaded.state(), engine.state());
        assert_eq!(reloaded.state().daily_sleep_goal, 9);
    }
}
