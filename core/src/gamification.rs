use std::rc::Rc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Clock;
use crate::models::{
    Badge, BadgeKind, CHALLENGE_TEMPLATES, ChallengeKind, DailyChallenge, GamificationState,
    WeeklyProgress,
};
use crate::store::{self, GAMIFICATION_KEY, KeyValueStore, Loaded};

/// Number of distinct days kept in the weekly rollup.
pub const WEEKLY_WINDOW: usize = 7;

/// Streaks, badges, daily challenges, and the weekly rollup.
///
/// The aggregate is loaded once on construction and written back to the store
/// after every mutation. Reads are served from memory.
pub struct GamificationEngine {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    rng: StdRng,
    state: GamificationState,
    /// Set while the stored document could not be read. The daily refresh
    /// leaves it in place; the first real mutation replaces it.
    stored_unusable: bool,
}

impl GamificationEngine {
    pub fn load(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        let (state, stored_unusable) = match store::load(store.as_ref(), GAMIFICATION_KEY) {
            Loaded::Found(state) => (state, false),
            Loaded::Missing => (GamificationState::default(), false),
            Loaded::Unusable => (GamificationState::default(), true),
        };
        tracing::debug!(
            streak = state.current_streak,
            workouts = state.total_workouts_completed,
            "loaded gamification state"
        );
        Self {
            store,
            clock,
            rng: StdRng::from_os_rng(),
            state,
            stored_unusable,
        }
    }

    /// Replace the challenge RNG, e.g. with a seeded one for reproducible picks.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn state(&self) -> &GamificationState {
        &self.state
    }

    pub fn earned_badges(&self) -> Vec<&Badge> {
        self.state.badges.iter().filter(|b| b.is_earned()).collect()
    }

    pub fn unearned_badges(&self) -> Vec<&Badge> {
        self.state.badges.iter().filter(|b| !b.is_earned()).collect()
    }

    #[must_use]
    pub fn todays_challenge(&self) -> Option<&DailyChallenge> {
        let today = self.clock.today();
        self.state.daily_challenges.iter().find(|c| c.date == today)
    }

    // --- Streak ---

    /// Record activity for today. Repeated calls on the same day are no-ops.
    /// Returns any streak badges unlocked by this call.
    pub fn update_streak(&mut self) -> Vec<Badge> {
        let unlocked = self.apply_streak();
        self.persist();
        unlocked
    }

    fn apply_streak(&mut self) -> Vec<Badge> {
        let today = self.clock.today();
        let yesterday = self.clock.yesterday();

        let new_streak = match self.state.last_active_date {
            Some(last) if last == today => return Vec::new(),
            Some(last) if last == yesterday => self.state.current_streak.saturating_add(1),
            _ => 1,
        };

        self.state.current_streak = new_streak;
        self.state.longest_streak = self.state.longest_streak.max(new_streak);
        self.state.last_active_date = Some(today);
        tracing::debug!(streak = new_streak, longest = self.state.longest_streak, "streak updated");

        let now = self.clock.now();
        unlock_badges(&mut self.state.badges, BadgeKind::Streak, new_streak, now)
    }

    // --- Counters ---

    /// Count a completed workout: bump the total, unlock workout badges,
    /// advance today's workout challenge, then update the streak.
    /// Returns every badge unlocked along the way.
    pub fn log_workout(&mut self) -> Vec<Badge> {
        let now = self.clock.now();
        self.state.total_workouts_completed = self.state.total_workouts_completed.saturating_add(1);
        let mut unlocked = unlock_badges(
            &mut self.state.badges,
            BadgeKind::Workouts,
            self.state.total_workouts_completed,
            now,
        );
        self.advance_challenge(ChallengeKind::Workout, 1);
        unlocked.extend(self.apply_streak());
        self.persist();
        unlocked
    }

    /// Count a saved recipe: bump the total, unlock recipe badges, and advance
    /// today's recipe challenge. Does not touch the streak.
    pub fn log_recipe(&mut self) -> Vec<Badge> {
        let now = self.clock.now();
        self.state.total_recipes_made = self.state.total_recipes_made.saturating_add(1);
        let unlocked = unlock_badges(
            &mut self.state.badges,
            BadgeKind::Recipes,
            self.state.total_recipes_made,
            now,
        );
        self.advance_challenge(ChallengeKind::Recipe, 1);
        self.persist();
        unlocked
    }

    /// Unlock hydration badges against a count of consecutive days on which
    /// the water goal was met.
    pub fn evaluate_hydration_badges(&mut self, days_goal_met: u32) -> Vec<Badge> {
        let now = self.clock.now();
        let unlocked = unlock_badges(&mut self.state.badges, BadgeKind::Hydration, days_goal_met, now);
        if !unlocked.is_empty() {
            self.persist();
        }
        unlocked
    }

    // --- Daily challenge ---

    /// Add `amount` to today's challenge of `kind`, if one exists.
    /// Returns the updated challenge.
    pub fn record_challenge_progress(&mut self, kind: ChallengeKind, amount: u32) -> Option<DailyChallenge> {
        let updated = self.advance_challenge(kind, amount);
        if updated.is_some() {
            self.persist();
        }
        updated
    }

    /// Raise today's challenge of `kind` to a measured total, e.g. glasses
    /// drunk so far. Progress never goes down. Returns the challenge if one
    /// of `kind` exists today.
    pub fn sync_challenge_progress(&mut self, kind: ChallengeKind, total: u32) -> Option<DailyChallenge> {
        let before = self.todays_challenge().filter(|c| c.kind == kind).map(|c| c.current);
        let updated = self.update_challenge(kind, |c| c.raise_to(total));
        if updated.as_ref().map(|c| c.current) != before {
            self.persist();
        }
        updated
    }

    fn advance_challenge(&mut self, kind: ChallengeKind, amount: u32) -> Option<DailyChallenge> {
        self.update_challenge(kind, |c| c.advance(amount))
    }

    fn update_challenge(
        &mut self,
        kind: ChallengeKind,
        apply: impl FnOnce(&mut DailyChallenge),
    ) -> Option<DailyChallenge> {
        let today = self.clock.today();
        let challenge = self
            .state
            .daily_challenges
            .iter_mut()
            .find(|c| c.kind == kind && c.date == today)?;
        let was_completed = challenge.completed;
        apply(challenge);
        if challenge.completed && !was_completed {
            tracing::info!(title = %challenge.title, "daily challenge completed");
        }
        Some(challenge.clone())
    }

    /// Make sure a challenge exists for today. An existing one, and its
    /// progress, is kept for the rest of the day.
    pub fn refresh_daily_challenge(&mut self) -> &DailyChallenge {
        let today = self.clock.today();
        if let Some(idx) = self.state.daily_challenges.iter().position(|c| c.date == today) {
            return &self.state.daily_challenges[idx];
        }

        let template = &CHALLENGE_TEMPLATES[self.rng.random_range(0..CHALLENGE_TEMPLATES.len())];
        let challenge = template.instantiate(today);
        tracing::debug!(title = %challenge.title, %today, "new daily challenge");
        self.state.daily_challenges = vec![challenge];
        if self.stored_unusable {
            tracing::debug!("stored state unusable, keeping it until the next change");
        } else {
            self.persist();
        }
        &self.state.daily_challenges[0]
    }

    // --- Weekly rollup ---

    /// Fold today's numbers into the rollup. Workouts accumulate; calories
    /// overwrite. A new day evicts the oldest entries beyond the window.
    pub fn add_weekly_progress(&mut self, workouts: u32, calories: u32) {
        let today = self.clock.today();
        let progress = &mut self.state.weekly_progress;

        if let Some(entry) = progress.iter_mut().find(|p| p.date == today) {
            entry.workouts = entry.workouts.saturating_add(workouts);
            entry.calories = calories;
        } else {
            let keep = WEEKLY_WINDOW - 1;
            if progress.len() > keep {
                progress.drain(..progress.len() - keep);
            }
            progress.push(WeeklyProgress {
                date: today,
                workouts,
                calories,
            });
        }
        self.persist();
    }

    fn persist(&mut self) {
        store::set(self.store.as_ref(), GAMIFICATION_KEY, &self.state);
        self.stored_unusable = false;
    }
}

/// Earn every unearned badge of `kind` whose requirement `counter` meets.
/// Each badge is checked on its own, so one call can unlock several.
fn unlock_badges(badges: &mut [Badge], kind: BadgeKind, counter: u32, now: DateTime<Utc>) -> Vec<Badge> {
    let mut unlocked = Vec::new();
    for badge in badges
        .iter_mut()
        .filter(|b| b.kind == kind && !b.is_earned() && counter >= b.requirement)
    {
        badge.earned_at = Some(now);
        tracing::info!(badge = %badge.id, "badge unlocked");
        unlocked.push(badge.clone());
    }
    unlocked
}
