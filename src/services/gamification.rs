// Gamification store
// XP with derived level, day streak, daily goal and the achievement
// catalog. Level is recomputed from XP on every change, never stored
// authoritatively on its own.

use chrono::{DateTime, Utc};

use crate::models::{Achievement, AchievementKind, GamificationData};
use crate::storage::{Storage, StorageResult};

const STORE_KEY: &str = "wordforge-gamification";

pub const DEFAULT_DAILY_GOAL: u32 = 20;

const SECONDS_PER_DAY: i64 = 86_400;

/// Seed catalog. Unlock state lives on the entries themselves; the
/// catalog is fixed after the first initialization.
fn initial_achievements() -> Vec<Achievement> {
    fn entry(
        id: &str,
        title: &str,
        description: &str,
        icon: &str,
        requirement: u32,
        kind: AchievementKind,
    ) -> Achievement {
        Achievement {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked_at: None,
            is_unlocked: false,
            requirement,
            progress: 0,
            kind,
        }
    }

    vec![
        entry(
            "first-word",
            "First Steps",
            "Learn your first word",
            "🎯",
            1,
            AchievementKind::WordsLearned,
        ),
        entry(
            "10-words",
            "Word Explorer",
            "Learn 10 words",
            "📚",
            10,
            AchievementKind::WordsLearned,
        ),
        entry(
            "100-words",
            "Word Master",
            "Learn 100 words",
            "🏆",
            100,
            AchievementKind::WordsLearned,
        ),
        entry(
            "7-day-streak",
            "Week Warrior",
            "Maintain a 7-day streak",
            "🔥",
            7,
            AchievementKind::Streak,
        ),
        entry(
            "30-day-streak",
            "Month Master",
            "Maintain a 30-day streak",
            "⭐",
            30,
            AchievementKind::Streak,
        ),
        entry(
            "100-verbs",
            "Verb Virtuoso",
            "Master 100 irregular verbs",
            "✨",
            100,
            AchievementKind::VerbsLearned,
        ),
    ]
}

fn level_for_xp(xp: i64) -> i64 {
    xp.div_euclid(100) + 1
}

fn default_state() -> GamificationData {
    GamificationData {
        xp: 0,
        streak: 0,
        last_active_date: Utc::now(),
        daily_goal: DEFAULT_DAILY_GOAL,
        daily_progress: 0,
        achievements: Vec::new(),
        level: 1,
    }
}

pub struct GamificationStore {
    storage: Storage,
    state: GamificationData,
}

impl GamificationStore {
    pub fn load(storage: Storage) -> StorageResult<Self> {
        let state = storage
            .load::<GamificationData>(STORE_KEY)?
            .unwrap_or_else(default_state);
        Ok(Self { storage, state })
    }

    pub fn data(&self) -> &GamificationData {
        &self.state
    }

    pub fn xp(&self) -> i64 {
        self.state.xp
    }

    pub fn level(&self) -> i64 {
        self.state.level
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    pub fn daily_goal(&self) -> u32 {
        self.state.daily_goal
    }

    pub fn daily_progress(&self) -> u32 {
        self.state.daily_progress
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.state.achievements
    }

    /// Seed the achievement catalog on a pristine store (no XP, empty
    /// catalog). A returning user's persisted state is left untouched,
    /// whatever it holds.
    pub fn initialize_gamification(&mut self) -> StorageResult<()> {
        if self.state.xp != 0 || !self.state.achievements.is_empty() {
            return Ok(());
        }

        log::debug!("seeding achievement catalog");

        let mut state = self.state.clone();
        state.achievements = initial_achievements();
        state.last_active_date = Utc::now();

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// Add (or subtract, for penalties) XP and recompute the level.
    /// Callers keep the balance non-negative; the store does not clamp.
    pub fn add_xp(&mut self, amount: i64) -> StorageResult<()> {
        let mut state = self.state.clone();
        state.xp += amount;
        state.level = level_for_xp(state.xp);

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// Advance or reset the streak based on wall-clock time elapsed
    /// since the last active date.
    ///
    /// Same day: unchanged, so repeated calls cannot inflate the streak.
    /// Exactly one day: streak + 1. Anything else, including a clock
    /// that moved backwards: back to 1, today counting as day one.
    pub fn update_streak(&mut self) -> StorageResult<()> {
        self.update_streak_at(Utc::now())
    }

    fn update_streak_at(&mut self, today: DateTime<Utc>) -> StorageResult<()> {
        let elapsed = today - self.state.last_active_date;
        let diff_days = elapsed.num_seconds().div_euclid(SECONDS_PER_DAY);

        if diff_days == 0 {
            return Ok(());
        }

        let mut state = self.state.clone();
        state.streak = if diff_days == 1 { state.streak + 1 } else { 1 };
        state.last_active_date = today;

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// Advance today's progress, clamped at the daily goal. Overflow is
    /// dropped, not carried into the next day.
    pub fn update_daily_progress(&mut self, amount: u32) -> StorageResult<()> {
        let mut state = self.state.clone();
        state.daily_progress = (state.daily_progress + amount).min(state.daily_goal);

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// Zero today's progress. The store never calls this by itself; the
    /// embedding host is responsible for invoking it at its day
    /// boundary.
    pub fn reset_daily_progress(&mut self) -> StorageResult<()> {
        let mut state = self.state.clone();
        state.daily_progress = 0;

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// Unlock the matching achievement, stamping `unlocked_at` once.
    /// Already-unlocked entries and unknown ids are left as they are.
    pub fn unlock_achievement(&mut self, id: &str) -> StorageResult<()> {
        let Some(index) = self
            .state
            .achievements
            .iter()
            .position(|a| a.id == id && !a.is_unlocked)
        else {
            return Ok(());
        };

        let mut state = self.state.clone();
        state.achievements[index].is_unlocked = true;
        state.achievements[index].unlocked_at = Some(Utc::now());

        self.storage.save(STORE_KEY, &state)?;
        self.state = state;
        Ok(())
    }

    /// Hook for the quiz flows to evaluate achievement progress after an
    /// answer. Unlocking beyond the seed catalog happens through
    /// `unlock_achievement`; nothing is evaluated here yet.
    pub fn check_achievements(&self) {}
}
