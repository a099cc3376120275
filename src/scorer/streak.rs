//! Consecutive-success tracking.

use crate::consts::{STREAK_BONUS_CAP, STREAK_BONUS_STEP};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakTracker {
    streak: u32,
    best: u32,
    step: u32,
    cap: u32,
}

impl Default for StreakTracker {
    fn default() -> Self {
        Self::new(STREAK_BONUS_STEP, STREAK_BONUS_CAP)
    }
}

impl StreakTracker {
    pub fn new(step: u32, cap: u32) -> Self {
        Self {
            streak: 0,
            best: 0,
            step,
            cap,
        }
    }

    pub fn current(&self) -> u32 {
        self.streak
    }

    /// Longest streak since the last reset.
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Applies one completed round and returns the new streak.
    pub fn record(&mut self, success: bool) -> u32 {
        if success {
            self.streak += 1;
            self.best = self.best.max(self.streak);
        } else {
            self.streak = 0;
        }
        self.streak
    }

    pub fn bonus_for(&self, streak: u32) -> u32 {
        streak.saturating_mul(self.step).min(self.cap)
    }

    pub fn current_bonus(&self) -> u32 {
        self.bonus_for(self.streak)
    }

    pub fn reset(&mut self) {
        self.streak = 0;
        self.best = 0;
    }
}
