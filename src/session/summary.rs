use super::round::RoundResult;
use serde::{Deserialize, Serialize};

/// Running totals for a session. Only grows while a game is in progress;
/// points saturate at `u32::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTally {
    pub total_points: u32,
    pub total_distance_m: f64,
    pub correct_rounds: usize,
    pub history: Vec<RoundResult>,
}

impl GameTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &RoundResult) {
        self.total_points = self.total_points.saturating_add(result.total_points);
        if let Some(d) = result.distance_m {
            self.total_distance_m += d;
        }
        if result.success {
            self.correct_rounds += 1;
        }
        self.history.push(result.clone());
    }

    /// Highest scoring round so far.
    pub fn best_round(&self) -> Option<&RoundResult> {
        self.history.iter().max_by_key(|r| r.total_points)
    }

    /// Lowest scoring round so far.
    pub fn worst_round(&self) -> Option<&RoundResult> {
        self.history.iter().min_by_key(|r| r.total_points)
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_points: u32,
    pub total_distance_m: f64,
    pub correct_rounds: usize,
    pub round_count: usize,
    pub best_streak: u32,
    pub rounds: Vec<RoundResult>,
}

impl Summary {
    pub fn from_tally(tally: &GameTally, best_streak: u32) -> Self {
        Self {
            total_points: tally.total_points,
            total_distance_m: tally.total_distance_m,
            correct_rounds: tally.correct_rounds,
            round_count: tally.history.len(),
            best_streak,
            rounds: tally.history.clone(),
        }
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m / 1000.0
    }

    pub fn describe(&self) -> String {
        format!(
            "You scored {} points ({} of {} correct). Total distance: {:.2} km.",
            self.total_points,
            self.correct_rounds,
            self.round_count,
            self.total_distance_km()
        )
    }
}
