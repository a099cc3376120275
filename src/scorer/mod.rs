pub mod streak;
pub mod threshold;
pub mod tiers;

pub use self::streak::StreakTracker;
pub use self::threshold::BinaryScoring;
pub use self::tiers::{score_for, Tier, TierScore, TieredScoring, DEFAULT_TIERS};

use crate::config::{GameConfig, ScoringMode};
use crate::error::GameResult;
use crate::geometry::Coordinate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Qualitative accuracy of a round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum Accuracy {
    #[strum(serialize = "Perfect")]
    Perfect,
    #[strum(serialize = "Very Close")]
    VeryClose,
    #[strum(serialize = "Good Guess")]
    GoodGuess,
    #[strum(serialize = "Off a Bit")]
    OffABit,
    #[strum(serialize = "Way Off")]
    WayOff,
    #[strum(serialize = "Correct")]
    Correct,
    #[strum(serialize = "Wrong")]
    Wrong,
    #[strum(serialize = "No Guess")]
    NoGuess,
}

/// What a strategy decides about a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Always meters, whatever the strategy measures internally.
    pub distance_m: f64,
    pub base_points: u32,
    pub label: Accuracy,
    /// Whether the round counts toward a streak.
    pub success: bool,
}

/// Turns a locked guess into points.
pub trait ScoringStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, guess: &Coordinate, target: &Coordinate) -> GameResult<Evaluation>;

    fn awards_streak_bonus(&self) -> bool {
        true
    }

    /// Whether `evaluate` can score targets of this coordinate kind.
    fn supports(&self, _coordinate: &Coordinate) -> bool {
        true
    }
}

pub fn build_strategy(config: &GameConfig) -> Box<dyn ScoringStrategy> {
    match config.mode {
        ScoringMode::Tiered => Box::new(TieredScoring::from_config(config)),
        ScoringMode::Binary => Box::new(BinaryScoring::from_config(config)),
    }
}
