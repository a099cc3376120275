use super::{Accuracy, Evaluation, ScoringStrategy};
use crate::config::GameConfig;
use crate::consts::BINARY_THRESHOLD_PCT;
use crate::error::GameResult;
use crate::geometry::{self, Coordinate, MapScale};
use tracing::debug;

/// Legacy campus-map scoring: a guess is either correct (+1) or not. The
/// radius is exclusive, so a guess exactly `threshold_pct` away is wrong.
///
/// Correctness is decided in percentage units of the map image; the reported
/// distance still goes through the km scale so totals stay in meters.
#[derive(Debug, Clone)]
pub struct BinaryScoring {
    pub threshold_pct: f64,
    pub scale: MapScale,
}

impl Default for BinaryScoring {
    fn default() -> Self {
        Self {
            threshold_pct: BINARY_THRESHOLD_PCT,
            scale: MapScale::default(),
        }
    }
}

impl BinaryScoring {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            threshold_pct: config.binary_threshold_pct,
            scale: config.map_scale(),
        }
    }
}

impl ScoringStrategy for BinaryScoring {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn evaluate(&self, guess: &Coordinate, target: &Coordinate) -> GameResult<Evaluation> {
        let pct = geometry::percent_distance(guess, target)?;
        let distance_m = geometry::distance(guess, target, &self.scale)?;
        let correct = pct < self.threshold_pct;
        debug!(pct, distance_m, correct, "binary evaluation");

        Ok(Evaluation {
            distance_m,
            base_points: u32::from(correct),
            label: if correct {
                Accuracy::Correct
            } else {
                Accuracy::Wrong
            },
            success: correct,
        })
    }

    fn supports(&self, coordinate: &Coordinate) -> bool {
        matches!(coordinate, Coordinate::Planar { .. })
    }

    fn awards_streak_bonus(&self) -> bool {
        false
    }
}
