use super::{Accuracy, Evaluation, ScoringStrategy};
use crate::config::GameConfig;
use crate::consts::SUCCESS_THRESHOLD;
use crate::error::GameResult;
use crate::geometry::{self, Coordinate, MapScale};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A scoring bracket: every distance up to and including `max_distance_m`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub max_distance_m: f64,
    pub base_points: u32,
    pub label: Accuracy,
}

/// Ascending by distance. Anything past the last tier is `WayOff` for 0.
pub const DEFAULT_TIERS: [Tier; 4] = [
    Tier {
        max_distance_m: 100.0,
        base_points: 100,
        label: Accuracy::Perfect,
    },
    Tier {
        max_distance_m: 250.0,
        base_points: 70,
        label: Accuracy::VeryClose,
    },
    Tier {
        max_distance_m: 500.0,
        base_points: 40,
        label: Accuracy::GoodGuess,
    },
    Tier {
        max_distance_m: 1000.0,
        base_points: 10,
        label: Accuracy::OffABit,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierScore {
    pub base_points: u32,
    pub label: Accuracy,
}

const WAY_OFF: TierScore = TierScore {
    base_points: 0,
    label: Accuracy::WayOff,
};

/// Looks up the default tier table. Boundaries belong to the stricter tier.
pub fn score_for(distance_m: f64) -> TierScore {
    lookup(&DEFAULT_TIERS, distance_m)
}

fn lookup(tiers: &[Tier], distance_m: f64) -> TierScore {
    tiers
        .iter()
        .find(|t| distance_m <= t.max_distance_m)
        .map(|t| TierScore {
            base_points: t.base_points,
            label: t.label,
        })
        .unwrap_or(WAY_OFF)
}

/// Distance-tiered scoring (the point scheme).
#[derive(Debug, Clone)]
pub struct TieredScoring {
    tiers: Vec<Tier>,
    success_threshold: u32,
    scale: MapScale,
}

impl Default for TieredScoring {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS.to_vec(),
            success_threshold: SUCCESS_THRESHOLD,
            scale: MapScale::default(),
        }
    }
}

impl TieredScoring {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            tiers: DEFAULT_TIERS.to_vec(),
            success_threshold: config.success_threshold,
            scale: config.map_scale(),
        }
    }

    /// Custom table. Tiers are sorted ascending by distance.
    pub fn with_tiers(mut tiers: Vec<Tier>, success_threshold: u32) -> Self {
        tiers.sort_by(|a, b| a.max_distance_m.total_cmp(&b.max_distance_m));
        Self {
            tiers,
            success_threshold,
            scale: MapScale::default(),
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn score_for(&self, distance_m: f64) -> TierScore {
        lookup(&self.tiers, distance_m)
    }
}

impl ScoringStrategy for TieredScoring {
    fn name(&self) -> &'static str {
        "tiered"
    }

    fn evaluate(&self, guess: &Coordinate, target: &Coordinate) -> GameResult<Evaluation> {
        let distance_m = geometry::distance(guess, target, &self.scale)?;
        let TierScore { base_points, label } = self.score_for(distance_m);
        debug!(distance_m, base_points, %label, "tiered evaluation");
        Ok(Evaluation {
            distance_m,
            base_points,
            label,
            success: base_points >= self.success_threshold,
        })
    }
}
