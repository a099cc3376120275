use crate::consts::{
    BINARY_THRESHOLD_PCT, DEFAULT_MAP_HEIGHT_KM, DEFAULT_MAP_WIDTH_KM, DEFAULT_ROUNDS,
    LEADERBOARD_MIN_CORRECT, MAX_NAME_LEN, STREAK_BONUS_CAP, STREAK_BONUS_STEP,
    SUCCESS_THRESHOLD,
};
use crate::error::{GameError, GameResult};
use crate::geometry::MapScale;
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Distance tiers worth 0-100 points.
    Tiered,
    /// Legacy campus map: within the threshold is +1, otherwise 0.
    Binary,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === GAME ===
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,
    #[arg(long, value_enum, default_value_t = ScoringMode::Tiered)]
    pub mode: ScoringMode,

    // === STREAKS ===
    #[arg(long, default_value_t = SUCCESS_THRESHOLD)]
    pub success_threshold: u32,
    #[arg(long, default_value_t = STREAK_BONUS_STEP)]
    pub streak_bonus_step: u32,
    #[arg(long, default_value_t = STREAK_BONUS_CAP)]
    pub streak_bonus_cap: u32,

    // === LEGACY MAP ===
    #[arg(long, default_value_t = BINARY_THRESHOLD_PCT)]
    pub binary_threshold_pct: f64,
    #[arg(long, default_value_t = DEFAULT_MAP_WIDTH_KM)]
    pub map_width_km: f64,
    #[arg(long, default_value_t = DEFAULT_MAP_HEIGHT_KM)]
    pub map_height_km: f64,

    // === LEADERBOARD ===
    #[arg(long, default_value_t = LEADERBOARD_MIN_CORRECT)]
    pub leaderboard_min_correct: usize,
    #[arg(long, default_value_t = MAX_NAME_LEN)]
    pub max_name_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            mode: ScoringMode::Tiered,
            success_threshold: SUCCESS_THRESHOLD,
            streak_bonus_step: STREAK_BONUS_STEP,
            streak_bonus_cap: STREAK_BONUS_CAP,
            binary_threshold_pct: BINARY_THRESHOLD_PCT,
            map_width_km: DEFAULT_MAP_WIDTH_KM,
            map_height_km: DEFAULT_MAP_HEIGHT_KM,
            leaderboard_min_correct: LEADERBOARD_MIN_CORRECT,
            max_name_len: MAX_NAME_LEN,
        }
    }
}

impl GameConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.rounds == 0 {
            return Err(GameError::Config("rounds must be at least 1".to_string()));
        }
        if !(self.map_width_km.is_finite() && self.map_width_km > 0.0)
            || !(self.map_height_km.is_finite() && self.map_height_km > 0.0)
        {
            return Err(GameError::Config(format!(
                "map size must be positive, got {} x {} km",
                self.map_width_km, self.map_height_km
            )));
        }
        if !(self.binary_threshold_pct.is_finite() && self.binary_threshold_pct >= 0.0) {
            return Err(GameError::Config(format!(
                "binary threshold must be a non-negative number, got {}",
                self.binary_threshold_pct
            )));
        }
        if self.streak_bonus_step > self.streak_bonus_cap {
            return Err(GameError::Config(format!(
                "streak bonus step {} exceeds cap {}",
                self.streak_bonus_step, self.streak_bonus_cap
            )));
        }
        if self.max_name_len == 0 {
            return Err(GameError::Config("max_name_len must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn map_scale(&self) -> MapScale {
        MapScale {
            width_km: self.map_width_km,
            height_km: self.map_height_km,
        }
    }

    /// Overrides fields with values the user typed on the command line,
    /// leaving file-provided values alone where the CLI only has defaults.
    pub fn merge_from_cli(&mut self, cli: &GameConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(rounds, "rounds");
        update_if_present!(mode, "mode");

        update_if_present!(success_threshold, "success_threshold");
        update_if_present!(streak_bonus_step, "streak_bonus_step");
        update_if_present!(streak_bonus_cap, "streak_bonus_cap");

        update_if_present!(binary_threshold_pct, "binary_threshold_pct");
        update_if_present!(map_width_km, "map_width_km");
        update_if_present!(map_height_km, "map_height_km");

        update_if_present!(leaderboard_min_correct, "leaderboard_min_correct");
        update_if_present!(max_name_len, "max_name_len");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn mode_parses_from_text() {
        assert_eq!("binary".parse::<ScoringMode>().unwrap(), ScoringMode::Binary);
        assert_eq!(ScoringMode::Tiered.to_string(), "tiered");
    }

    #[test]
    fn rejects_inverted_bonus() {
        let config = GameConfig {
            streak_bonus_step: 30,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }
}
