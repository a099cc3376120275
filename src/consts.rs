/// Mean Earth radius in meters (IUGG), used for haversine distances.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Width of the legacy campus map in kilometers.
pub const DEFAULT_MAP_WIDTH_KM: f64 = 13.0;

/// Height of the legacy campus map in kilometers.
pub const DEFAULT_MAP_HEIGHT_KM: f64 = 9.0;

/// Number of rounds in a standard game.
pub const DEFAULT_ROUNDS: usize = 10;

/// Base points a round must reach to count toward a streak (tiered mode).
pub const SUCCESS_THRESHOLD: u32 = 70;

pub const STREAK_BONUS_STEP: u32 = 5;
pub const STREAK_BONUS_CAP: u32 = 25;

/// Radius, in percentage units, inside which a binary-mode guess is correct.
pub const BINARY_THRESHOLD_PCT: f64 = 5.0;

/// Correct rounds required before a player may join the leaderboard.
pub const LEADERBOARD_MIN_CORRECT: usize = 5;

pub const MAX_NAME_LEN: usize = 20;
