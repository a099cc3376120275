pub mod sanitizer;

pub use self::sanitizer::{DefaultSanitizer, NameSanitizer, PlayerName};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::session::Summary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::io::Write;
use tracing::{info, warn};

/// The tuple a finished game hands to a leaderboard store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub points: u32,
    /// Kilometers, rounded to three decimals.
    pub distance_km: f64,
    pub correct: usize,
}

impl LeaderboardEntry {
    pub fn from_summary(name: &str, summary: &Summary) -> Self {
        Self {
            name: name.to_string(),
            points: summary.total_points,
            distance_km: (summary.total_distance_km() * 1000.0).round() / 1000.0,
            correct: summary.correct_rounds,
        }
    }

    pub fn qualifies(&self, min_correct: usize) -> bool {
        self.correct >= min_correct
    }
}

/// Points descending, then distance ascending.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(a.distance_km.total_cmp(&b.distance_km))
}

pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(compare_entries);
}

/// Storage backend for standings. Transport and persistence are up to the
/// implementor; failures come back as `GameError::Leaderboard`.
pub trait LeaderboardStore {
    fn submit(&mut self, entry: LeaderboardEntry) -> GameResult<()>;

    /// Best `n` entries, already ranked.
    fn fetch_top(&self, n: usize) -> GameResult<Vec<LeaderboardEntry>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl LeaderboardStore for InMemoryLeaderboard {
    fn submit(&mut self, entry: LeaderboardEntry) -> GameResult<()> {
        if entry.name.trim().is_empty() {
            return Err(GameError::Leaderboard("entry has no name".to_string()));
        }
        if !entry.distance_km.is_finite() || entry.distance_km < 0.0 {
            return Err(GameError::Leaderboard(format!(
                "invalid distance {}",
                entry.distance_km
            )));
        }
        self.entries.push(entry);
        rank(&mut self.entries);
        Ok(())
    }

    fn fetch_top(&self, n: usize) -> GameResult<Vec<LeaderboardEntry>> {
        Ok(self.entries.iter().take(n).cloned().collect())
    }
}

/// Sanitizes the name, checks the qualification gate and submits.
/// Returns the stored entry.
pub fn submit_summary(
    store: &mut dyn LeaderboardStore,
    sanitizer: &dyn NameSanitizer,
    config: &GameConfig,
    raw_name: &str,
    summary: &Summary,
) -> GameResult<LeaderboardEntry> {
    let name = sanitizer.sanitize(raw_name)?;
    let entry = LeaderboardEntry::from_summary(name.as_str(), summary);

    if !entry.qualifies(config.leaderboard_min_correct) {
        warn!(
            "{} has {} correct rounds, {} needed for the leaderboard",
            entry.name, entry.correct, config.leaderboard_min_correct
        );
        return Err(GameError::Leaderboard(format!(
            "at least {} correct answers are needed to join the leaderboard",
            config.leaderboard_min_correct
        )));
    }

    store.submit(entry.clone())?;
    info!("Saved {} with {} points", entry.name, entry.points);
    Ok(entry)
}

#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    name: &'a str,
    points: u32,
    correct: usize,
    distance_km: String,
}

/// Writes ranked standings as CSV (`rank,name,points,correct,distance_km`).
pub fn export_csv<W: Write>(entries: &[LeaderboardEntry], writer: W) -> GameResult<()> {
    let mut ranked = entries.to_vec();
    rank(&mut ranked);

    let mut wtr = csv::Writer::from_writer(writer);
    for (i, e) in ranked.iter().enumerate() {
        wtr.serialize(StandingRow {
            rank: i + 1,
            name: &e.name,
            points: e.points,
            correct: e.correct,
            distance_km: format!("{:.2}", e.distance_km),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
