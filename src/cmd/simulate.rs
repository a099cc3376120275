use crate::reports;
use clap::Args;
use fastrand::Rng;
use mapguessr::catalog::Question;
use mapguessr::config::GameConfig;
use mapguessr::error::{GameError, GameResult};
use mapguessr::geometry::{Coordinate, MapScale};
use mapguessr::scorer::Accuracy;
use mapguessr::session::{Advance, GameSession, Summary};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Meters per degree of latitude on the mean sphere.
const METERS_PER_DEGREE: f64 = 111_195.0;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: GameConfig,

    #[arg(short = 'g', long, default_value_t = 1000)]
    pub games: usize,

    /// Bot guesses land up to this many meters from the target.
    #[arg(long, default_value_t = 600.0)]
    pub spread_m: f64,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub games: usize,
    pub mean_points: f64,
    pub min_points: u32,
    pub max_points: u32,
    pub mean_distance_km: f64,
    pub mean_best_streak: f64,
    pub labels: Vec<(Accuracy, usize)>,
}

impl SimulationReport {
    fn from_summaries(summaries: &[Summary]) -> Self {
        if summaries.is_empty() {
            return Self::default();
        }
        let n = summaries.len() as f64;

        let mut counts: HashMap<Accuracy, usize> = HashMap::new();
        for s in summaries {
            for r in &s.rounds {
                *counts.entry(r.label).or_insert(0) += 1;
            }
        }
        let mut labels: Vec<(Accuracy, usize)> = counts.into_iter().collect();
        labels.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.to_string().cmp(&b.0.to_string())));

        Self {
            games: summaries.len(),
            mean_points: summaries.iter().map(|s| s.total_points as f64).sum::<f64>() / n,
            min_points: summaries.iter().map(|s| s.total_points).min().unwrap_or(0),
            max_points: summaries.iter().map(|s| s.total_points).max().unwrap_or(0),
            mean_distance_km: summaries.iter().map(|s| s.total_distance_km()).sum::<f64>() / n,
            mean_best_streak: summaries.iter().map(|s| s.best_streak as f64).sum::<f64>() / n,
            labels,
        }
    }
}

/// A point up to `spread_m` meters from `target` in a random direction,
/// clamped into the valid coordinate range.
pub fn jitter(rng: &mut Rng, target: &Coordinate, spread_m: f64, scale: &MapScale) -> GameResult<Coordinate> {
    let bearing = rng.f64() * std::f64::consts::TAU;
    let dist = rng.f64() * spread_m;
    let north_m = dist * bearing.cos();
    let east_m = dist * bearing.sin();

    match *target {
        Coordinate::Geo { lat, lng } => {
            let d_lat = north_m / METERS_PER_DEGREE;
            let cos_lat = lat.to_radians().cos().max(1e-6);
            let d_lng = east_m / (METERS_PER_DEGREE * cos_lat);
            Coordinate::geo((lat + d_lat).clamp(-90.0, 90.0), (lng + d_lng).clamp(-180.0, 180.0))
        }
        Coordinate::Planar { x, y } => {
            let dx = east_m / (scale.width_km * 1000.0) * 100.0;
            let dy = north_m / (scale.height_km * 1000.0) * 100.0;
            Coordinate::planar((x + dx).clamp(0.0, 100.0), (y + dy).clamp(0.0, 100.0))
        }
    }
}

/// Plays one full game with a bot that always guesses near the target.
pub fn play_bot_game(
    config: &GameConfig,
    catalog: &[Question],
    rounds: usize,
    spread_m: f64,
    seed: u64,
) -> GameResult<Summary> {
    let mut session = GameSession::with_seed(config.clone(), seed);
    let mut rng = Rng::with_seed(seed.wrapping_add(9999));
    let scale = config.map_scale();

    let mut prompt = session.start(catalog, rounds)?;
    loop {
        let target = catalog
            .iter()
            .find(|q| prompt.is_for(q))
            .map(|q| q.coordinate)
            .ok_or_else(|| GameError::Validation(format!("'{}' not in catalog", prompt.answer)))?;

        session.place_guess(jitter(&mut rng, &target, spread_m, &scale)?)?;
        session.confirm_guess()?;

        match session.advance()? {
            Advance::NextRound(next) => prompt = next,
            Advance::Finished(summary) => return Ok(summary),
        }
    }
}

pub fn run(args: SimulateArgs, config: GameConfig, catalog: &[Question]) -> GameResult<()> {
    if !(args.spread_m.is_finite() && args.spread_m >= 0.0) {
        return Err(GameError::Validation(format!(
            "spread must be a non-negative distance, got {}",
            args.spread_m
        )));
    }

    let rounds = config.rounds.min(catalog.len());
    if rounds < config.rounds {
        warn!(
            "⚠️  Only {} questions available, simulating {} rounds per game",
            catalog.len(),
            rounds
        );
    }

    let base_seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    println!(
        "🤖 Simulating {} games ({} rounds, spread {:.0} m, {} scoring)",
        args.games, rounds, args.spread_m, config.mode
    );

    let start = Instant::now();
    let summaries: Vec<Summary> = (0..args.games)
        .into_par_iter()
        .map(|i| play_bot_game(&config, catalog, rounds, args.spread_m, base_seed.wrapping_add(i as u64)))
        .collect::<GameResult<Vec<_>>>()?;

    debug!("simulation took {:?}", start.elapsed());
    info!("✅ {} games finished in {:.2?}", summaries.len(), start.elapsed());

    reports::print_simulation_report(&SimulationReport::from_summaries(&summaries));
    Ok(())
}
