use crate::reports;
use clap::Args;
use mapguessr::catalog::Question;
use mapguessr::config::{GameConfig, ScoringMode};
use mapguessr::error::GameResult;
use mapguessr::geometry::Coordinate;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: GameConfig,
}

/// Catalog problems that do not stop a game from running.
pub fn catalog_warnings(config: &GameConfig, catalog: &[Question]) -> Vec<String> {
    let mut warnings = Vec::new();

    if catalog.len() < config.rounds {
        warnings.push(format!(
            "catalog has {} questions but a game asks for {} rounds",
            catalog.len(),
            config.rounds
        ));
    }

    if config.mode == ScoringMode::Binary
        && catalog
            .iter()
            .any(|q| matches!(q.coordinate, Coordinate::Geo { .. }))
    {
        warnings.push("binary scoring needs planar (x/y) coordinates".to_string());
    }

    let mut seen = HashSet::new();
    for q in catalog {
        if !seen.insert(q.answer.to_lowercase()) {
            warnings.push(format!("duplicate answer '{}'", q.answer));
        }
    }

    warnings
}

pub fn run(config: &GameConfig, catalog: &[Question]) -> GameResult<()> {
    reports::print_catalog(catalog);

    let warnings = catalog_warnings(config, catalog);
    for w in &warnings {
        warn!("⚠️  {}", w);
    }
    if warnings.is_empty() {
        info!("✅ Catalog OK: {} questions", catalog.len());
    }
    Ok(())
}
