use crate::reports;
use clap::Args;
use mapguessr::catalog::Question;
use mapguessr::config::GameConfig;
use mapguessr::error::{GameError, GameResult};
use mapguessr::geometry::{Coordinate, MapViewport};
use mapguessr::leaderboard::{
    export_csv, submit_summary, DefaultSanitizer, InMemoryLeaderboard, LeaderboardStore,
};
use mapguessr::session::{Advance, GameSession};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub config: GameConfig,

    /// Event script; reads stdin when omitted.
    #[arg(long)]
    pub script: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Submit the result under this name when the game finishes.
    #[arg(long)]
    pub player: Option<String>,

    /// Display and image size for `click` events, as `WxH:NWxNH`.
    #[arg(long)]
    pub viewport: Option<String>,

    /// Write the final standings to this CSV file.
    #[arg(long)]
    pub export: Option<String>,
}

/// One line of a play script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptEvent {
    /// Two numbers: lat/lng for geo catalogs, x/y percent for planar ones.
    Guess(f64, f64),
    /// Pixel position inside the display element (needs `--viewport`).
    Click(f64, f64),
    Clear,
    Confirm,
    Timeout,
    Next,
}

pub fn parse_event(line: &str) -> GameResult<Option<ScriptEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let pair = |name: &str| -> GameResult<(f64, f64)> {
        if parts.len() != 3 {
            return Err(GameError::Validation(format!(
                "'{}' takes two numbers: {}",
                name, line
            )));
        }
        let a = parts[1]
            .trim_end_matches(',')
            .parse::<f64>()
            .map_err(|_| GameError::Validation(format!("bad number '{}'", parts[1])))?;
        let b = parts[2]
            .parse::<f64>()
            .map_err(|_| GameError::Validation(format!("bad number '{}'", parts[2])))?;
        Ok((a, b))
    };

    let event = match parts[0].to_ascii_lowercase().as_str() {
        "guess" => {
            let (a, b) = pair("guess")?;
            ScriptEvent::Guess(a, b)
        }
        "click" => {
            let (a, b) = pair("click")?;
            ScriptEvent::Click(a, b)
        }
        "clear" => ScriptEvent::Clear,
        "confirm" => ScriptEvent::Confirm,
        "timeout" => ScriptEvent::Timeout,
        "next" => ScriptEvent::Next,
        other => {
            return Err(GameError::Validation(format!("unknown command '{}'", other)));
        }
    };
    Ok(Some(event))
}

/// Parses `WxH:NWxNH`, e.g. `800x600:1300x900`.
pub fn parse_viewport(text: &str) -> GameResult<MapViewport> {
    let bad = || {
        GameError::Validation(format!(
            "viewport must look like 800x600:1300x900, got '{}'",
            text
        ))
    };
    let (display, natural) = text.split_once(':').ok_or_else(bad)?;
    let dims = |s: &str| -> GameResult<(f64, f64)> {
        let (w, h) = s.split_once('x').ok_or_else(bad)?;
        let w = w.trim().parse::<f64>().map_err(|_| bad())?;
        let h = h.trim().parse::<f64>().map_err(|_| bad())?;
        Ok((w, h))
    };
    let (dw, dh) = dims(display)?;
    let (nw, nh) = dims(natural)?;
    MapViewport::new(dw, dh, nw, nh)
}

/// Reads `a b` as the same coordinate kind the catalog uses.
fn coordinate_like(catalog: &[Question], a: f64, b: f64) -> GameResult<Coordinate> {
    let sample = catalog
        .first()
        .ok_or_else(|| GameError::Validation("catalog is empty".to_string()))?;
    match sample.coordinate {
        Coordinate::Geo { .. } => Coordinate::geo(a, b),
        Coordinate::Planar { .. } => Coordinate::planar(a, b),
    }
}

fn apply(
    session: &mut GameSession,
    event: ScriptEvent,
    catalog: &[Question],
    viewport: Option<&MapViewport>,
) -> GameResult<()> {
    match event {
        ScriptEvent::Guess(a, b) => {
            let coord = coordinate_like(catalog, a, b)?;
            session.place_guess(coord)
        }
        ScriptEvent::Click(px, py) => {
            let vp = viewport.ok_or_else(|| {
                GameError::Validation("'click' needs --viewport".to_string())
            })?;
            session.place_guess(vp.click_to_planar(px, py)?)
        }
        ScriptEvent::Clear => session.clear_guess(),
        ScriptEvent::Confirm => {
            let result = session.confirm_guess()?;
            reports::print_round_result(&result);
            Ok(())
        }
        ScriptEvent::Timeout => {
            let result = session.timeout()?;
            reports::print_round_result(&result);
            Ok(())
        }
        ScriptEvent::Next => {
            match session.advance()? {
                Advance::NextRound(prompt) => reports::print_prompt(&prompt),
                Advance::Finished(summary) => reports::print_summary(&summary),
            }
            Ok(())
        }
    }
}

pub fn run(args: PlayArgs, config: GameConfig, catalog: &[Question]) -> GameResult<()> {
    let viewport = args.viewport.as_deref().map(parse_viewport).transpose()?;

    let mut rounds = config.rounds;
    if rounds > catalog.len() {
        warn!(
            "⚠️  Only {} questions available, playing {} rounds instead of {}",
            catalog.len(),
            catalog.len(),
            rounds
        );
        rounds = catalog.len();
    }

    let mut session = match args.seed {
        Some(seed) => GameSession::with_seed(config.clone(), seed),
        None => GameSession::new(config.clone()),
    };

    println!("\n🗺️  === MAP GUESSR === 🗺️");
    let prompt = session.start(catalog, rounds)?;
    reports::print_prompt(&prompt);

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let event = match parse_event(&line) {
            Ok(Some(e)) => e,
            Ok(None) => continue,
            Err(e) => {
                warn!("line {}: {}", line_no + 1, e);
                continue;
            }
        };
        if let Err(e) = apply(&mut session, event, catalog, viewport.as_ref()) {
            warn!("line {}: {}", line_no + 1, e);
        }
    }

    let Some(summary) = session.summary().cloned() else {
        warn!("⚠️  Script ended before the game finished.");
        reports::print_rounds(&session.tally().history);
        return Ok(());
    };

    reports::print_rounds(&summary.rounds);

    if let Some(raw_name) = &args.player {
        let mut board = InMemoryLeaderboard::new();
        let sanitizer = DefaultSanitizer::with_max_len(config.max_name_len);
        match submit_summary(&mut board, &sanitizer, &config, raw_name, &summary) {
            Ok(entry) => info!("✅ Saved {} to the leaderboard", entry.name),
            Err(e) => warn!("⚠️  Could not save score: {}", e),
        }

        let top = board.fetch_top(10)?;
        reports::print_leaderboard(&top);

        if let Some(path) = &args.export {
            export_csv(&top, File::create(path)?)?;
            info!("💾 Standings written to {}", path);
        }
    }

    Ok(())
}
