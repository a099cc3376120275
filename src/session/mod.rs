pub mod round;
pub mod summary;

pub use self::round::{RoundEngine, RoundPhase, RoundResult};
pub use self::summary::{GameTally, Summary};

use crate::catalog::{sample_questions, Question, QuestionPrompt};
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::geometry::Coordinate;
use crate::leaderboard::LeaderboardEntry;
use crate::scorer::{build_strategy, ScoringStrategy, StreakTracker};
use fastrand::Rng;
use strum_macros::Display;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished,
}

/// What `advance` moved the session to.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    NextRound(QuestionPrompt),
    Finished(Summary),
}

/// One full game: `NotStarted -> InProgress -> Finished`.
pub struct GameSession {
    config: GameConfig,
    strategy: Box<dyn ScoringStrategy>,
    rng: Rng,
    questions: Vec<Question>,
    round: Option<RoundEngine>,
    streak: StreakTracker,
    tally: GameTally,
    summary: Option<Summary>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, Rng::new())
    }

    /// Reproducible question draws.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Rng::with_seed(seed))
    }

    fn with_rng(config: GameConfig, rng: Rng) -> Self {
        let strategy = build_strategy(&config);
        Self::with_strategy(config, strategy, rng)
    }

    /// Plugs in a custom scoring strategy instead of the configured one.
    pub fn with_strategy(config: GameConfig, strategy: Box<dyn ScoringStrategy>, rng: Rng) -> Self {
        let streak = StreakTracker::new(config.streak_bonus_step, config.streak_bonus_cap);
        Self {
            config,
            strategy,
            rng,
            questions: Vec::new(),
            round: None,
            streak,
            tally: GameTally::new(),
            summary: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn strategy(&self) -> &dyn ScoringStrategy {
        self.strategy.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.summary.is_some() {
            SessionState::Finished
        } else if self.round.is_some() {
            SessionState::InProgress
        } else {
            SessionState::NotStarted
        }
    }

    /// Starts (or restarts) a game with `round_count` questions drawn from
    /// `catalog`. Any previous game state is discarded.
    pub fn start(&mut self, catalog: &[Question], round_count: usize) -> GameResult<QuestionPrompt> {
        if let Some(q) = catalog
            .iter()
            .find(|q| !self.strategy.supports(&q.coordinate))
        {
            return Err(GameError::InvalidCoordinate(format!(
                "{} scoring cannot score '{}'",
                self.strategy.name(),
                q.answer
            )));
        }
        let questions = sample_questions(&mut self.rng, catalog, round_count)?;

        self.tally = GameTally::new();
        self.streak.reset();
        self.summary = None;

        let engine = RoundEngine::new(questions[0].clone(), 0, questions.len());
        let prompt = engine.prompt();
        self.questions = questions;
        self.round = Some(engine);

        info!(
            "Game started: {} rounds, {} scoring",
            round_count,
            self.strategy.name()
        );
        Ok(prompt)
    }

    /// 0-based index of the current round.
    pub fn round_index(&self) -> Option<usize> {
        self.round.as_ref().map(RoundEngine::index)
    }

    pub fn round_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_round(&self) -> Option<&RoundEngine> {
        self.round.as_ref()
    }

    pub fn prompt(&self) -> Option<QuestionPrompt> {
        self.round.as_ref().map(RoundEngine::prompt)
    }

    pub fn tally(&self) -> &GameTally {
        &self.tally
    }

    pub fn streak(&self) -> u32 {
        self.streak.current()
    }

    pub fn place_guess(&mut self, coord: Coordinate) -> GameResult<()> {
        self.active_round()?.place_guess(coord)
    }

    pub fn clear_guess(&mut self) -> GameResult<()> {
        self.active_round()?.clear_guess()
    }

    pub fn confirm_guess(&mut self) -> GameResult<RoundResult> {
        if self.state() != SessionState::InProgress {
            return Err(GameError::SessionNotActive);
        }
        let round = self.round.as_mut().ok_or(GameError::SessionNotActive)?;
        round.confirm_guess(self.strategy.as_ref(), &mut self.streak, &mut self.tally)
    }

    /// Timer expiry for the current round.
    pub fn timeout(&mut self) -> GameResult<RoundResult> {
        if self.state() != SessionState::InProgress {
            return Err(GameError::SessionNotActive);
        }
        let round = self.round.as_mut().ok_or(GameError::SessionNotActive)?;
        round.force_timeout(self.strategy.as_ref(), &mut self.streak, &mut self.tally)
    }

    /// Moves to the next round, or finishes the game after the last one.
    pub fn advance(&mut self) -> GameResult<Advance> {
        if self.state() != SessionState::InProgress {
            return Err(GameError::SessionNotActive);
        }
        let round = self.round.as_ref().ok_or(GameError::SessionNotActive)?;
        if !round.is_locked() {
            return Err(GameError::RoundNotComplete);
        }

        let next = round.index() + 1;
        if next < self.questions.len() {
            let engine = RoundEngine::new(self.questions[next].clone(), next, self.questions.len());
            let prompt = engine.prompt();
            self.round = Some(engine);
            debug!(round = next + 1, "advanced");
            return Ok(Advance::NextRound(prompt));
        }

        let summary = Summary::from_tally(&self.tally, self.streak.best());
        info!(
            "Game finished: {} points, {:.2} km",
            summary.total_points,
            summary.total_distance_km()
        );
        self.summary = Some(summary.clone());
        Ok(Advance::Finished(summary))
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// The tuple to hand to a leaderboard store. Only available once finished.
    pub fn submission(&self, name: &str) -> GameResult<LeaderboardEntry> {
        let summary = self.summary.as_ref().ok_or(GameError::SessionNotActive)?;
        Ok(LeaderboardEntry::from_summary(name, summary))
    }

    fn active_round(&mut self) -> GameResult<&mut RoundEngine> {
        if self.summary.is_some() {
            return Err(GameError::SessionNotActive);
        }
        self.round.as_mut().ok_or(GameError::SessionNotActive)
    }
}
