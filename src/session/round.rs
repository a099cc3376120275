use super::summary::GameTally;
use crate::catalog::{Question, QuestionPrompt};
use crate::error::{GameError, GameResult};
use crate::geometry::Coordinate;
use crate::scorer::{Accuracy, ScoringStrategy, StreakTracker};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

/// Outcome of one locked round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    /// 1-based.
    pub round: usize,
    pub answer: String,
    /// `None` only when the timer locked the round with nothing placed.
    pub guess: Option<Coordinate>,
    pub target: Coordinate,
    pub distance_m: Option<f64>,
    pub base_points: u32,
    pub label: Accuracy,
    pub success: bool,
    /// Streak after this round was applied.
    pub streak: u32,
    pub streak_bonus: u32,
    pub total_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RoundPhase {
    AwaitingGuess,
    GuessPlaced,
    Locked,
}

#[derive(Debug, Clone)]
enum RoundState {
    AwaitingGuess,
    GuessPlaced(Coordinate),
    Locked(RoundResult),
}

/// State machine for a single round: `AwaitingGuess -> GuessPlaced -> Locked`.
///
/// The question's target stays private until the round is locked.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    question: Question,
    index: usize,
    round_count: usize,
    state: RoundState,
}

impl RoundEngine {
    /// `index` is 0-based.
    pub fn new(question: Question, index: usize, round_count: usize) -> Self {
        Self {
            question,
            index,
            round_count,
            state: RoundState::AwaitingGuess,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> RoundPhase {
        match self.state {
            RoundState::AwaitingGuess => RoundPhase::AwaitingGuess,
            RoundState::GuessPlaced(_) => RoundPhase::GuessPlaced,
            RoundState::Locked(_) => RoundPhase::Locked,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, RoundState::Locked(_))
    }

    pub fn prompt(&self) -> QuestionPrompt {
        QuestionPrompt {
            answer: self.question.answer.clone(),
            image: self.question.image.clone(),
            round: self.index + 1,
            round_count: self.round_count,
        }
    }

    pub fn pending_guess(&self) -> Option<&Coordinate> {
        match &self.state {
            RoundState::GuessPlaced(c) => Some(c),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&RoundResult> {
        match &self.state {
            RoundState::Locked(r) => Some(r),
            _ => None,
        }
    }

    pub fn revealed_target(&self) -> Option<&Coordinate> {
        self.result().map(|_| &self.question.coordinate)
    }

    /// Places or replaces the pending guess.
    pub fn place_guess(&mut self, coord: Coordinate) -> GameResult<()> {
        if self.is_locked() {
            return Err(GameError::RoundAlreadyLocked);
        }
        coord.validate()?;
        debug!(round = self.index + 1, %coord, "guess placed");
        self.state = RoundState::GuessPlaced(coord);
        Ok(())
    }

    pub fn clear_guess(&mut self) -> GameResult<()> {
        if self.is_locked() {
            return Err(GameError::RoundAlreadyLocked);
        }
        debug!(round = self.index + 1, "guess cleared");
        self.state = RoundState::AwaitingGuess;
        Ok(())
    }

    /// Scores the pending guess and locks the round. Nothing is mutated
    /// unless the whole evaluation succeeds.
    pub fn confirm_guess(
        &mut self,
        strategy: &dyn ScoringStrategy,
        streak: &mut StreakTracker,
        tally: &mut GameTally,
    ) -> GameResult<RoundResult> {
        let guess = match &self.state {
            RoundState::Locked(_) => return Err(GameError::RoundAlreadyLocked),
            RoundState::AwaitingGuess => return Err(GameError::NoGuessPlaced),
            RoundState::GuessPlaced(c) => *c,
        };

        let eval = strategy.evaluate(&guess, &self.question.coordinate)?;

        let current = streak.record(eval.success);
        let streak_bonus = if strategy.awards_streak_bonus() && eval.success {
            streak.bonus_for(current)
        } else {
            0
        };

        let result = RoundResult {
            round: self.index + 1,
            answer: self.question.answer.clone(),
            guess: Some(guess),
            target: self.question.coordinate,
            distance_m: Some(eval.distance_m),
            base_points: eval.base_points,
            label: eval.label,
            success: eval.success,
            streak: current,
            streak_bonus,
            total_points: eval.base_points.saturating_add(streak_bonus),
        };

        self.lock(result, tally)
    }

    /// Timer expiry. Confirms a pending guess; with nothing placed the round
    /// locks at zero points and the streak resets.
    pub fn force_timeout(
        &mut self,
        strategy: &dyn ScoringStrategy,
        streak: &mut StreakTracker,
        tally: &mut GameTally,
    ) -> GameResult<RoundResult> {
        match self.state {
            RoundState::Locked(_) => Err(GameError::RoundAlreadyLocked),
            RoundState::GuessPlaced(_) => self.confirm_guess(strategy, streak, tally),
            RoundState::AwaitingGuess => {
                let current = streak.record(false);
                let result = RoundResult {
                    round: self.index + 1,
                    answer: self.question.answer.clone(),
                    guess: None,
                    target: self.question.coordinate,
                    distance_m: None,
                    base_points: 0,
                    label: Accuracy::NoGuess,
                    success: false,
                    streak: current,
                    streak_bonus: 0,
                    total_points: 0,
                };
                self.lock(result, tally)
            }
        }
    }

    fn lock(&mut self, result: RoundResult, tally: &mut GameTally) -> GameResult<RoundResult> {
        tally.record(&result);
        debug!(
            round = result.round,
            points = result.total_points,
            label = %result.label,
            streak = result.streak,
            "round locked"
        );
        self.state = RoundState::Locked(result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::TieredScoring;

    fn engine() -> RoundEngine {
        let q = Question::new("Lindenhof", "", Coordinate::geo(47.3728, 8.5408).unwrap());
        RoundEngine::new(q, 0, 1)
    }

    #[test]
    fn target_hidden_until_locked() {
        let mut round = engine();
        assert!(round.revealed_target().is_none());
        round.place_guess(Coordinate::geo(47.3728, 8.5408).unwrap()).unwrap();
        assert!(round.revealed_target().is_none());

        let mut streak = StreakTracker::default();
        let mut tally = GameTally::new();
        round
            .confirm_guess(&TieredScoring::default(), &mut streak, &mut tally)
            .unwrap();
        assert!(round.revealed_target().is_some());
    }

    #[test]
    fn clear_returns_to_awaiting() {
        let mut round = engine();
        round.place_guess(Coordinate::geo(1.0, 1.0).unwrap()).unwrap();
        assert_eq!(round.phase(), RoundPhase::GuessPlaced);
        round.clear_guess().unwrap();
        assert_eq!(round.phase(), RoundPhase::AwaitingGuess);
        assert!(round.pending_guess().is_none());
    }

    #[test]
    fn rejected_confirm_leaves_state_untouched() {
        // Planar guess against a geo target cannot be measured.
        let mut round = engine();
        round.place_guess(Coordinate::planar(10.0, 10.0).unwrap()).unwrap();

        let mut streak = StreakTracker::default();
        streak.record(true);
        let mut tally = GameTally::new();

        let err = round
            .confirm_guess(&TieredScoring::default(), &mut streak, &mut tally)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidCoordinate(_)));
        assert_eq!(round.phase(), RoundPhase::GuessPlaced);
        assert_eq!(streak.current(), 1);
        assert!(tally.history.is_empty());
    }
}
