mod common;

use common::{campus_catalog, config, current_target, north_of, zurich_catalog};
use mapguessr::config::ScoringMode;
use mapguessr::error::GameError;
use mapguessr::geometry::Coordinate;
use mapguessr::scorer::{Accuracy, Tier, TieredScoring};
use mapguessr::session::{Advance, GameSession, RoundPhase, SessionState, Summary};
use rstest::rstest;

/// Plays every round with a guess `offsets[i]` meters north of the target.
fn play_offsets(seed: u64, offsets: &[f64]) -> Summary {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(offsets.len(), ScoringMode::Tiered), seed);
    session.start(&catalog, offsets.len()).unwrap();

    for (i, &offset) in offsets.iter().enumerate() {
        let target = current_target(&session, &catalog);
        session.place_guess(north_of(&target, offset)).unwrap();
        session.confirm_guess().unwrap();
        match session.advance().unwrap() {
            Advance::NextRound(prompt) => assert_eq!(prompt.round, i + 2),
            Advance::Finished(summary) => {
                assert_eq!(i + 1, offsets.len());
                return summary;
            }
        }
    }
    panic!("game never finished");
}

#[rstest]
#[case(&[50.0, 300.0, 1500.0], 145, vec![5, 0, 0], 1)]
#[case(&[50.0, 200.0, 1500.0], 185, vec![5, 10, 0], 2)]
#[case(&[10.0, 20.0, 30.0], 330, vec![5, 10, 15], 3)]
fn test_full_game_totals(
    #[case] offsets: &[f64],
    #[case] expected_total: u32,
    #[case] expected_bonus: Vec<u32>,
    #[case] expected_best_streak: u32,
) {
    for seed in [1, 2, 3] {
        let summary = play_offsets(seed, offsets);
        assert_eq!(summary.total_points, expected_total, "seed {}", seed);
        let bonuses: Vec<u32> = summary.rounds.iter().map(|r| r.streak_bonus).collect();
        assert_eq!(bonuses, expected_bonus);
        assert_eq!(summary.best_streak, expected_best_streak);
        assert_eq!(summary.round_count, 3);
    }
}

#[test]
fn test_round_breakdown_matches_tiers() {
    let summary = play_offsets(9, &[50.0, 300.0, 1500.0]);
    let labels: Vec<Accuracy> = summary.rounds.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec![Accuracy::Perfect, Accuracy::GoodGuess, Accuracy::WayOff]
    );
    let base: Vec<u32> = summary.rounds.iter().map(|r| r.base_points).collect();
    assert_eq!(base, vec![100, 40, 0]);
    assert_eq!(summary.correct_rounds, 1);

    let km = summary.total_distance_km();
    assert!((km - 1.85).abs() < 0.001, "total distance {} km", km);
}

#[test]
fn test_sum_of_rounds_equals_total() {
    let summary = play_offsets(4, &[120.0, 80.0, 900.0]);
    let sum: u32 = summary.rounds.iter().map(|r| r.total_points).sum();
    assert_eq!(sum, summary.total_points);
    for r in &summary.rounds {
        assert_eq!(r.total_points, r.base_points + r.streak_bonus);
    }
}

#[test]
fn test_streak_bonus_caps_at_25() {
    let catalog: Vec<_> = (0..8)
        .map(|i| {
            mapguessr::catalog::Question::new(
                format!("Spot {}", i),
                "",
                Coordinate::geo(47.0 + i as f64 * 0.01, 8.5).unwrap(),
            )
        })
        .collect();
    let mut session = GameSession::with_seed(config(7, ScoringMode::Tiered), 11);
    session.start(&catalog, 7).unwrap();

    let mut bonuses = Vec::new();
    loop {
        let target = current_target(&session, &catalog);
        session.place_guess(target).unwrap();
        bonuses.push(session.confirm_guess().unwrap().streak_bonus);
        if let Advance::Finished(_) = session.advance().unwrap() {
            break;
        }
    }
    assert_eq!(bonuses, vec![5, 10, 15, 20, 25, 25, 25]);
}

#[test]
fn test_error_ordering() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(2, ScoringMode::Tiered), 5);

    assert!(matches!(session.confirm_guess(), Err(GameError::SessionNotActive)));
    assert!(matches!(session.advance(), Err(GameError::SessionNotActive)));
    assert_eq!(session.state(), SessionState::NotStarted);

    session.start(&catalog, 2).unwrap();
    assert!(matches!(session.confirm_guess(), Err(GameError::NoGuessPlaced)));
    assert!(matches!(session.advance(), Err(GameError::RoundNotComplete)));

    let target = current_target(&session, &catalog);
    session.place_guess(target).unwrap();
    session.confirm_guess().unwrap();

    assert!(matches!(session.confirm_guess(), Err(GameError::RoundAlreadyLocked)));
    assert!(matches!(session.place_guess(target), Err(GameError::RoundAlreadyLocked)));
    assert!(matches!(session.clear_guess(), Err(GameError::RoundAlreadyLocked)));
    assert!(matches!(session.timeout(), Err(GameError::RoundAlreadyLocked)));
}

#[test]
fn test_round_phases_through_advance() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(2, ScoringMode::Tiered), 9);
    session.start(&catalog, 2).unwrap();
    let phase = |s: &GameSession| s.current_round().unwrap().phase();
    assert_eq!(phase(&session), RoundPhase::AwaitingGuess);

    let target = current_target(&session, &catalog);
    session.place_guess(target).unwrap();
    assert_eq!(phase(&session), RoundPhase::GuessPlaced);
    session.confirm_guess().unwrap();
    assert_eq!(phase(&session), RoundPhase::Locked);

    let Advance::NextRound(prompt) = session.advance().unwrap() else {
        panic!("two-round game ended early");
    };
    assert_eq!(prompt.round, 2);
    assert_eq!(phase(&session), RoundPhase::AwaitingGuess);
    assert!(session.current_round().unwrap().pending_guess().is_none());
    assert!(session.current_round().unwrap().result().is_none());
}

#[test]
fn test_points_saturate_instead_of_overflowing() {
    let catalog = zurich_catalog();
    let jackpot = TieredScoring::with_tiers(
        vec![Tier {
            max_distance_m: 1_000_000.0,
            base_points: u32::MAX,
            label: Accuracy::Perfect,
        }],
        70,
    );
    let mut session = GameSession::with_strategy(
        config(2, ScoringMode::Tiered),
        Box::new(jackpot),
        fastrand::Rng::with_seed(4),
    );
    session.start(&catalog, 2).unwrap();

    let mut last_total = 0;
    loop {
        let target = current_target(&session, &catalog);
        session.place_guess(target).unwrap();
        let result = session.confirm_guess().unwrap();
        assert_eq!(result.total_points, u32::MAX);
        assert!(session.tally().total_points >= last_total);
        last_total = session.tally().total_points;
        if let Advance::Finished(summary) = session.advance().unwrap() {
            assert_eq!(summary.total_points, u32::MAX);
            break;
        }
    }
}

#[test]
fn test_binary_mode_rejects_geo_catalog() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(2, ScoringMode::Binary), 2);
    assert!(matches!(
        session.start(&catalog, 2),
        Err(GameError::InvalidCoordinate(_))
    ));
    assert_eq!(session.state(), SessionState::NotStarted);
    assert!(session.prompt().is_none());

    let campus = campus_catalog();
    assert!(session.start(&campus, 2).is_ok());
}

#[test]
fn test_replacing_guess_scores_latest() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(1, ScoringMode::Tiered), 3);
    session.start(&catalog, 1).unwrap();

    let target = current_target(&session, &catalog);
    session.place_guess(north_of(&target, 2_000.0)).unwrap();
    session.place_guess(north_of(&target, 20.0)).unwrap();
    let result = session.confirm_guess().unwrap();
    assert_eq!(result.label, Accuracy::Perfect);
}

#[test]
fn test_clear_then_confirm_fails() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(1, ScoringMode::Tiered), 3);
    session.start(&catalog, 1).unwrap();
    session.place_guess(Coordinate::geo(47.0, 8.0).unwrap()).unwrap();
    session.clear_guess().unwrap();
    assert!(matches!(session.confirm_guess(), Err(GameError::NoGuessPlaced)));
}

#[test]
fn test_timeout_without_guess() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(2, ScoringMode::Tiered), 8);
    session.start(&catalog, 2).unwrap();

    let target = current_target(&session, &catalog);
    session.place_guess(target).unwrap();
    session.confirm_guess().unwrap();
    assert_eq!(session.streak(), 1);
    session.advance().unwrap();

    let result = session.timeout().unwrap();
    assert_eq!(result.label, Accuracy::NoGuess);
    assert_eq!(result.total_points, 0);
    assert!(result.guess.is_none());
    assert!(result.distance_m.is_none());
    assert_eq!(session.streak(), 0);

    let Advance::Finished(summary) = session.advance().unwrap() else {
        panic!("expected the game to finish");
    };
    assert_eq!(summary.total_points, 105);
    assert_eq!(summary.total_distance_m, 0.0);
}

#[test]
fn test_timeout_with_pending_guess_confirms_it() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(1, ScoringMode::Tiered), 8);
    session.start(&catalog, 1).unwrap();
    let target = current_target(&session, &catalog);
    session.place_guess(north_of(&target, 180.0)).unwrap();

    let result = session.timeout().unwrap();
    assert_eq!(result.label, Accuracy::VeryClose);
    assert_eq!(result.total_points, 70 + 5);
}

#[test]
fn test_summary_is_stable_after_finish() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(1, ScoringMode::Tiered), 2);
    session.start(&catalog, 1).unwrap();
    session.timeout().unwrap();
    let Advance::Finished(first) = session.advance().unwrap() else {
        panic!("expected finish");
    };

    assert_eq!(session.state(), SessionState::Finished);
    assert_eq!(session.summary(), Some(&first));
    assert_eq!(session.summary(), Some(&first));
    assert!(matches!(session.advance(), Err(GameError::SessionNotActive)));
    assert!(matches!(
        session.place_guess(Coordinate::geo(1.0, 1.0).unwrap()),
        Err(GameError::SessionNotActive)
    ));
}

#[test]
fn test_restart_resets_everything() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(2, ScoringMode::Tiered), 21);
    session.start(&catalog, 2).unwrap();
    let target = current_target(&session, &catalog);
    session.place_guess(target).unwrap();
    session.confirm_guess().unwrap();
    assert_eq!(session.tally().total_points, 105);

    let prompt = session.start(&catalog, 3).unwrap();
    assert_eq!(prompt.round, 1);
    assert_eq!(prompt.round_count, 3);
    assert_eq!(session.state(), SessionState::InProgress);
    assert_eq!(session.tally().total_points, 0);
    assert!(session.tally().history.is_empty());
    assert_eq!(session.streak(), 0);
}

#[test]
fn test_start_rejects_bad_round_counts() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(10, ScoringMode::Tiered), 1);
    assert!(matches!(
        session.start(&catalog, 10),
        Err(GameError::InsufficientQuestions {
            requested: 10,
            available: 4
        })
    ));
    assert!(matches!(
        session.start(&catalog, 0),
        Err(GameError::InsufficientQuestions { .. })
    ));
    assert_eq!(session.state(), SessionState::NotStarted);
}

#[test]
fn test_rounds_use_distinct_questions() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(4, ScoringMode::Tiered), 77);
    let mut seen = vec![session.start(&catalog, 4).unwrap().answer];
    loop {
        session.timeout().unwrap();
        match session.advance().unwrap() {
            Advance::NextRound(p) => seen.push(p.answer),
            Advance::Finished(_) => break,
        }
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 4);
}

#[test]
fn test_binary_mode_game() {
    let catalog = campus_catalog();
    let mut session = GameSession::with_seed(config(3, ScoringMode::Binary), 6);
    session.start(&catalog, 3).unwrap();

    let mut points = Vec::new();
    loop {
        let target = current_target(&session, &catalog);
        let Coordinate::Planar { x, y } = target else {
            panic!("campus catalog is planar");
        };
        // First round exactly 5 units away (3-4-5, outside the exclusive
        // radius), then far off, then exact.
        let guess = match points.len() {
            0 => Coordinate::planar(x + 3.0, y + 4.0).unwrap(),
            1 => Coordinate::planar((x + 30.0) % 100.0, y).unwrap(),
            _ => target,
        };
        session.place_guess(guess).unwrap();
        let result = session.confirm_guess().unwrap();
        assert_eq!(result.streak_bonus, 0);
        points.push(result.total_points);
        if let Advance::Finished(summary) = session.advance().unwrap() {
            assert_eq!(summary.total_points, 1);
            assert_eq!(summary.correct_rounds, 1);
            break;
        }
    }
    assert_eq!(points, vec![0, 0, 1]);
}

#[test]
fn test_submission_only_after_finish() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(1, ScoringMode::Tiered), 1);
    session.start(&catalog, 1).unwrap();
    assert!(session.submission("Ada").is_err());

    let target = current_target(&session, &catalog);
    session.place_guess(north_of(&target, 1234.0)).unwrap();
    session.confirm_guess().unwrap();
    session.advance().unwrap();

    let entry = session.submission("Ada").unwrap();
    assert_eq!(entry.name, "Ada");
    assert_eq!(entry.points, 0);
    assert!((entry.distance_km - 1.234).abs() < 1e-9);
}

#[test]
fn test_tally_tracks_best_and_worst_rounds() {
    let catalog = zurich_catalog();
    let mut session = GameSession::with_seed(config(3, ScoringMode::Tiered), 17);
    session.start(&catalog, 3).unwrap();

    for offset in [400.0, 20.0, 5_000.0] {
        let target = current_target(&session, &catalog);
        session.place_guess(north_of(&target, offset)).unwrap();
        session.confirm_guess().unwrap();
        if let Advance::Finished(summary) = session.advance().unwrap() {
            assert!(summary.describe().contains("1 of 3 correct"));
        }
    }

    let tally = session.tally();
    assert_eq!(tally.best_round().map(|r| r.round), Some(2));
    assert_eq!(tally.worst_round().map(|r| r.total_points), Some(0));
}
