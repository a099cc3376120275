#![allow(dead_code)]

use mapguessr::catalog::Question;
use mapguessr::config::{GameConfig, ScoringMode};
use mapguessr::consts::EARTH_RADIUS_M;
use mapguessr::geometry::Coordinate;
use mapguessr::session::GameSession;

/// Meters per degree of latitude on the haversine sphere.
pub const M_PER_DEG_LAT: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// A geo coordinate `meters` due north of `from`.
pub fn north_of(from: &Coordinate, meters: f64) -> Coordinate {
    match *from {
        Coordinate::Geo { lat, lng } => Coordinate::geo(lat + meters / M_PER_DEG_LAT, lng).unwrap(),
        Coordinate::Planar { .. } => panic!("north_of needs a geo coordinate"),
    }
}

pub fn zurich_catalog() -> Vec<Question> {
    vec![
        Question::new("UZH Zentrum", "images/uzh.jpg", Coordinate::geo(47.3744, 8.5481).unwrap()),
        Question::new("Irchel", "images/irchel.jpg", Coordinate::geo(47.3967, 8.5490).unwrap()),
        Question::new("Uetliberg", "images/uetliberg.jpg", Coordinate::geo(47.3497, 8.4914).unwrap()),
        Question::new("Zürichhorn", "images/horn.jpg", Coordinate::geo(47.3546, 8.5531).unwrap()),
    ]
}

pub fn campus_catalog() -> Vec<Question> {
    vec![
        Question::new("Mensa", "m.jpg", Coordinate::planar(50.0, 50.0).unwrap()),
        Question::new("Library", "l.jpg", Coordinate::planar(20.0, 30.0).unwrap()),
        Question::new("Gym", "g.jpg", Coordinate::planar(80.0, 70.0).unwrap()),
    ]
}

pub fn config(rounds: usize, mode: ScoringMode) -> GameConfig {
    GameConfig {
        rounds,
        mode,
        ..Default::default()
    }
}

/// The hidden target for the current round, looked up the way a test
/// harness would: by the prompt's answer and image.
pub fn current_target(session: &GameSession, catalog: &[Question]) -> Coordinate {
    let prompt = session.prompt().expect("no active round");
    catalog
        .iter()
        .find(|q| prompt.is_for(q))
        .map(|q| q.coordinate)
        .expect("prompt answer not in catalog")
}
