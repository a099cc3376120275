pub mod catalog;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod leaderboard;
pub mod scorer;
pub mod session;
// cmd and reports belong to the binary (main.rs).

pub use error::{GameError, GameResult};
