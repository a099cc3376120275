pub mod loader;
pub mod pool;

pub use self::loader::load_catalog;
pub use self::pool::sample_questions;

use crate::geometry::Coordinate;
use serde::{Deserialize, Serialize};

/// One quiz item. The catalog record is flat: `answer`, `image` and either
/// `x`/`y` or `lat`/`lng` side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub answer: String,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Question {
    pub fn new(answer: impl Into<String>, image: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            answer: answer.into(),
            image: image.into(),
            coordinate,
        }
    }
}

/// What a player may see of the current round before locking a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPrompt {
    pub answer: String,
    pub image: String,
    /// 1-based.
    pub round: usize,
    pub round_count: usize,
}

impl QuestionPrompt {
    pub fn text(&self) -> String {
        format!("Where is: {}?", self.answer)
    }

    /// Whether this prompt was built from `question`. Catalogs may reuse an
    /// answer for several photos, so the image has to match too.
    pub fn is_for(&self, question: &Question) -> bool {
        self.answer == question.answer && self.image == question.image
    }
}
