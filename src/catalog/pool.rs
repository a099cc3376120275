use super::Question;
use crate::error::{GameError, GameResult};
use fastrand::Rng;

/// Draws `count` distinct questions uniformly at random, in random order.
///
/// Partial Fisher-Yates over an index list: only the first `count` slots are
/// shuffled, so the catalog itself is never reordered.
pub fn sample_questions(
    rng: &mut Rng,
    catalog: &[Question],
    count: usize,
) -> GameResult<Vec<Question>> {
    if count == 0 || count > catalog.len() {
        return Err(GameError::InsufficientQuestions {
            requested: count,
            available: catalog.len(),
        });
    }

    let mut indices: Vec<usize> = (0..catalog.len()).collect();
    for i in 0..count {
        let j = rng.usize(i..indices.len());
        indices.swap(i, j);
    }

    Ok(indices[..count]
        .iter()
        .map(|&i| catalog[i].clone())
        .collect())
}
