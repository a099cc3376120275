use crate::consts::MAX_NAME_LEN;
use crate::error::{GameError, GameResult};
use std::fmt;
use tracing::warn;

/// A display name that passed sanitization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait NameSanitizer {
    fn sanitize(&self, raw: &str) -> GameResult<PlayerName>;
}

/// Rejected anywhere inside a name.
const BLOCKED_WORDS: &[&str] = &[
    "fuck", "shit", "bitch", "dick", "cock", "cunt", "whore", "slut", "arse", "fag",
];

/// Rejected only as a whole word, so "Cassandra" and "Essex" stay valid.
const BLOCKED_WHOLE_WORDS: &[&str] = &["ass", "sex"];

/// Keeps letters, digits, spaces and `-_'"`, rejects blocked words and
/// truncates to `max_len` characters.
#[derive(Debug, Clone)]
pub struct DefaultSanitizer {
    pub max_len: usize,
    pub blocked: Vec<String>,
    pub blocked_whole: Vec<String>,
}

impl Default for DefaultSanitizer {
    fn default() -> Self {
        Self {
            max_len: MAX_NAME_LEN,
            blocked: BLOCKED_WORDS.iter().map(|w| w.to_string()).collect(),
            blocked_whole: BLOCKED_WHOLE_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl DefaultSanitizer {
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len,
            ..Default::default()
        }
    }

    pub fn block(mut self, word: &str) -> Self {
        self.blocked.push(word.to_lowercase());
        self
    }

    fn is_offensive(&self, lowered: &str) -> bool {
        if self.is_offensive(&lowered) {
            return true;
        }
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| self.blocked_whole.iter().any(|w| w == token))
    }
}

fn allowed(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '\'' | '"')
}

impl NameSanitizer for DefaultSanitizer {
    fn sanitize(&self, raw: &str) -> GameResult<PlayerName> {
        let filtered: String = raw.chars().filter(|&c| allowed(c)).collect();
        let clean = filtered.trim();
        if clean.is_empty() {
            return Err(GameError::InvalidName("name is empty".to_string()));
        }

        let lowered = clean.to_lowercase();
        if self.blocked.iter().any(|w| lowered.contains(w.as_str())) {
            warn!("Rejected offensive player name");
            return Err(GameError::InvalidName(
                "please choose a non-offensive name".to_string(),
            ));
        }

        let truncated: String = clean.chars().take(self.max_len).collect();
        Ok(PlayerName(truncated.trim().to_string()))
    }
}
