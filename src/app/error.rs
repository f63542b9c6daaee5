// app/error.rs

use thiserror::Error;

use crate::app::host::{Difficulty, ScreenMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("Host action failed: {0}")]
    Host(String),

    #[error("Decision engine failed: {0}")]
    Decision(String),

    #[error("No practice missions available for difficulty {difficulty:?}")]
    NoPracticeMissions { difficulty: Difficulty },

    #[error("Host entered unrecoverable screen {0:?}")]
    FatalScreen(ScreenMode),

    #[error("Unknown operating mode code: {0}")]
    UnknownMode(u8),
}

impl BotError {
    /// Fatal errors halt the bot instead of being retried after a backoff.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::FatalScreen(_) | BotError::UnknownMode(_))
    }
}
