// app/control.rs

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::app::error::BotError;

/// What the user wants the bot to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    TournamentRanked,
    TournamentUnranked,
    PracticeNormal,
    PracticeExpert,
}

impl OperatingMode {
    pub fn code(self) -> u8 {
        match self {
            OperatingMode::TournamentRanked => 0,
            OperatingMode::TournamentUnranked => 1,
            OperatingMode::PracticeNormal => 2,
            OperatingMode::PracticeExpert => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, BotError> {
        match code {
            0 => Ok(OperatingMode::TournamentRanked),
            1 => Ok(OperatingMode::TournamentUnranked),
            2 => Ok(OperatingMode::PracticeNormal),
            3 => Ok(OperatingMode::PracticeExpert),
            other => Err(BotError::UnknownMode(other)),
        }
    }

    pub fn is_practice(self) -> bool {
        matches!(
            self,
            OperatingMode::PracticeNormal | OperatingMode::PracticeExpert
        )
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatingMode::TournamentRanked => "TOURNAMENT_RANKED",
            OperatingMode::TournamentUnranked => "TOURNAMENT_UNRANKED",
            OperatingMode::PracticeNormal => "PRACTICE_NORMAL",
            OperatingMode::PracticeExpert => "PRACTICE_EXPERT",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct Shared {
    mode: AtomicU8,
    running: AtomicBool,
}

/// Cloneable control surface for callers outside the tick loop.
///
/// The mode and the running switch are plain atomics; the bot reads each one
/// once at the top of a tick, so a change lands on the next tick.
#[derive(Debug, Clone)]
pub struct BotHandle {
    shared: Arc<Shared>,
}

impl BotHandle {
    pub fn new(mode: OperatingMode) -> Self {
        Self {
            shared: Arc::new(Shared {
                mode: AtomicU8::new(mode.code()),
                running: AtomicBool::new(true),
            }),
        }
    }

    pub fn set_mode(&self, mode: OperatingMode) {
        info!("GameMode changed to : {}", mode);
        self.shared.mode.store(mode.code(), Ordering::SeqCst);
    }

    /// Stores a raw mode code as received from an integration layer.
    /// Unknown codes are rejected when the bot dispatches on them.
    pub fn set_mode_code(&self, code: u8) {
        info!("GameMode code changed to : {}", code);
        self.shared.mode.store(code, Ordering::SeqCst);
    }

    pub fn mode_code(&self) -> u8 {
        self.shared.mode.load(Ordering::SeqCst)
    }

    pub fn mode(&self) -> Result<OperatingMode, BotError> {
        OperatingMode::from_code(self.mode_code())
    }

    pub fn set_running(&self, running: bool) {
        info!("Bot running = {}", running);
        self.shared.running.store(running, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }
}

impl Default for BotHandle {
    fn default() -> Self {
        BotHandle::new(OperatingMode::TournamentRanked)
    }
}
