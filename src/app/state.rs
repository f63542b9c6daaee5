// app/state.rs
//! Explicit bot states and the per-tick context the handlers work on.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;

use crate::app::action_queue::ActionQueue;
use crate::app::config::BotConfig;
use crate::app::decision::DecisionEngine;
use crate::app::delay::DelayScheduler;
use crate::app::host::HostBridge;
use crate::app::session::Session;

/// Progress through the two-step mulligan: toggle cards, then confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MulliganState {
    #[default]
    Begin,
    DoEnd,
    Done,
}

/// Where the bot stands in getting a match started from a lobby screen.
///
/// `DeckPickerOpened` means the practice deck picker has been configured and
/// the next practice tick should submit the search. `Joined` means a search
/// was submitted and nothing else may be submitted until a match starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinState {
    #[default]
    Idle,
    DeckPickerOpened,
    Joined,
}

/// Match phase as observed from the host this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Mulligan,
    ActiveTurn,
    OpponentTurn,
    MatchOver,
}

impl MatchPhase {
    pub fn observe<H: HostBridge>(host: &H) -> Self {
        if host.is_mulligan_phase() {
            MatchPhase::Mulligan
        } else if host.is_game_over() {
            MatchPhase::MatchOver
        } else if host.is_local_turn() {
            MatchPhase::ActiveTurn
        } else {
            MatchPhase::OpponentTurn
        }
    }
}

/// Everything a handler may touch during one tick.
pub struct TickContext<'a, H, D>
where
    H: HostBridge,
    D: DecisionEngine<H>,
{
    pub now: Instant,
    pub host: &'a mut H,
    pub engine: &'a mut D,
    pub delay: &'a mut DelayScheduler,
    pub queue: &'a mut ActionQueue<D::Action>,
    pub session: &'a mut Session,
    pub rng: &'a mut StdRng,
    pub config: &'a BotConfig,
}

impl<H, D> TickContext<'_, H, D>
where
    H: HostBridge,
    D: DecisionEngine<H>,
{
    /// Delays the next tick that is allowed to run logic.
    pub fn wait_for(&mut self, duration: Duration) {
        self.delay.schedule(self.now, duration);
    }
}
