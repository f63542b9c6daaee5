// app/decision.rs

use std::fmt::Debug;
use std::time::Duration;

use crate::app::error::BotError;
use crate::app::host::HostBridge;

/// The move-selection policy. The bot only sequences what this returns.
pub trait DecisionEngine<H: HostBridge> {
    type Action: Debug;

    /// Cards from `hand` to send back during the mulligan.
    fn decide_mulligan(&mut self, hand: &[H::Card]) -> Result<Vec<H::Card>, BotError>;

    /// Actions for the current turn, in execution order.
    fn decide_turn(&mut self, hand: &[H::Card]) -> Result<Vec<Self::Action>, BotError>;

    /// Performs one action and reports how long to wait before the next one.
    fn apply_action(&mut self, action: Self::Action, host: &mut H) -> Result<Duration, BotError>;
}
