// app/config.rs

use std::time::Duration;

/// Pacing values used by the bot. Every wait the bot performs is one of these,
/// except the per-action delay reported by the decision engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub screen_settle: Duration,      // after any screen change
    pub login_settle: Duration,       // after handling the login screen
    pub practice_settle: Duration,    // after configuring or joining a practice match
    pub ranked_option_delay: Duration, // after flipping the ranked option
    pub mulligan_delay: Duration,     // between toggling cards and confirming
    pub turn_start_settle: Duration,  // when our turn begins
    pub game_over_cooldown: Duration,
    pub end_turn_cooldown: Duration,
    pub error_backoff: Duration,      // after a recoverable error in a tick
    pub seed: Option<u64>,            // mission selection RNG seed
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            screen_settle: Duration::from_millis(5000),
            login_settle: Duration::from_millis(5000),
            practice_settle: Duration::from_millis(5000),
            ranked_option_delay: Duration::from_millis(3000),
            mulligan_delay: Duration::from_millis(2000),
            turn_start_settle: Duration::from_millis(5000),
            game_over_cooldown: Duration::from_millis(10000),
            end_turn_cooldown: Duration::from_millis(10000),
            error_backoff: Duration::from_millis(10000),
            seed: None,
        }
    }
}

impl BotConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
