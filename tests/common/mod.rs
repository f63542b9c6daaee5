// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use hearth_pilot::app::bot::{Bot, TickOutcome};
use hearth_pilot::app::config::BotConfig;
use hearth_pilot::app::control::OperatingMode;
use hearth_pilot::app::decision::DecisionEngine;
use hearth_pilot::app::error::BotError;
use hearth_pilot::app::host::ScreenMode;
use hearth_pilot::simulator::{SimCard, SimHost};

pub const SETTLE: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestAction(pub u32);

/// Engine that replays canned answers and records what it was asked.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    pub replace_ids: Vec<u32>,
    /// Appended to every mulligan answer, whether or not they are in hand.
    pub extra_replace: Vec<SimCard>,
    pub turns: VecDeque<Vec<TestAction>>,
    pub mulligan_calls: usize,
    pub decide_turn_calls: usize,
    pub applied: Vec<TestAction>,
    pub action_delay: Duration,
    pub fail_decide_turn: Option<String>,
    pub fail_apply: Option<String>,
}

impl ScriptedEngine {
    pub fn with_turns(turns: Vec<Vec<TestAction>>) -> Self {
        Self {
            turns: turns.into(),
            action_delay: Duration::from_millis(1000),
            ..Self::default()
        }
    }
}

impl DecisionEngine<SimHost> for ScriptedEngine {
    type Action = TestAction;

    fn decide_mulligan(&mut self, hand: &[SimCard]) -> Result<Vec<SimCard>, BotError> {
        self.mulligan_calls += 1;
        let mut replace: Vec<SimCard> = hand
            .iter()
            .filter(|c| self.replace_ids.contains(&c.id))
            .cloned()
            .collect();
        replace.extend(self.extra_replace.iter().cloned());
        Ok(replace)
    }

    fn decide_turn(&mut self, _hand: &[SimCard]) -> Result<Vec<TestAction>, BotError> {
        self.decide_turn_calls += 1;
        if let Some(msg) = &self.fail_decide_turn {
            return Err(BotError::Decision(msg.clone()));
        }
        Ok(self.turns.pop_front().unwrap_or_default())
    }

    fn apply_action(&mut self, action: TestAction, host: &mut SimHost) -> Result<Duration, BotError> {
        assert!(!host.reticle_enabled, "reticle must be off while acting");
        if let Some(msg) = &self.fail_apply {
            return Err(BotError::Host(msg.clone()));
        }
        self.applied.push(action);
        Ok(self.action_delay)
    }
}

pub type TestBot = Bot<SimHost, ScriptedEngine>;

pub fn config() -> BotConfig {
    BotConfig::default().with_seed(42)
}

/// Builds a bot over `host` and lets it observe the host's screen once, so the
/// initial screen-change settle is already behind it. Returns the first
/// instant at which the bot will run logic again.
pub fn settled_bot(host: SimHost, engine: ScriptedEngine, mode: OperatingMode) -> (TestBot, Instant) {
    let start = Instant::now();
    let mut bot = Bot::new(host, engine, config(), mode);
    if bot.host().screen != ScreenMode::Startup {
        let outcome = bot.tick_at(start).expect("settle tick");
        assert_eq!(outcome, TickOutcome::Ran);
        return (bot, start + SETTLE);
    }
    (bot, start)
}

/// A host inside a match, past the mulligan, on `turn`'s side.
pub fn host_in_match(local_turn: bool) -> SimHost {
    let mut host = SimHost::on_screen(ScreenMode::Gameplay);
    host.start_match(3);
    host.mulligan_phase = false;
    host.local_turn = local_turn;
    host
}

/// Duration of the delay the bot scheduled last.
pub fn pending(bot: &TestBot) -> Duration {
    bot.delay().pending().map(|d| d.duration).unwrap_or_default()
}
