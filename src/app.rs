// app.rs

pub mod action_queue;
pub mod bot;
pub mod config;
pub mod control;
pub mod decision;
pub mod delay;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod lobby;
pub mod match_flow;
pub mod session;
pub mod state;

use std::thread::sleep;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::app::bot::{Bot, TickOutcome};
use crate::app::config::BotConfig;
use crate::app::control::OperatingMode;
use crate::app::error::BotError;
use crate::app::host::ScreenMode;
use crate::simulator::{CurveEngine, SimHost};

/// Drives a bot against the simulated client.
///
/// In virtual time the clock jumps by `tick` on every iteration and nothing
/// sleeps; in real time the loop sleeps `tick` between iterations.
pub struct App {
    bot: Bot<SimHost, CurveEngine>,
    tick: Duration,
    realtime: bool,
}

impl App {
    pub fn new(config: BotConfig, mode: OperatingMode, tick: Duration, realtime: bool) -> Self {
        info!("App: creating bot against the simulated client");
        let mut host = SimHost::on_screen(ScreenMode::Login);
        host.welcome_quests = true;
        Self {
            bot: Bot::new(host, CurveEngine::default(), config, mode),
            tick,
            realtime,
        }
    }

    pub fn bot(&self) -> &Bot<SimHost, CurveEngine> {
        &self.bot
    }

    /// Runs up to `max_ticks` ticks. Stops early on a fatal bot error.
    pub fn run(&mut self, max_ticks: u64) -> Result<(), BotError> {
        let mut now = Instant::now();
        for n in 0..max_ticks {
            let outcome = match self.bot.tick_at(now) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("App: bot stopped after {} ticks: {}", n, e);
                    return Err(e);
                }
            };

            // The client only moves on when the bot did something.
            if matches!(outcome, TickOutcome::Ran | TickOutcome::Backoff) {
                self.bot.host_mut().advance();
            }

            if self.realtime {
                sleep(self.tick);
                now = Instant::now();
            } else {
                now += self.tick;
            }
        }
        info!("App: finished, {}", self.bot.session().summary());
        Ok(())
    }
}
