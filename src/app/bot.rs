// bot.rs

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::app::action_queue::ActionQueue;
use crate::app::config::BotConfig;
use crate::app::control::{BotHandle, OperatingMode};
use crate::app::decision::DecisionEngine;
use crate::app::delay::DelayScheduler;
use crate::app::dispatch::ModeDispatcher;
use crate::app::error::BotError;
use crate::app::host::HostBridge;
use crate::app::session::Session;
use crate::app::state::TickContext;

/// What a call to [`Bot::tick`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A delay is still pending; nothing ran.
    Waiting,
    /// The bot is switched off through its handle.
    Paused,
    /// Screen handling ran to completion.
    Ran,
    /// The tick failed with a recoverable error and a backoff was scheduled.
    Backoff,
    /// A fatal error stopped the bot earlier.
    Halted,
}

pub struct Bot<H, D>
where
    H: HostBridge,
    D: DecisionEngine<H>,
{
    host: H,
    engine: D,
    handle: BotHandle,
    config: BotConfig,
    delay: DelayScheduler,
    queue: ActionQueue<D::Action>,
    dispatcher: ModeDispatcher,
    session: Session,
    rng: StdRng,
    halted: bool,
}

impl<H, D> Bot<H, D>
where
    H: HostBridge,
    D: DecisionEngine<H>,
{
    pub fn new(host: H, engine: D, config: BotConfig, mode: OperatingMode) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        info!("Bot: created in mode {}", mode);
        Self {
            host,
            engine,
            handle: BotHandle::new(mode),
            config,
            delay: DelayScheduler::new(),
            queue: ActionQueue::new(),
            dispatcher: ModeDispatcher::new(),
            session: Session::new(),
            rng,
            halted: false,
        }
    }

    /// A handle for changing the mode or pausing the bot from elsewhere.
    pub fn handle(&self) -> BotHandle {
        self.handle.clone()
    }

    pub fn set_mode(&self, mode: OperatingMode) {
        self.handle.set_mode(mode);
    }

    /// Swaps the decision engine. Delays, guards and queued actions are kept.
    pub fn reload_engine(&mut self, engine: D) -> D {
        info!("Bot: reloading decision engine");
        std::mem::replace(&mut self.engine, engine)
    }

    pub fn tick(&mut self) -> Result<TickOutcome, BotError> {
        self.tick_at(Instant::now())
    }

    /// Runs a single bot tick as if the current time were `now`.
    pub fn tick_at(&mut self, now: Instant) -> Result<TickOutcome, BotError> {
        if self.halted {
            return Ok(TickOutcome::Halted);
        }
        if !self.delay.ready(now) {
            return Ok(TickOutcome::Waiting);
        }
        if !self.handle.is_running() {
            return Ok(TickOutcome::Paused);
        }

        self.host.mark_activity();
        let mode_code = self.handle.mode_code();

        let mut ctx = TickContext {
            now,
            host: &mut self.host,
            engine: &mut self.engine,
            delay: &mut self.delay,
            queue: &mut self.queue,
            session: &mut self.session,
            rng: &mut self.rng,
            config: &self.config,
        };

        match self.dispatcher.dispatch(&mut ctx, mode_code) {
            Ok(()) => Ok(TickOutcome::Ran),
            Err(e) if e.is_fatal() => {
                error!("Bot: fatal error, halting: {}", e);
                self.halted = true;
                Err(e)
            }
            Err(e) => {
                error!("Bot: tick failed: {}", e);
                error!("{:?}", e);
                self.delay.schedule(now, self.config.error_backoff);
                Ok(TickOutcome::Backoff)
            }
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn engine(&self) -> &D {
        &self.engine
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn delay(&self) -> &DelayScheduler {
        &self.delay
    }

    pub fn queued_actions(&self) -> &ActionQueue<D::Action> {
        &self.queue
    }

    pub fn dispatcher(&self) -> &ModeDispatcher {
        &self.dispatcher
    }
}
