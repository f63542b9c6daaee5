// app/action_queue.rs

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::app::decision::DecisionEngine;
use crate::app::error::BotError;
use crate::app::host::HostBridge;
use crate::app::state::TickContext;

/// Actions decided for the current turn, drained front to back.
#[derive(Debug)]
pub struct ActionQueue<A> {
    actions: VecDeque<A>,
}

impl<A> Default for ActionQueue<A> {
    fn default() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }
}

impl<A> ActionQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = A>>(&mut self, actions: I) {
        self.actions.extend(actions);
    }

    pub fn pop_next(&mut self) -> Option<A> {
        self.actions.pop_front()
    }

    pub fn peek(&self) -> Option<&A> {
        self.actions.front()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

/// What one executor step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One queued action was applied.
    Applied,
    /// The engine was asked for the turn and its actions were queued.
    Planned(usize),
    /// Nothing left to do; the turn was ended.
    EndedTurn,
}

/// Runs one step of the turn: apply a queued action, or plan the turn, or end it.
///
/// The host's targeting reticle is off while the step runs so that actions do
/// not depend on where the mouse is. Its previous state is put back afterwards.
pub fn execute_step<H, D>(ctx: &mut TickContext<'_, H, D>) -> Result<StepOutcome, BotError>
where
    H: HostBridge,
    D: DecisionEngine<H>,
{
    let previous = ctx.host.set_targeting_reticle(false);
    let result = step(ctx);
    ctx.host.set_targeting_reticle(previous);
    result
}

fn step<H, D>(ctx: &mut TickContext<'_, H, D>) -> Result<StepOutcome, BotError>
where
    H: HostBridge,
    D: DecisionEngine<H>,
{
    if let Some(action) = ctx.queue.pop_next() {
        debug!("ActionQueue: applying {:?}, {} left", action, ctx.queue.len());
        let delay = ctx.engine.apply_action(action, &mut *ctx.host)?;
        ctx.wait_for(delay);
        return Ok(StepOutcome::Applied);
    }

    let hand = ctx.host.local_hand();
    let actions = ctx.engine.decide_turn(&hand)?;
    ctx.queue.extend(actions);

    if ctx.queue.is_empty() {
        info!("ActionQueue: ending turn");
        ctx.host.end_turn()?;
        ctx.wait_for(ctx.config.end_turn_cooldown);
        return Ok(StepOutcome::EndedTurn);
    }

    info!("ActionQueue: planned {} actions", ctx.queue.len());
    Ok(StepOutcome::Planned(ctx.queue.len()))
}
