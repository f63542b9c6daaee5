// app/match_flow.rs

use tracing::{debug, info};

use crate::app::action_queue::{execute_step, ActionQueue};
use crate::app::decision::DecisionEngine;
use crate::app::error::BotError;
use crate::app::host::{HostBridge, Side};
use crate::app::session::MatchOutcome;
use crate::app::state::{MatchPhase, MulliganState, TickContext};

/// In-match lifecycle: mulligan, our turns, end of match.
#[derive(Debug, Default)]
pub struct MatchFlow {
    mulligan: MulliganState,
    was_my_turn: bool,
    outcome_recorded: bool,
}

impl MatchFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mulligan_state(&self) -> MulliganState {
        self.mulligan
    }

    pub fn was_my_turn(&self) -> bool {
        self.was_my_turn
    }

    /// Forgets everything about the current match. Called whenever the client
    /// enters or leaves the gameplay screen.
    pub fn reset<A>(&mut self, queue: &mut ActionQueue<A>) {
        self.mulligan = MulliganState::Begin;
        self.was_my_turn = false;
        self.outcome_recorded = false;
        queue.clear();
    }

    pub fn update<H, D>(&mut self, ctx: &mut TickContext<'_, H, D>) -> Result<(), BotError>
    where
        H: HostBridge,
        D: DecisionEngine<H>,
    {
        let phase = MatchPhase::observe(&*ctx.host);
        debug!("MatchFlow: phase {:?}", phase);

        if phase == MatchPhase::Mulligan {
            self.was_my_turn = false;
            return self.mulligan(ctx);
        }
        self.mulligan = MulliganState::Begin;
        if phase != MatchPhase::MatchOver {
            self.outcome_recorded = false;
        }
        if phase != MatchPhase::ActiveTurn {
            self.was_my_turn = false;
        }

        match phase {
            MatchPhase::MatchOver => self.game_over(ctx),
            MatchPhase::ActiveTurn => {
                if !self.was_my_turn {
                    // Let the turn-start animations finish before acting.
                    info!("MatchFlow: our turn started");
                    self.was_my_turn = true;
                    ctx.queue.clear();
                    ctx.wait_for(ctx.config.turn_start_settle);
                    return Ok(());
                }
                execute_step(ctx).map(|_| ())
            }
            MatchPhase::OpponentTurn | MatchPhase::Mulligan => Ok(()),
        }
    }

    fn mulligan<H, D>(&mut self, ctx: &mut TickContext<'_, H, D>) -> Result<(), BotError>
    where
        H: HostBridge,
        D: DecisionEngine<H>,
    {
        match self.mulligan {
            MulliganState::Begin => {
                if !ctx.host.mulligan_ready() {
                    debug!("MulliganState: waiting for the mulligan manager");
                    return Ok(());
                }
                let hand = ctx.host.local_hand();
                let replace = ctx.engine.decide_mulligan(&hand)?;
                // Toggling twice puts a card back, so never retry the toggles.
                self.mulligan = MulliganState::DoEnd;
                for card in &replace {
                    debug!("MulliganState: replacing {:?}", card);
                    ctx.host.toggle_mulligan_card(card)?;
                }
                info!("MulliganState: mulligan ended, {} cards changed", replace.len());
                ctx.wait_for(ctx.config.mulligan_delay);
            }
            MulliganState::DoEnd => {
                ctx.host.confirm_mulligan()?;
                self.mulligan = MulliganState::Done;
            }
            MulliganState::Done => {}
        }
        Ok(())
    }

    fn game_over<H, D>(&mut self, ctx: &mut TickContext<'_, H, D>) -> Result<(), BotError>
    where
        H: HostBridge,
        D: DecisionEngine<H>,
    {
        if !self.outcome_recorded {
            let outcome = MatchOutcome::from_life(
                ctx.host.remaining_life(Side::Local),
                ctx.host.remaining_life(Side::Opponent),
            );
            info!("{}", outcome.banner());
            ctx.session.record(outcome);
            info!("Session: {}", ctx.session.summary());
            self.outcome_recorded = true;
        }

        // Click through the end screen (rewards and such).
        if ctx.host.dismiss_end_of_match_overlay()? {
            debug!("MatchFlow: dismissed end of match overlay");
        }
        ctx.wait_for(ctx.config.game_over_cooldown);
        Ok(())
    }
}
