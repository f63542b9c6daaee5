// app/lobby.rs
//! Getting from a lobby sub-menu into a match.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{error, info};

use crate::app::decision::DecisionEngine;
use crate::app::error::BotError;
use crate::app::host::{AdventureId, Difficulty, GameType, HostBridge, MissionId, ScenarioRecord};
use crate::app::state::{JoinState, TickContext};

#[derive(Debug, Default)]
pub struct Lobby {
    state: JoinState,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> JoinState {
        self.state
    }

    /// A match has started, so any pending search has resolved.
    pub fn reset(&mut self) {
        self.state = JoinState::Idle;
    }

    /// Play against the built-in AI.
    pub fn join_practice<H, D>(&mut self, ctx: &mut TickContext<'_, H, D>, expert: bool) -> Result<(), BotError>
    where
        H: HostBridge,
        D: DecisionEngine<H>,
    {
        if self.state == JoinState::Joined || ctx.host.is_in_match() {
            return Ok(());
        }
        let difficulty = Difficulty::from_expert(expert);

        if self.state == JoinState::Idle {
            info!("Lobby: changing adventure config to practice {:?}", difficulty);
            ctx.host.configure_practice(difficulty)?;
            self.state = JoinState::DeckPickerOpened;
            ctx.wait_for(ctx.config.practice_settle);
            return Ok(());
        }

        let deck_id = ctx.host.selected_deck_id();
        if deck_id == 0 {
            error!("Lobby: invalid deck id 0, no deck selected yet");
            return Ok(());
        }

        let mission = pick_practice_mission(&ctx.host.scenario_records(), difficulty, &mut *ctx.rng)?;
        info!(
            "Lobby: starting game in practice mode, expert = {}, mission = {}, deck = {}",
            expert, mission.0, deck_id
        );
        ctx.host.show_loading_popup()?;
        ctx.host.find_match(GameType::VsAi, mission, deck_id)?;

        self.state = JoinState::Joined;
        ctx.wait_for(ctx.config.practice_settle);
        Ok(())
    }

    /// Play against other players, ranked or casual.
    pub fn join_tournament<H, D>(&mut self, ctx: &mut TickContext<'_, H, D>, ranked: bool) -> Result<(), BotError>
    where
        H: HostBridge,
        D: DecisionEngine<H>,
    {
        if self.state == JoinState::Joined {
            return Ok(());
        }
        if ctx.host.is_in_match() || ctx.host.is_matchmaking() {
            return Ok(());
        }

        // The client applies the option on its own schedule; join next tick.
        if ctx.host.ranked_option() != ranked {
            info!("Lobby: switching ranked option to {}", ranked);
            ctx.host.set_ranked_option(ranked)?;
            ctx.wait_for(ctx.config.ranked_option_delay);
            return Ok(());
        }

        let deck_id = ctx.host.selected_deck_id();
        if deck_id == 0 {
            error!("Lobby: invalid deck id 0, no deck selected yet");
            return Ok(());
        }

        let game_type = if ranked { GameType::Ranked } else { GameType::Unranked };
        info!("Lobby: joining game in tournament mode, ranked = {}, deck = {}", ranked, deck_id);
        ctx.host.show_matching_popup()?;
        ctx.host.find_match(game_type, MissionId::MULTIPLAYER_1V1, deck_id)?;

        self.state = JoinState::Joined;
        Ok(())
    }
}

/// Picks a practice mission of the given difficulty uniformly at random.
pub fn pick_practice_mission<R: Rng + ?Sized>(
    records: &[ScenarioRecord],
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<MissionId, BotError> {
    let candidates: Vec<MissionId> = records
        .iter()
        .filter(|r| r.adventure == AdventureId::Practice && r.difficulty == difficulty)
        .map(|r| r.id)
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or(BotError::NoPracticeMissions { difficulty })
}
