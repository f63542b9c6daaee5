//! In-memory game client and a simple decision engine for it.
//!
//! `SimHost` behaves like a very small version of the real client: screen
//! requests land on the next `advance()`, a search turns into a match, turns
//! alternate and the match ends when a hero runs out of life. Every action the
//! bot performs is appended to `calls` so tests can check exactly what was done.

use std::time::Duration;

use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::app::decision::DecisionEngine;
use crate::app::error::BotError;
use crate::app::host::{
    AdventureId, Difficulty, GameType, HostBridge, MissionId, ScenarioRecord, ScreenMode, Side,
};

/// (name, cost) pairs dealt round-robin by the simulated deck.
static CARD_POOL: Lazy<Vec<(&'static str, u8)>> = Lazy::new(|| {
    vec![
        ("Wisp", 0),
        ("Murloc Raider", 1),
        ("River Crocolisk", 2),
        ("Raid Leader", 3),
        ("Chillwind Yeti", 4),
        ("Stormwind Knight", 4),
        ("Boulderfist Ogre", 6),
        ("Bloodfen Raptor", 2),
        ("Magma Rager", 3),
        ("Core Hound", 7),
    ]
});

static DEFAULT_SCENARIOS: Lazy<Vec<ScenarioRecord>> = Lazy::new(|| {
    let practice = |id, difficulty| ScenarioRecord {
        id: MissionId(id),
        adventure: AdventureId::Practice,
        difficulty,
    };
    vec![
        ScenarioRecord {
            id: MissionId::MULTIPLAYER_1V1,
            adventure: AdventureId::Other(0),
            difficulty: Difficulty::Normal,
        },
        practice(3, Difficulty::Normal),
        practice(4, Difficulty::Normal),
        practice(5, Difficulty::Normal),
        practice(6, Difficulty::Normal),
        practice(9, Difficulty::Expert),
        practice(10, Difficulty::Expert),
        practice(11, Difficulty::Expert),
        ScenarioRecord {
            id: MissionId(88),
            adventure: AdventureId::Naxxramas,
            difficulty: Difficulty::Normal,
        },
    ]
});

const STARTING_LIFE: i32 = 30;
const MAX_MANA: u8 = 10;
const OPPONENT_HIT: i32 = 3;
const OPPONENT_TURN_STEPS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCard {
    pub id: u32,
    pub name: String,
    pub cost: u8,
    /// Affordable with the mana left this turn.
    pub playable: bool,
}

/// One action the bot performed against the simulated client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Transition(ScreenMode),
    NotifyTournament,
    DismissWelcomeQuests,
    SetRankedOption(bool),
    ConfigurePractice(Difficulty),
    LoadingPopup,
    MatchingPopup,
    FindMatch {
        game_type: GameType,
        mission: MissionId,
        deck_id: i64,
    },
    ToggleMulligan(u32),
    ConfirmMulligan,
    EndTurn,
    DismissEndOfMatch,
    PlayCard(u32),
    Terminate,
}

#[derive(Debug, Clone)]
pub struct SimHost {
    pub screen: ScreenMode,
    pub pending_screen: Option<ScreenMode>,
    pub in_match: bool,
    pub matchmaking: bool,
    pub mulligan_phase: bool,
    pub mulligan_ready: bool,
    pub mulligan_confirmed: bool,
    pub game_over: bool,
    pub local_turn: bool,
    pub hand: Vec<SimCard>,
    pub mana: u8,
    pub max_mana: u8,
    pub local_life: i32,
    pub opponent_life: i32,
    pub deck_id: i64,
    pub ranked: bool,
    pub welcome_quests: bool,
    pub end_overlay: bool,
    pub scenarios: Vec<ScenarioRecord>,
    pub reticle_enabled: bool,
    pub activity_marks: u32,
    pub terminated: bool,
    pub calls: Vec<HostCall>,
    opponent_steps: u32,
    next_card: u32,
}

impl Default for SimHost {
    fn default() -> Self {
        Self {
            screen: ScreenMode::Startup,
            pending_screen: None,
            in_match: false,
            matchmaking: false,
            mulligan_phase: false,
            mulligan_ready: false,
            mulligan_confirmed: false,
            game_over: false,
            local_turn: false,
            hand: Vec::new(),
            mana: 0,
            max_mana: 0,
            local_life: STARTING_LIFE,
            opponent_life: STARTING_LIFE,
            deck_id: 1001,
            ranked: false,
            welcome_quests: false,
            end_overlay: false,
            scenarios: DEFAULT_SCENARIOS.clone(),
            reticle_enabled: true,
            activity_marks: 0,
            terminated: false,
            calls: Vec::new(),
            opponent_steps: 0,
            next_card: 0,
        }
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client sitting on `screen`, as if it had been there for a while.
    pub fn on_screen(screen: ScreenMode) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    pub fn find_match_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::FindMatch { .. }))
            .count()
    }

    pub fn count_calls(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Puts the client into a fresh match at the mulligan with `cards` in hand.
    pub fn start_match(&mut self, cards: usize) {
        self.screen = ScreenMode::Gameplay;
        self.pending_screen = None;
        self.in_match = true;
        self.matchmaking = false;
        self.mulligan_phase = true;
        self.mulligan_ready = false;
        self.mulligan_confirmed = false;
        self.game_over = false;
        self.local_turn = false;
        self.local_life = STARTING_LIFE;
        self.opponent_life = STARTING_LIFE;
        self.mana = 0;
        self.max_mana = 0;
        self.hand.clear();
        for _ in 0..cards {
            self.draw();
        }
    }

    pub fn draw(&mut self) {
        let (name, cost) = CARD_POOL[self.next_card as usize % CARD_POOL.len()];
        self.hand.push(SimCard {
            id: self.next_card,
            name: name.to_string(),
            cost,
            playable: false,
        });
        self.next_card += 1;
    }

    /// Plays a card from hand. Returns `false` when it is not affordable.
    pub fn play_card(&mut self, card_id: u32) -> Result<bool, BotError> {
        let idx = self
            .hand
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| BotError::Host(format!("card {} is not in hand", card_id)))?;
        let cost = self.hand[idx].cost;
        if cost > self.mana {
            return Ok(false);
        }
        let card = self.hand.remove(idx);
        self.mana -= cost;
        self.opponent_life -= i32::from(cost) + 1;
        self.calls.push(HostCall::PlayCard(card.id));
        debug!("SimHost: played {} ({}), opponent at {}", card.name, cost, self.opponent_life);
        self.check_game_over();
        Ok(true)
    }

    fn check_game_over(&mut self) {
        if !self.game_over && (self.opponent_life <= 0 || self.local_life <= 0) {
            info!("SimHost: match over");
            self.game_over = true;
            self.end_overlay = true;
        }
    }

    fn begin_local_turn(&mut self) {
        self.local_turn = true;
        self.max_mana = (self.max_mana + 1).min(MAX_MANA);
        self.mana = self.max_mana;
        self.draw();
    }

    /// Lets the client make its own progress between two bot ticks.
    pub fn advance(&mut self) {
        if self.terminated {
            return;
        }
        if let Some(screen) = self.pending_screen.take() {
            self.screen = screen;
            return;
        }
        if self.matchmaking {
            self.start_match(3);
            return;
        }
        if !self.in_match || self.game_over {
            return;
        }
        if self.mulligan_phase {
            if self.mulligan_confirmed {
                self.mulligan_phase = false;
                self.begin_local_turn();
            } else {
                self.mulligan_ready = true;
            }
            return;
        }
        if !self.local_turn {
            self.opponent_steps += 1;
            if self.opponent_steps < OPPONENT_TURN_STEPS {
                return;
            }
            self.opponent_steps = 0;
            self.local_life -= OPPONENT_HIT;
            self.check_game_over();
            if !self.game_over {
                self.begin_local_turn();
            }
        }
    }
}

impl HostBridge for SimHost {
    type Card = SimCard;

    fn current_screen(&self) -> ScreenMode {
        self.screen
    }

    fn is_in_match(&self) -> bool {
        self.in_match
    }

    fn is_matchmaking(&self) -> bool {
        self.matchmaking
    }

    fn request_screen_transition(&mut self, target: ScreenMode) -> Result<(), BotError> {
        self.calls.push(HostCall::Transition(target));
        self.pending_screen = Some(target);
        Ok(())
    }

    fn notify_tournament_transition(&mut self) -> Result<(), BotError> {
        self.calls.push(HostCall::NotifyTournament);
        Ok(())
    }

    fn welcome_quests_present(&self) -> bool {
        self.welcome_quests
    }

    fn dismiss_welcome_quests(&mut self) -> Result<(), BotError> {
        self.calls.push(HostCall::DismissWelcomeQuests);
        self.welcome_quests = false;
        self.pending_screen = Some(ScreenMode::Hub);
        Ok(())
    }

    fn selected_deck_id(&self) -> i64 {
        self.deck_id
    }

    fn ranked_option(&self) -> bool {
        self.ranked
    }

    fn set_ranked_option(&mut self, ranked: bool) -> Result<(), BotError> {
        self.calls.push(HostCall::SetRankedOption(ranked));
        self.ranked = ranked;
        Ok(())
    }

    fn scenario_records(&self) -> Vec<ScenarioRecord> {
        self.scenarios.clone()
    }

    fn configure_practice(&mut self, difficulty: Difficulty) -> Result<(), BotError> {
        self.calls.push(HostCall::ConfigurePractice(difficulty));
        Ok(())
    }

    fn show_loading_popup(&mut self) -> Result<(), BotError> {
        self.calls.push(HostCall::LoadingPopup);
        Ok(())
    }

    fn show_matching_popup(&mut self) -> Result<(), BotError> {
        self.calls.push(HostCall::MatchingPopup);
        Ok(())
    }

    fn find_match(&mut self, game_type: GameType, mission: MissionId, deck_id: i64) -> Result<(), BotError> {
        self.calls.push(HostCall::FindMatch {
            game_type,
            mission,
            deck_id,
        });
        self.matchmaking = true;
        Ok(())
    }

    fn is_mulligan_phase(&self) -> bool {
        self.mulligan_phase
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn is_local_turn(&self) -> bool {
        self.local_turn
    }

    fn mulligan_ready(&self) -> bool {
        self.mulligan_ready
    }

    fn local_hand(&self) -> Vec<SimCard> {
        self.hand
            .iter()
            .map(|c| SimCard {
                playable: !self.mulligan_phase && c.cost <= self.mana,
                ..c.clone()
            })
            .collect()
    }

    fn remaining_life(&self, side: Side) -> i32 {
        match side {
            Side::Local => self.local_life,
            Side::Opponent => self.opponent_life,
        }
    }

    fn toggle_mulligan_card(&mut self, card: &SimCard) -> Result<(), BotError> {
        self.calls.push(HostCall::ToggleMulligan(card.id));
        let idx = self
            .hand
            .iter()
            .position(|c| c.id == card.id)
            .ok_or_else(|| BotError::Host(format!("card {} is not in hand", card.id)))?;
        self.hand.remove(idx);
        self.draw();
        Ok(())
    }

    fn confirm_mulligan(&mut self) -> Result<(), BotError> {
        self.calls.push(HostCall::ConfirmMulligan);
        self.mulligan_confirmed = true;
        Ok(())
    }

    fn end_turn(&mut self) -> Result<(), BotError> {
        self.calls.push(HostCall::EndTurn);
        self.local_turn = false;
        Ok(())
    }

    fn dismiss_end_of_match_overlay(&mut self) -> Result<bool, BotError> {
        if !self.end_overlay {
            return Ok(false);
        }
        self.calls.push(HostCall::DismissEndOfMatch);
        self.end_overlay = false;
        self.in_match = false;
        self.game_over = false;
        self.local_turn = false;
        self.pending_screen = Some(ScreenMode::Hub);
        Ok(true)
    }

    fn set_targeting_reticle(&mut self, enabled: bool) -> bool {
        std::mem::replace(&mut self.reticle_enabled, enabled)
    }

    fn mark_activity(&mut self) {
        self.activity_marks += 1;
    }

    fn terminate_process(&mut self) {
        self.calls.push(HostCall::Terminate);
        self.terminated = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimAction {
    Play { card_id: u32, cost: u8 },
}

/// Mulligans away expensive cards and plays whatever it can afford,
/// most expensive first.
#[derive(Debug, Clone)]
pub struct CurveEngine {
    pub mulligan_threshold: u8,
    pub play_delay: Duration,
    pub skip_delay: Duration,
}

impl Default for CurveEngine {
    fn default() -> Self {
        Self {
            mulligan_threshold: 4,
            play_delay: Duration::from_millis(1500),
            skip_delay: Duration::from_millis(200),
        }
    }
}

impl DecisionEngine<SimHost> for CurveEngine {
    type Action = SimAction;

    fn decide_mulligan(&mut self, hand: &[SimCard]) -> Result<Vec<SimCard>, BotError> {
        Ok(hand
            .iter()
            .filter(|c| c.cost >= self.mulligan_threshold)
            .cloned()
            .collect())
    }

    fn decide_turn(&mut self, hand: &[SimCard]) -> Result<Vec<SimAction>, BotError> {
        let mut playable: Vec<&SimCard> = hand.iter().filter(|c| c.playable).collect();
        playable.sort_by(|a, b| b.cost.cmp(&a.cost));
        Ok(playable
            .into_iter()
            .map(|c| SimAction::Play {
                card_id: c.id,
                cost: c.cost,
            })
            .collect())
    }

    fn apply_action(&mut self, action: SimAction, host: &mut SimHost) -> Result<Duration, BotError> {
        match action {
            SimAction::Play { card_id, cost } => {
                if host.play_card(card_id)? {
                    Ok(self.play_delay)
                } else {
                    debug!("CurveEngine: cannot afford card {} ({}) any more", card_id, cost);
                    Ok(self.skip_delay)
                }
            }
        }
    }
}
