// app/host.rs
//! The boundary between the bot and the game client.
//!
//! Everything the bot knows about the client comes through [`HostBridge`]
//! queries, and everything it does goes through its action methods. How the
//! client is actually read or clicked is the implementor's business.

use std::fmt::Debug;

use crate::app::error::BotError;

/// Coarse screen category reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenMode {
    Startup,
    Login,
    Hub,
    Gameplay,
    CollectionManager,
    PackOpening,
    Tournament,
    Friendly,
    FatalError,
    Draft,
    Credits,
    Reset,
    Adventure,
    Invalid,
    /// A client value this crate has no handling for.
    Unknown(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Local,
    Opponent,
}

/// Queue type passed to the client's find-match call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    VsAi,
    Ranked,
    Unranked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissionId(pub i32);

impl MissionId {
    /// The player-versus-player mission used for every tournament queue.
    pub const MULTIPLAYER_1V1: MissionId = MissionId(2);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdventureId {
    Practice,
    Naxxramas,
    Other(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Normal,
    Expert,
}

impl Difficulty {
    pub fn from_expert(expert: bool) -> Self {
        if expert {
            Difficulty::Expert
        } else {
            Difficulty::Normal
        }
    }
}

/// One row of the client's scenario table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRecord {
    pub id: MissionId,
    pub adventure: AdventureId,
    pub difficulty: Difficulty,
}

pub trait HostBridge {
    type Card: Clone + Debug;

    // ---- screen and lobby ----
    fn current_screen(&self) -> ScreenMode;
    fn is_in_match(&self) -> bool;
    fn is_matchmaking(&self) -> bool;
    fn request_screen_transition(&mut self, target: ScreenMode) -> Result<(), BotError>;
    fn notify_tournament_transition(&mut self) -> Result<(), BotError>;
    fn welcome_quests_present(&self) -> bool;
    fn dismiss_welcome_quests(&mut self) -> Result<(), BotError>;

    // ---- match search ----
    fn selected_deck_id(&self) -> i64;
    fn ranked_option(&self) -> bool;
    fn set_ranked_option(&mut self, ranked: bool) -> Result<(), BotError>;
    fn scenario_records(&self) -> Vec<ScenarioRecord>;
    /// Selects the practice adventure at `difficulty` and opens its deck picker.
    fn configure_practice(&mut self, difficulty: Difficulty) -> Result<(), BotError>;
    fn show_loading_popup(&mut self) -> Result<(), BotError>;
    fn show_matching_popup(&mut self) -> Result<(), BotError>;
    fn find_match(&mut self, game_type: GameType, mission: MissionId, deck_id: i64) -> Result<(), BotError>;

    // ---- in match ----
    fn is_mulligan_phase(&self) -> bool;
    fn is_game_over(&self) -> bool;
    fn is_local_turn(&self) -> bool;
    /// The mulligan manager is active and its buttons are interactive.
    fn mulligan_ready(&self) -> bool;
    fn local_hand(&self) -> Vec<Self::Card>;
    fn remaining_life(&self, side: Side) -> i32;
    fn toggle_mulligan_card(&mut self, card: &Self::Card) -> Result<(), BotError>;
    fn confirm_mulligan(&mut self) -> Result<(), BotError>;
    fn end_turn(&mut self) -> Result<(), BotError>;
    /// Returns whether an end-of-match overlay was present and dismissed.
    fn dismiss_end_of_match_overlay(&mut self) -> Result<bool, BotError>;
    /// Shows or hides the targeting reticle and returns whether it was shown.
    fn set_targeting_reticle(&mut self, enabled: bool) -> bool;

    // ---- process ----
    /// Keeps the client's inactivity kicker from firing.
    fn mark_activity(&mut self);
    fn terminate_process(&mut self);
}
