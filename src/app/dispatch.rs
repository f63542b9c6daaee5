// app/dispatch.rs

use tracing::{error, info, warn};

use crate::app::control::OperatingMode;
use crate::app::decision::DecisionEngine;
use crate::app::error::BotError;
use crate::app::host::{HostBridge, ScreenMode};
use crate::app::lobby::Lobby;
use crate::app::match_flow::MatchFlow;
use crate::app::state::TickContext;

/// Top-level state machine keyed on the client's current screen.
#[derive(Debug)]
pub struct ModeDispatcher {
    last_screen: ScreenMode,
    lobby: Lobby,
    flow: MatchFlow,
}

impl Default for ModeDispatcher {
    fn default() -> Self {
        Self {
            last_screen: ScreenMode::Startup,
            lobby: Lobby::new(),
            flow: MatchFlow::new(),
        }
    }
}

impl ModeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_screen(&self) -> ScreenMode {
        self.last_screen
    }

    pub fn lobby(&self) -> &Lobby {
        &self.lobby
    }

    pub fn match_flow(&self) -> &MatchFlow {
        &self.flow
    }

    /// Runs one tick of screen handling. `mode_code` is the operating mode
    /// snapshot taken at the start of the tick.
    pub fn dispatch<H, D>(&mut self, ctx: &mut TickContext<'_, H, D>, mode_code: u8) -> Result<(), BotError>
    where
        H: HostBridge,
        D: DecisionEngine<H>,
    {
        let screen = ctx.host.current_screen();

        // Screens are unstable right after a transition.
        if screen != self.last_screen {
            info!("Dispatcher: screen changed {:?} -> {:?}", self.last_screen, screen);
            if self.last_screen == ScreenMode::Gameplay || screen == ScreenMode::Gameplay {
                self.flow.reset(ctx.queue);
            }
            self.last_screen = screen;
            ctx.wait_for(ctx.config.screen_settle);
            return Ok(());
        }

        match screen {
            ScreenMode::Startup
            | ScreenMode::CollectionManager
            | ScreenMode::PackOpening
            | ScreenMode::Friendly
            | ScreenMode::Draft
            | ScreenMode::Credits => {
                info!("Dispatcher: unsupported screen {:?}, going to hub", screen);
                ctx.host.request_screen_transition(ScreenMode::Hub)?;
            }

            ScreenMode::Invalid | ScreenMode::FatalError | ScreenMode::Reset => {
                error!("Dispatcher: fatal error screen {:?}", screen);
                error!("Dispatcher: force closing game!");
                ctx.host.terminate_process();
                return Err(BotError::FatalScreen(screen));
            }

            ScreenMode::Login => {
                if ctx.host.welcome_quests_present() {
                    info!("Dispatcher: entering main menu");
                    ctx.host.dismiss_welcome_quests()?;
                }
                ctx.wait_for(ctx.config.login_settle);
            }

            ScreenMode::Hub => match OperatingMode::from_code(mode_code)? {
                OperatingMode::PracticeNormal | OperatingMode::PracticeExpert => {
                    info!("Dispatcher: entering practice mode");
                    ctx.host.request_screen_transition(ScreenMode::Adventure)?;
                }
                OperatingMode::TournamentRanked | OperatingMode::TournamentUnranked => {
                    info!("Dispatcher: entering tournament mode");
                    ctx.host.request_screen_transition(ScreenMode::Tournament)?;
                    ctx.host.notify_tournament_transition()?;
                }
            },

            ScreenMode::Gameplay => {
                let result = self.flow.update(ctx);
                self.lobby.reset();
                result?;
            }

            ScreenMode::Adventure => {
                let expert = match OperatingMode::from_code(mode_code)? {
                    OperatingMode::PracticeNormal => false,
                    OperatingMode::PracticeExpert => true,
                    OperatingMode::TournamentRanked | OperatingMode::TournamentUnranked => {
                        warn!("Dispatcher: inside wrong sub-menu {:?}", screen);
                        ctx.host.request_screen_transition(ScreenMode::Hub)?;
                        return Ok(());
                    }
                };
                self.lobby.join_practice(ctx, expert)?;
            }

            ScreenMode::Tournament => {
                let ranked = match OperatingMode::from_code(mode_code)? {
                    OperatingMode::TournamentRanked => true,
                    OperatingMode::TournamentUnranked => false,
                    OperatingMode::PracticeNormal | OperatingMode::PracticeExpert => {
                        warn!("Dispatcher: inside wrong sub-menu {:?}", screen);
                        ctx.host.request_screen_transition(ScreenMode::Hub)?;
                        return Ok(());
                    }
                };
                self.lobby.join_tournament(ctx, ranked)?;
            }

            ScreenMode::Unknown(code) => {
                warn!("Dispatcher: unknown screen code {}", code);
            }
        }
        Ok(())
    }
}
