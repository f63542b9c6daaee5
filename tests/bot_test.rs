// tests/bot_test.rs

mod common;

use std::time::Duration;

use common::*;
use hearth_pilot::app::bot::TickOutcome;
use hearth_pilot::app::config::BotConfig;
use hearth_pilot::app::control::OperatingMode;
use hearth_pilot::app::host::ScreenMode;
use hearth_pilot::app::App;
use hearth_pilot::simulator::{HostCall, SimHost};

#[test]
fn test_paused_bot_does_nothing() {
    let (mut bot, t) = settled_bot(SimHost::on_screen(ScreenMode::Hub), ScriptedEngine::default(), OperatingMode::PracticeNormal);
    let handle = bot.handle();
    let marks = bot.host().activity_marks;

    handle.set_running(false);
    assert_eq!(bot.tick_at(t).unwrap(), TickOutcome::Paused);
    assert!(bot.host().calls.is_empty());
    assert_eq!(bot.host().activity_marks, marks);

    handle.set_running(true);
    assert_eq!(bot.tick_at(t).unwrap(), TickOutcome::Ran);
    assert_eq!(bot.host().calls, vec![HostCall::Transition(ScreenMode::Adventure)]);
    assert_eq!(bot.host().activity_marks, marks + 1);
}

#[test]
fn test_gated_tick_has_no_side_effects() {
    let (mut bot, t) = settled_bot(SimHost::on_screen(ScreenMode::Hub), ScriptedEngine::default(), OperatingMode::PracticeNormal);
    let marks = bot.host().activity_marks;
    for ms in [0u64, 1000, 4999] {
        let early = t - SETTLE + Duration::from_millis(ms);
        assert_eq!(bot.tick_at(early).unwrap(), TickOutcome::Waiting);
    }
    assert_eq!(bot.host().activity_marks, marks);
    assert!(bot.host().calls.is_empty());
}

#[test]
fn test_decision_failure_backs_off_and_retries() {
    let mut engine = ScriptedEngine::with_turns(vec![vec![TestAction(1)]]);
    engine.fail_decide_turn = Some("policy blew up".into());
    let (mut bot, mut t) = settled_bot(host_in_match(true), engine, OperatingMode::PracticeNormal);
    bot.tick_at(t).unwrap();
    t += SETTLE;

    assert_eq!(bot.tick_at(t).unwrap(), TickOutcome::Backoff);
    assert_eq!(pending(&bot), bot.config().error_backoff);
    assert!(!bot.is_halted());
    assert_eq!(bot.tick_at(t + Duration::from_secs(5)).unwrap(), TickOutcome::Waiting);

    // A fixed engine picks up where the failed tick left off.
    let mut fixed = ScriptedEngine::with_turns(vec![vec![TestAction(9)]]);
    fixed.action_delay = Duration::from_millis(500);
    let broken = bot.reload_engine(fixed);
    assert_eq!(broken.decide_turn_calls, 1);

    t += bot.config().error_backoff;
    bot.tick_at(t).unwrap();
    assert_eq!(bot.queued_actions().len(), 1);
    bot.tick_at(t).unwrap();
    assert_eq!(bot.engine().applied, vec![TestAction(9)]);
}

#[test]
fn test_reload_keeps_queue_and_delay() {
    let engine = ScriptedEngine::with_turns(vec![vec![TestAction(1), TestAction(2)]]);
    let (mut bot, mut t) = settled_bot(host_in_match(true), engine, OperatingMode::PracticeNormal);
    bot.tick_at(t).unwrap();
    t += SETTLE;
    bot.tick_at(t).unwrap();
    bot.tick_at(t).unwrap();
    assert_eq!(bot.queued_actions().len(), 1);
    let before = bot.delay().pending();

    bot.reload_engine(ScriptedEngine::default());
    assert_eq!(bot.queued_actions().len(), 1);
    assert_eq!(bot.delay().pending(), before);
    assert!(bot.dispatcher().match_flow().was_my_turn());

    t += Duration::from_millis(1000);
    bot.tick_at(t).unwrap();
    assert_eq!(bot.engine().applied, vec![TestAction(2)]);
    assert_eq!(bot.engine().decide_turn_calls, 0);
}

#[test]
fn test_simulated_practice_session_finishes_matches() {
    let config = BotConfig::default().with_seed(7);
    let mut app = App::new(config, OperatingMode::PracticeNormal, Duration::from_millis(250), false);
    app.run(6000).unwrap();

    let bot = app.bot();
    assert!(!bot.is_halted());
    assert!(bot.host().find_match_calls() >= 1);
    assert!(bot.host().count_calls(&HostCall::ConfirmMulligan) >= 1);
    assert!(bot.host().count_calls(&HostCall::EndTurn) >= 1);
    assert!(!bot.session().records().is_empty());
}

#[test]
fn test_simulated_ranked_session_joins_ranked_queue() {
    let config = BotConfig::default().with_seed(3);
    let mut app = App::new(config, OperatingMode::TournamentRanked, Duration::from_millis(250), false);
    app.run(400).unwrap();

    let host = app.bot().host();
    assert_eq!(host.count_calls(&HostCall::SetRankedOption(true)), 1);
    assert!(host.count_calls(&HostCall::MatchingPopup) >= 1);
}
