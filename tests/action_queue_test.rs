// tests/action_queue_test.rs

mod common;

use std::time::Duration;

use common::*;
use hearth_pilot::app::action_queue::ActionQueue;
use hearth_pilot::app::bot::TickOutcome;
use hearth_pilot::app::control::OperatingMode;
use hearth_pilot::simulator::HostCall;

#[test]
fn test_queue_is_fifo() {
    let mut queue = ActionQueue::new();
    queue.extend([1, 2, 3]);
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.peek(), Some(&1));
    assert_eq!(queue.pop_next(), Some(1));
    assert_eq!(queue.pop_next(), Some(2));
    queue.extend([4]);
    assert_eq!(queue.pop_next(), Some(3));
    assert_eq!(queue.pop_next(), Some(4));
    assert!(queue.is_empty());
    assert_eq!(queue.pop_next(), None);
}

#[test]
fn test_drains_one_action_per_tick_in_order() {
    let engine = ScriptedEngine::with_turns(vec![vec![TestAction(1), TestAction(2), TestAction(3)]]);
    let (mut bot, mut t) = settled_bot(host_in_match(true), engine, OperatingMode::PracticeNormal);

    // Turn start edge: settle only.
    bot.tick_at(t).unwrap();
    assert_eq!(bot.engine().decide_turn_calls, 0);
    t += SETTLE;

    // Plan the turn.
    bot.tick_at(t).unwrap();
    assert_eq!(bot.engine().decide_turn_calls, 1);
    assert_eq!(bot.queued_actions().len(), 3);
    assert!(bot.engine().applied.is_empty());

    for expected_left in [2usize, 1, 0] {
        assert_eq!(bot.tick_at(t).unwrap(), TickOutcome::Ran);
        assert_eq!(bot.queued_actions().len(), expected_left);
        assert_eq!(bot.engine().decide_turn_calls, 1);
        assert_eq!(pending(&bot), Duration::from_millis(1000));
        // Nothing happens until the action delay has passed.
        assert_eq!(bot.tick_at(t).unwrap(), TickOutcome::Waiting);
        t += Duration::from_millis(1000);
    }
    assert_eq!(bot.engine().applied, vec![TestAction(1), TestAction(2), TestAction(3)]);

    // Queue empty again: one more decision, which is empty, so the turn ends.
    bot.tick_at(t).unwrap();
    assert_eq!(bot.engine().decide_turn_calls, 2);
    assert_eq!(bot.host().count_calls(&HostCall::EndTurn), 1);
}

#[test]
fn test_empty_decision_ends_turn_once_with_cooldown() {
    let mut host = host_in_match(true);
    host.hand.clear();
    let (mut bot, mut t) = settled_bot(host, ScriptedEngine::with_turns(vec![]), OperatingMode::PracticeNormal);

    bot.tick_at(t).unwrap();
    t += SETTLE;
    bot.tick_at(t).unwrap();

    assert_eq!(bot.engine().decide_turn_calls, 1);
    assert_eq!(bot.host().count_calls(&HostCall::EndTurn), 1);
    assert_eq!(pending(&bot), bot.config().end_turn_cooldown);
    assert!(bot.config().end_turn_cooldown >= Duration::from_millis(9000));

    for step in 0..9 {
        let outcome = bot.tick_at(t + Duration::from_millis(step * 1000)).unwrap();
        assert_eq!(outcome, TickOutcome::Waiting);
    }
    assert_eq!(bot.host().count_calls(&HostCall::EndTurn), 1);
}

#[test]
fn test_reticle_restored_after_step() {
    let engine = ScriptedEngine::with_turns(vec![vec![TestAction(7)]]);
    let (mut bot, mut t) = settled_bot(host_in_match(true), engine, OperatingMode::PracticeNormal);
    bot.tick_at(t).unwrap();
    t += SETTLE;
    bot.tick_at(t).unwrap();
    assert!(bot.host().reticle_enabled);
    bot.tick_at(t).unwrap();
    assert_eq!(bot.engine().applied, vec![TestAction(7)]);
    assert!(bot.host().reticle_enabled);
}

#[test]
fn test_failed_action_keeps_remaining_queue_and_backs_off() {
    let mut engine = ScriptedEngine::with_turns(vec![vec![TestAction(1), TestAction(2)]]);
    engine.fail_apply = Some("click missed".into());
    let (mut bot, mut t) = settled_bot(host_in_match(true), engine, OperatingMode::PracticeNormal);
    bot.tick_at(t).unwrap();
    t += SETTLE;
    bot.tick_at(t).unwrap();
    assert_eq!(bot.queued_actions().len(), 2);

    assert_eq!(bot.tick_at(t).unwrap(), TickOutcome::Backoff);
    // The failing action was consumed, the rest stays for the next tick.
    assert_eq!(bot.queued_actions().len(), 1);
    assert_eq!(pending(&bot), bot.config().error_backoff);
    assert!(bot.host().reticle_enabled);
}

#[test]
fn test_hidden_reticle_stays_hidden_after_step() {
    let mut host = host_in_match(true);
    host.reticle_enabled = false;
    let engine = ScriptedEngine::with_turns(vec![vec![TestAction(7)]]);
    let (mut bot, mut t) = settled_bot(host, engine, OperatingMode::PracticeNormal);
    bot.tick_at(t).unwrap();
    t += SETTLE;
    bot.tick_at(t).unwrap();
    bot.tick_at(t).unwrap();
    assert_eq!(bot.engine().applied, vec![TestAction(7)]);
    assert!(!bot.host().reticle_enabled);
}
