//! Integration tests for event dispatch.

mod common;

use common::*;
use rust_duel::core::{EntityId, GameError};
use rust_duel::effects::Effect;
use rust_duel::triggers::{Binding, Emitter, EventKind, GameEvent};

const PING: EventKind = EventKind::Custom(1);

fn counting(key: &'static str) -> Effect {
    Effect::new(move |game, _ctx| {
        bump(game, key);
        Ok(())
    })
}

// =============================================================================
// Snapshot Tests
// =============================================================================

/// Test that listeners fire in the order they were bound.
#[test]
fn test_listeners_fire_in_bind_order() {
    let (mut game, _) = table();
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(|game, _| {
            game.set_counter("order", game.counter("order") * 10 + 1);
            Ok(())
        })),
    )
    .unwrap();
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(|game, _| {
            game.set_counter("order", game.counter("order") * 10 + 2);
            Ok(())
        })),
    )
    .unwrap();

    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();

    assert_eq!(game.counter("order"), 12);
}

/// Test that a listener unbound by an earlier listener does not run.
#[test]
fn test_unbound_during_fire_is_skipped() {
    let (mut game, _) = table();
    let victim = EntityId(900);
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(move |game, _| {
            game.unbind_source(victim);
            Ok(())
        })),
    )
    .unwrap();
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, counting("victim")).with_source(victim),
    )
    .unwrap();

    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();

    assert_eq!(game.counter("victim"), 0);
}

/// Test that a listener bound during a fire waits for the next one.
#[test]
fn test_bound_during_fire_waits() {
    let (mut game, _) = table();
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(|game, _| {
            game.bind(Emitter::Game, Binding::new(PING, FIRST, counting("late")))
                .map(|_| ())
        }))
        .once(),
    )
    .unwrap();

    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();
    assert_eq!(game.counter("late"), 0);

    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();
    assert_eq!(game.counter("late"), 1);
}

/// Test that unbind reports whether the listener existed.
#[test]
fn test_unbind() {
    let (mut game, _) = table();
    let id = game
        .bind(Emitter::Player(FIRST), Binding::new(PING, FIRST, counting("hits")))
        .unwrap();

    assert!(!game.unbind(Emitter::Game, id));
    assert!(game.unbind(Emitter::Player(FIRST), id));
    assert!(!game.unbind(Emitter::Player(FIRST), id));

    game.trigger(Emitter::Player(FIRST), GameEvent::new(PING)).unwrap();
    assert_eq!(game.counter("hits"), 0);
}

// =============================================================================
// One-shot and Depth Tests
// =============================================================================

/// Test that a one-shot listener runs once, even when its own effect
/// fires the event again.
#[test]
fn test_once_listener_runs_once() {
    let (mut game, _) = table();
    game.bind_once(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(|game, _| {
            bump(game, "once");
            game.trigger(Emitter::Game, GameEvent::new(PING))
        })),
    )
    .unwrap();

    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();
    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();

    assert_eq!(game.counter("once"), 1);
}

/// Test that runaway recursion stops at the configured depth.
#[test]
fn test_trigger_depth_limit() {
    let mut config = bare_config();
    config.max_trigger_depth = 8;
    let (mut game, _) = table_with(config);
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(|game, _| {
            bump(game, "depth");
            game.trigger(Emitter::Game, GameEvent::new(PING))
        })),
    )
    .unwrap();

    let err = game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap_err();

    assert_eq!(err, GameError::TriggerDepth { depth: 8 });
    assert!(err.is_fatal());
    assert_eq!(game.counter("depth"), 8);
}

/// Test that an error from a listener stops the fire and propagates.
#[test]
fn test_listener_error_propagates() {
    let (mut game, _) = table();
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(|_, ctx| {
            Err(GameError::effect(ctx.source, "boom"))
        })),
    )
    .unwrap();
    game.bind(Emitter::Game, Binding::new(PING, FIRST, counting("after")))
        .unwrap();

    let err = game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap_err();

    assert!(matches!(err, GameError::Effect { .. }));
    assert_eq!(game.counter("after"), 0);
}

// =============================================================================
// Context Tests
// =============================================================================

/// Test that callbacks see the binding's context and the event's target.
#[test]
fn test_listener_context() {
    let (mut game, _) = table();
    let hero = game.hero_id(SECOND);
    game.bind(
        Emitter::Player(SECOND),
        Binding::new(PING, SECOND, Effect::new(move |game, ctx| {
            assert_eq!(ctx.controller, SECOND);
            assert_eq!(ctx.source, Some(EntityId(900)));
            assert_eq!(ctx.subject, Some(EntityId(901)));
            assert_eq!(ctx.target, Some(hero));
            assert_eq!(ctx.event.as_ref().map(|e| e.kind), Some(PING));
            bump(game, "seen");
            Ok(())
        }))
        .with_source(EntityId(900))
        .with_subject(EntityId(901)),
    )
    .unwrap();

    game.trigger(Emitter::Player(SECOND), GameEvent::new(PING).with_target(hero))
        .unwrap();

    assert_eq!(game.counter("seen"), 1);
}

/// Test that firing on the hub of an unknown entity is a no-op.
#[test]
fn test_fire_on_missing_entity() {
    let (mut game, _) = table();
    assert!(game
        .trigger(Emitter::Entity(EntityId(4242)), GameEvent::new(PING))
        .is_ok());
}

/// Test that binding to an unknown entity fails.
#[test]
fn test_bind_to_missing_entity() {
    let (mut game, _) = table();
    let err = game
        .bind(Emitter::Entity(EntityId(4242)), Binding::new(PING, FIRST, counting("x")))
        .unwrap_err();
    assert_eq!(err, GameError::UnknownEntity(EntityId(4242)));
}

// =============================================================================
// Card Ability Tests
// =============================================================================

/// Test that Scavenging Hyena grows when a friendly Beast dies.
#[test]
fn test_hyena_reacts_to_beast_death() {
    let (mut game, cards) = table();
    let hyena = ready_minion(&mut game, FIRST, cards.scavenging_hyena);
    let boar = ready_minion(&mut game, FIRST, cards.stonetusk_boar);
    let yeti = ready_minion(&mut game, FIRST, cards.chillwind_yeti);

    game.destroy(yeti).unwrap();
    game.settle().unwrap();
    assert_eq!(game.attack_of(hyena), 2);

    game.destroy(boar).unwrap();
    game.settle().unwrap();
    assert_eq!(game.attack_of(hyena), 4);
    assert_eq!(health(&game, hyena), 3);
}

/// Test that an enemy Beast dying does not feed the Hyena.
#[test]
fn test_hyena_ignores_enemy_beasts() {
    let (mut game, cards) = table();
    let hyena = ready_minion(&mut game, FIRST, cards.scavenging_hyena);
    let boar = ready_minion(&mut game, SECOND, cards.stonetusk_boar);

    game.destroy(boar).unwrap();
    game.settle().unwrap();

    assert_eq!(game.attack_of(hyena), 2);
}

/// Test that silence removes a minion's listeners.
#[test]
fn test_silence_unbinds_abilities() {
    let (mut game, cards) = table();
    let hyena = ready_minion(&mut game, FIRST, cards.scavenging_hyena);
    let boar = ready_minion(&mut game, FIRST, cards.stonetusk_boar);

    game.silence(hyena).unwrap();
    game.destroy(boar).unwrap();
    game.settle().unwrap();

    let hyena = game.character(hyena).unwrap();
    assert!(hyena.status.silenced);
    assert_eq!(hyena.calculate_attack(), 2);
}

/// Test that a listener contributed by a minion leaves with it.
#[test]
fn test_listeners_leave_with_their_source() {
    let (mut game, cards) = table();
    let yeti = ready_minion(&mut game, FIRST, cards.chillwind_yeti);
    game.bind(Emitter::Game, Binding::new(PING, FIRST, counting("yeti")).with_source(yeti))
        .unwrap();

    game.destroy(yeti).unwrap();
    game.settle().unwrap();
    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();

    assert_eq!(game.counter("yeti"), 0);
}

/// Test that a minion silenced inside its own listener stops reacting,
/// while other listeners in the same fire still run.
#[test]
fn test_silenced_by_own_listener() {
    let (mut game, cards) = table();
    let yeti = ready_minion(&mut game, FIRST, cards.chillwind_yeti);
    game.bind(
        Emitter::Game,
        Binding::new(PING, FIRST, Effect::new(|game, ctx| {
            bump(game, "yeti");
            match ctx.subject {
                Some(me) => game.silence(me),
                None => Ok(()),
            }
        }))
        .with_source(yeti)
        .with_subject(yeti),
    )
    .unwrap();
    game.bind(Emitter::Game, Binding::new(PING, FIRST, counting("bystander")))
        .unwrap();

    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();
    game.trigger(Emitter::Game, GameEvent::new(PING)).unwrap();

    assert_eq!(game.counter("yeti"), 1);
    assert_eq!(game.counter("bystander"), 2);
    assert!(game.character(yeti).unwrap().status.silenced);
}
