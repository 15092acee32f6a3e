//! Effect callbacks.
//!
//! Card behavior is expressed as callbacks over the game. A callback never
//! holds entity handles of its own: everything it works on arrives through
//! the [`EffectContext`] (the contributing entity, the subject it was bound
//! to, the chosen target, the triggering event). Because of that, cloning a
//! callback into a copied game needs no translation.
//!
//! Per-entity mutable state belongs in entity counters, not in captures.

use std::fmt;
use std::sync::Arc;

use crate::core::{EngineResult, EntityId, PlayerId};
use crate::game::Game;
use crate::triggers::GameEvent;

type Callback = dyn Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync;
type Predicate = dyn Fn(&Game, &EffectContext) -> bool + Send + Sync;

/// Everything a callback is told about why it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectContext {
    /// The player whose card produced the effect.
    pub controller: PlayerId,
    /// The entity that contributed the effect (minion, weapon, secret).
    pub source: Option<EntityId>,
    /// Extra entity the effect was bound to act on.
    pub subject: Option<EntityId>,
    /// Chosen target, or the triggering event's target.
    pub target: Option<EntityId>,
    /// The event being handled, for triggered callbacks.
    pub event: Option<GameEvent>,
}

impl EffectContext {
    /// Create a context for a controller.
    #[must_use]
    pub fn new(controller: PlayerId) -> Self {
        Self {
            controller,
            source: None,
            subject: None,
            target: None,
            event: None,
        }
    }

    /// Set the source entity (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the subject entity (builder pattern).
    #[must_use]
    pub fn with_subject(mut self, subject: EntityId) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Set the target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    /// Attach the triggering event (builder pattern).
    #[must_use]
    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// The opponent of the controller.
    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.controller.other()
    }
}

/// A shareable game callback.
///
/// ```
/// use rust_duel::effects::Effect;
///
/// let noop = Effect::new(|_game, _ctx| Ok(()));
/// let copy = noop.clone();
/// assert!(noop.same_as(&copy));
/// ```
#[derive(Clone)]
pub struct Effect(Arc<Callback>);

impl Effect {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        Effect(Arc::new(f))
    }

    /// Run the callback.
    pub fn apply(&self, game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
        (self.0)(game, ctx)
    }

    /// Check whether two handles share one callback.
    #[must_use]
    pub fn same_as(&self, other: &Effect) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect(..)")
    }
}

/// A shareable read-only test over the game.
#[derive(Clone)]
pub struct Condition(Arc<Predicate>);

impl Condition {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Game, &EffectContext) -> bool + Send + Sync + 'static,
    {
        Condition(Arc::new(f))
    }

    /// Evaluate the predicate.
    #[must_use]
    pub fn check(&self, game: &Game, ctx: &EffectContext) -> bool {
        (self.0)(game, ctx)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}
