//! Event hubs.
//!
//! Every emitter (the game, each player, each character and weapon) owns an
//! `EventHub`: an ordered list of listeners, each bound to one event kind.
//!
//! ## Firing discipline
//!
//! The game fires an event by taking a [`snapshot`](EventHub::snapshot) of
//! the matching listeners and walking it in registration order. Before each
//! invocation it checks [`contains`](EventHub::contains): a listener that an
//! earlier callback unbound is skipped. One-shot listeners are unbound before
//! their callback runs. Listeners bound while the walk is in progress are not
//! in the snapshot and wait for the next firing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};
use crate::effects::Effect;

use super::event::EventKind;

/// Unique identifier for a listener within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Names the hub an event is fired on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emitter {
    /// Game-wide events.
    Game,
    /// Events belonging to one player.
    Player(PlayerId),
    /// Events on one character or weapon.
    Entity(EntityId),
}

/// What to bind: the event kind, the callback, and its context.
#[derive(Clone, Debug)]
pub struct Binding {
    /// Event kind to listen for.
    pub kind: EventKind,

    /// Callback to run.
    pub effect: Effect,

    /// Player the callback acts for.
    pub controller: PlayerId,

    /// Entity that contributed the listener. Silencing or removing it
    /// unbinds the listener.
    pub source: Option<EntityId>,

    /// Entity the callback acts on.
    pub subject: Option<EntityId>,

    /// Fire at most once.
    pub once: bool,
}

impl Binding {
    /// Create a binding.
    pub fn new(kind: EventKind, controller: PlayerId, effect: Effect) -> Self {
        Self {
            kind,
            effect,
            controller,
            source: None,
            subject: None,
            once: false,
        }
    }

    /// Set the contributing entity (builder pattern).
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

    /// Make the binding one-shot (builder pattern).
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

/// A registered binding.
#[derive(Clone, Debug)]
pub struct Listener {
    pub id: ListenerId,
    pub binding: Binding,
}

impl Listener {
    /// Check whether this listener references an entity as source or subject.
    #[must_use]
    pub fn references(&self, entity: EntityId) -> bool {
        self.binding.source == Some(entity) || self.binding.subject == Some(entity)
    }
}

/// Ordered listener storage for one emitter.
#[derive(Clone, Debug, Default)]
pub struct EventHub {
    listeners: Vec<Listener>,
}

impl EventHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener under a game-allocated id.
    pub fn bind(&mut self, id: ListenerId, binding: Binding) {
        self.listeners.push(Listener { id, binding });
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unbind(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|l| l.id == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every listener contributed by `source`.
    ///
    /// Returns how many were removed.
    pub fn unbind_source(&mut self, source: EntityId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.binding.source != Some(source));
        before - self.listeners.len()
    }

    /// Keep only listeners matching a predicate.
    pub fn retain(&mut self, keep: impl FnMut(&Listener) -> bool) {
        self.listeners.retain(keep);
    }

    /// Listeners for `kind`, in registration order, as of now.
    #[must_use]
    pub fn snapshot(&self, kind: EventKind) -> SmallVec<[Listener; 4]> {
        self.listeners
            .iter()
            .filter(|l| l.binding.kind == kind)
            .cloned()
            .collect()
    }

    /// Check if a listener is still registered.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Number of listeners for one kind.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.binding.kind == kind).count()
    }

    /// Total number of listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if the hub has no listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Iterate over listeners in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.listeners.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Effect {
        Effect::new(|_, _| Ok(()))
    }

    #[test]
    fn test_bind_and_snapshot_order() {
        let mut hub = EventHub::new();
        hub.bind(ListenerId(3), Binding::new(EventKind::Damaged, PlayerId::FIRST, noop()));
        hub.bind(ListenerId(1), Binding::new(EventKind::TurnEnded, PlayerId::FIRST, noop()));
        hub.bind(ListenerId(2), Binding::new(EventKind::Damaged, PlayerId::SECOND, noop()));

        let snap = hub.snapshot(EventKind::Damaged);
        let ids: Vec<_> = snap.iter().map(|l| l.id).collect();

        // Registration order, not id order
        assert_eq!(ids, vec![ListenerId(3), ListenerId(2)]);
        assert_eq!(hub.count(EventKind::TurnEnded), 1);
        assert_eq!(hub.len(), 3);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut hub = EventHub::new();
        hub.bind(ListenerId(1), Binding::new(EventKind::Healed, PlayerId::FIRST, noop()));

        let snap = hub.snapshot(EventKind::Healed);
        assert!(hub.unbind(ListenerId(1)));

        assert_eq!(snap.len(), 1);
        assert!(!hub.contains(ListenerId(1)));
    }

    #[test]
    fn test_unbind_missing() {
        let mut hub = EventHub::new();
        assert!(!hub.unbind(ListenerId(9)));
    }

    #[test]
    fn test_unbind_source() {
        let mut hub = EventHub::new();
        let imp = EntityId(10);
        hub.bind(
            ListenerId(1),
            Binding::new(EventKind::TurnEnded, PlayerId::FIRST, noop()).with_source(imp),
        );
        hub.bind(
            ListenerId(2),
            Binding::new(EventKind::TurnStarted, PlayerId::FIRST, noop()).with_source(imp),
        );
        hub.bind(
            ListenerId(3),
            Binding::new(EventKind::TurnEnded, PlayerId::FIRST, noop()).with_subject(imp),
        );

        assert_eq!(hub.unbind_source(imp), 2);
        assert_eq!(hub.len(), 1);
        assert!(hub.iter().next().unwrap().references(imp));
    }

    #[test]
    fn test_binding_builder() {
        let binding = Binding::new(EventKind::Attack, PlayerId::SECOND, noop())
            .with_source(EntityId(1))
            .with_subject(EntityId(2))
            .once();

        assert!(binding.once);
        assert_eq!(binding.source, Some(EntityId(1)));
        assert_eq!(binding.subject, Some(EntityId(2)));
        assert_eq!(binding.controller, PlayerId::SECOND);
    }

    #[test]
    fn test_listener_id_display() {
        assert_eq!(ListenerId::new(5).to_string(), "Listener(5)");
    }
}
