//! Secrets: hidden effects waiting on an opponent's action.

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::triggers::{Emitter, ListenerId};

/// A secret in play.
///
/// A secret is inactive during its owner's turn and listens only while
/// `active`. Activation records where its listener lives so deactivation
/// and copies can find it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secret {
    pub id: EntityId,
    pub owner: PlayerId,
    pub card: CardId,
    pub active: bool,
    pub listener: Option<(Emitter, ListenerId)>,
}

impl Secret {
    #[must_use]
    pub fn new(id: EntityId, owner: PlayerId, card: CardId) -> Self {
        Self {
            id,
            owner,
            card,
            active: false,
            listener: None,
        }
    }
}
