//! Behavior specs: what a card turns into and which callbacks it carries.
//!
//! Specs are built with chained builder methods. Callbacks are plain
//! closures; they receive every entity they act on through the
//! [`EffectContext`](crate::effects::EffectContext).

use serde::{Deserialize, Serialize};

use crate::core::EngineResult;
use crate::effects::{Condition, Effect, EffectContext, TargetRule};
use crate::game::Game;
use crate::triggers::EventKind;

use super::definition::{CardDefinition, CardType, Tribe};

/// A targeting rule paired with the effect it feeds.
#[derive(Clone, Debug)]
pub struct Targeted {
    pub rule: TargetRule,
    pub effect: Effect,
}

impl Targeted {
    /// Create a targeted effect.
    pub fn new<F>(rule: TargetRule, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        Self {
            rule,
            effect: Effect::new(f),
        }
    }

    /// Create an untargeted effect.
    pub fn untargeted<F>(f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        Self::new(TargetRule::None, f)
    }
}

/// Whose hub an ability listens on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraHost {
    /// The controlling player's hub.
    Owner,
    /// The opposing player's hub.
    Opponent,
    /// The game-wide hub.
    Game,
    /// The entity's own hub.
    Itself,
    /// The controlling player's hero.
    OwnerHero,
}

/// An event-driven ability bound while its entity is in play.
#[derive(Clone, Debug)]
pub struct TriggeredAbility {
    pub host: AuraHost,
    pub kind: EventKind,
    pub condition: Option<Condition>,
    pub effect: Effect,
}

/// Which minions a continuous stat aura covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraScope {
    /// Every friendly minion except the source.
    OtherFriendly,
    /// Every friendly minion including the source.
    AllFriendly,
    /// The minions directly left and right of the source.
    Adjacent,
}

/// A continuous attack/health bonus granted while the source is in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatAuraSpec {
    pub scope: AuraScope,
    pub attack: i32,
    pub health: i32,
}

/// Which cards a mana filter applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFilter {
    Any,
    Minions,
    Spells,
    Secrets,
    Weapons,
    Tribe(Tribe),
}

impl CardFilter {
    /// Check if a card matches.
    #[must_use]
    pub fn matches(&self, card: &CardDefinition) -> bool {
        match self {
            CardFilter::Any => card.card_type() != CardType::HeroPower,
            CardFilter::Minions => card.card_type() == CardType::Minion,
            CardFilter::Spells => card.is_spell(),
            CardFilter::Secrets => card.card_type() == CardType::Secret,
            CardFilter::Weapons => card.card_type() == CardType::Weapon,
            CardFilter::Tribe(tribe) => card.is_minion() && card.tribe == *tribe,
        }
    }
}

/// Whose costs a minion's mana filter changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterTarget {
    Owner,
    Opponent,
}

/// A cost change a minion imposes while in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaFilterSpec {
    /// Amount subtracted from the cost. Negative makes cards dearer.
    pub amount: i32,
    pub applies_to: CardFilter,
    /// The cost never drops below this.
    pub min: i32,
    pub target: FilterTarget,
}

/// Static keyword abilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    pub taunt: bool,
    pub charge: bool,
    pub stealth: bool,
    pub divine_shield: bool,
    pub windfury: bool,
    /// Freezes any character it damages.
    pub freeze: bool,
    /// Cannot be targeted by spells or hero powers.
    pub elusive: bool,
    pub spell_damage: i32,
    /// Extra times friendly deathrattles run.
    pub deathrattle_bonus: u32,
}

/// Everything needed to create a minion.
#[derive(Clone, Debug, Default)]
pub struct MinionSpec {
    pub attack: i32,
    pub health: i32,
    pub keywords: Keywords,
    pub battlecry: Option<Targeted>,
    pub deathrattles: Vec<Effect>,
    pub abilities: Vec<TriggeredAbility>,
    pub stat_auras: Vec<StatAuraSpec>,
    pub mana_filters: Vec<ManaFilterSpec>,
}

impl MinionSpec {
    /// A vanilla minion.
    #[must_use]
    pub fn new(attack: i32, health: i32) -> Self {
        Self {
            attack,
            health,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn taunt(mut self) -> Self {
        self.keywords.taunt = true;
        self
    }

    #[must_use]
    pub fn charge(mut self) -> Self {
        self.keywords.charge = true;
        self
    }

    #[must_use]
    pub fn stealth(mut self) -> Self {
        self.keywords.stealth = true;
        self
    }

    #[must_use]
    pub fn divine_shield(mut self) -> Self {
        self.keywords.divine_shield = true;
        self
    }

    #[must_use]
    pub fn windfury(mut self) -> Self {
        self.keywords.windfury = true;
        self
    }

    #[must_use]
    pub fn freeze(mut self) -> Self {
        self.keywords.freeze = true;
        self
    }

    #[must_use]
    pub fn elusive(mut self) -> Self {
        self.keywords.elusive = true;
        self
    }

    #[must_use]
    pub fn spell_damage(mut self, amount: i32) -> Self {
        self.keywords.spell_damage = amount;
        self
    }

    #[must_use]
    pub fn deathrattle_bonus(mut self, extra: u32) -> Self {
        self.keywords.deathrattle_bonus = extra;
        self
    }

    /// Set the battlecry (builder pattern).
    #[must_use]
    pub fn battlecry<F>(mut self, rule: TargetRule, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        self.battlecry = Some(Targeted::new(rule, f));
        self
    }

    /// Add a deathrattle (builder pattern).
    #[must_use]
    pub fn deathrattle<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        self.deathrattles.push(Effect::new(f));
        self
    }

    /// Add an ability fired by `kind` on `host` (builder pattern).
    #[must_use]
    pub fn on<F>(mut self, host: AuraHost, kind: EventKind, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        self.abilities.push(TriggeredAbility {
            host,
            kind,
            condition: None,
            effect: Effect::new(f),
        });
        self
    }

    /// Add a conditional ability (builder pattern).
    #[must_use]
    pub fn on_if<C, F>(mut self, host: AuraHost, kind: EventKind, condition: C, f: F) -> Self
    where
        C: Fn(&Game, &EffectContext) -> bool + Send + Sync + 'static,
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        self.abilities.push(TriggeredAbility {
            host,
            kind,
            condition: Some(Condition::new(condition)),
            effect: Effect::new(f),
        });
        self
    }

    /// Add a continuous stat aura (builder pattern).
    #[must_use]
    pub fn stat_aura(mut self, scope: AuraScope, attack: i32, health: i32) -> Self {
        self.stat_auras.push(StatAuraSpec {
            scope,
            attack,
            health,
        });
        self
    }

    /// Add a cost change (builder pattern).
    #[must_use]
    pub fn mana_filter(mut self, filter: ManaFilterSpec) -> Self {
        self.mana_filters.push(filter);
        self
    }
}

/// Everything needed to create a weapon.
#[derive(Clone, Debug, Default)]
pub struct WeaponSpec {
    pub attack: i32,
    pub durability: i32,
    pub battlecry: Option<Targeted>,
    pub deathrattles: Vec<Effect>,
    pub abilities: Vec<TriggeredAbility>,
}

impl WeaponSpec {
    /// A plain weapon.
    #[must_use]
    pub fn new(attack: i32, durability: i32) -> Self {
        Self {
            attack,
            durability,
            ..Self::default()
        }
    }

    /// Set the battlecry (builder pattern).
    #[must_use]
    pub fn battlecry<F>(mut self, rule: TargetRule, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        self.battlecry = Some(Targeted::new(rule, f));
        self
    }

    /// Add a deathrattle (builder pattern).
    #[must_use]
    pub fn deathrattle<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        self.deathrattles.push(Effect::new(f));
        self
    }

    /// Add an ability fired by `kind` on `host` (builder pattern).
    ///
    /// `AuraHost::Itself` means the weapon's own hub.
    #[must_use]
    pub fn on<F>(mut self, host: AuraHost, kind: EventKind, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        self.abilities.push(TriggeredAbility {
            host,
            kind,
            condition: None,
            effect: Effect::new(f),
        });
        self
    }
}

/// Whose events a secret watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecretHost {
    Opponent,
    Own,
    Game,
}

/// A hidden effect that reveals itself when its event fires.
#[derive(Clone, Debug)]
pub struct SecretSpec {
    pub trigger: EventKind,
    pub host: SecretHost,
    pub condition: Option<Condition>,
    pub effect: Effect,
}

impl SecretSpec {
    /// Create a secret.
    pub fn new<F>(trigger: EventKind, host: SecretHost, f: F) -> Self
    where
        F: Fn(&mut Game, &EffectContext) -> EngineResult<()> + Send + Sync + 'static,
    {
        Self {
            trigger,
            host,
            condition: None,
            effect: Effect::new(f),
        }
    }

    /// Only reveal when the condition holds (builder pattern).
    #[must_use]
    pub fn when<C>(mut self, condition: C) -> Self
    where
        C: Fn(&Game, &EffectContext) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Condition::new(condition));
        self
    }
}
