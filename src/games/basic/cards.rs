//! Card definitions for the basic set.

use crate::cards::{
    AuraHost, AuraScope, CardDefinition, CardFilter, CardId, CardRegistry, FilterTarget,
    ManaFilterSpec, MinionSpec, Rarity, SecretHost, SecretSpec, Targeted, Tribe, WeaponSpec,
};
use crate::core::{EngineResult, EntityId, GameError, PlayerId};
use crate::effects::{EffectContext, TargetRule};
use crate::game::Game;
use crate::triggers::EventKind;
use crate::zones::ZonePosition;

/// Ids of every card in the basic set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasicCards {
    pub flame_imp: CardId,
    pub pit_lord: CardId,
    pub voidwalker: CardId,
    pub dread_infernal: CardId,
    pub felguard: CardId,
    pub doomguard: CardId,
    pub succubus: CardId,
    pub summoning_portal: CardId,
    pub blood_imp: CardId,
    pub void_terror: CardId,
    pub voidcaller: CardId,
    pub lord_jaraxxus: CardId,
    pub infernal: CardId,
    pub blood_fury: CardId,
    pub inferno: CardId,
    pub fiery_war_axe: CardId,
    pub arcanite_reaper: CardId,
    pub gorehowl: CardId,
    pub stonetusk_boar: CardId,
    pub chillwind_yeti: CardId,
    pub boulderfist_ogre: CardId,
    pub water_elemental: CardId,
    pub harvest_golem: CardId,
    pub damaged_golem: CardId,
    pub baron_rivendare: CardId,
    pub stalagg: CardId,
    pub feugen: CardId,
    pub thaddius: CardId,
    pub scavenging_hyena: CardId,
    pub stormwind_champion: CardId,
    pub sorcerers_apprentice: CardId,
    pub kobold_geomancer: CardId,
    pub frostbolt: CardId,
    pub fireball: CardId,
    pub assassinate: CardId,
    pub arcane_missiles: CardId,
    pub silence: CardId,
    pub flamestrike: CardId,
    pub explosive_trap: CardId,
    pub the_coin: CardId,
    pub fireblast: CardId,
    pub life_tap: CardId,
    pub armor_up: CardId,
}

impl BasicCards {
    /// Register the whole set and return its ids.
    pub fn register(registry: &mut CardRegistry) -> Self {
        // Cards other cards create come first so their ids can be captured.
        let damaged_golem = registry.add(
            CardDefinition::minion("Damaged Golem", 1, MinionSpec::new(2, 1)).with_tribe(Tribe::Mech),
        );
        let thaddius = registry.add(
            CardDefinition::minion("Thaddius", 10, MinionSpec::new(11, 11)).with_rarity(Rarity::Legendary),
        );
        let infernal = registry.add(demon("Infernal", 6, MinionSpec::new(6, 6)));
        let blood_fury = registry.add(CardDefinition::weapon("Blood Fury", 3, WeaponSpec::new(3, 8)));
        let inferno = registry.add(CardDefinition::hero_power(
            "INFERNO!",
            2,
            Targeted::untargeted(move |game, ctx| {
                game.summon(ctx.controller, infernal, ZonePosition::Top).map(|_| ())
            }),
        ));

        Self {
            damaged_golem,
            thaddius,
            infernal,
            blood_fury,
            inferno,
            flame_imp: registry.add(demon("Flame Imp", 1, MinionSpec::new(3, 2).battlecry(
                TargetRule::None,
                |game, ctx| hit_own_hero(game, ctx, 3),
            ))),
            pit_lord: registry.add(demon("Pit Lord", 4, MinionSpec::new(5, 6).battlecry(
                TargetRule::None,
                |game, ctx| hit_own_hero(game, ctx, 5),
            ))),
            voidwalker: registry.add(demon("Voidwalker", 1, MinionSpec::new(1, 3).taunt())),
            dread_infernal: registry.add(demon(
                "Dread Infernal",
                6,
                MinionSpec::new(6, 6).battlecry(TargetRule::None, dread_infernal),
            )),
            felguard: registry.add(demon(
                "Felguard",
                3,
                MinionSpec::new(3, 5).taunt().battlecry(TargetRule::None, |game, ctx| {
                    game.destroy_mana_crystal(ctx.controller);
                    Ok(())
                }),
            )),
            doomguard: registry.add(demon(
                "Doomguard",
                5,
                MinionSpec::new(5, 7).charge().battlecry(TargetRule::None, |game, ctx| {
                    game.discard_random(ctx.controller)?;
                    game.discard_random(ctx.controller)?;
                    Ok(())
                }),
            )),
            succubus: registry.add(demon(
                "Succubus",
                2,
                MinionSpec::new(4, 3).battlecry(TargetRule::None, |game, ctx| {
                    game.discard_random(ctx.controller).map(|_| ())
                }),
            )),
            summoning_portal: registry.add(CardDefinition::minion(
                "Summoning Portal",
                4,
                MinionSpec::new(0, 4).mana_filter(ManaFilterSpec {
                    amount: 2,
                    applies_to: CardFilter::Minions,
                    min: 1,
                    target: FilterTarget::Owner,
                }),
            )),
            blood_imp: registry.add(demon(
                "Blood Imp",
                1,
                MinionSpec::new(0, 1)
                    .stealth()
                    .on(AuraHost::Owner, EventKind::TurnEnded, blood_imp),
            )),
            void_terror: registry.add(demon(
                "Void Terror",
                3,
                MinionSpec::new(3, 3).battlecry(TargetRule::None, void_terror),
            )),
            voidcaller: registry.add(demon(
                "Voidcaller",
                4,
                MinionSpec::new(3, 4).deathrattle(voidcaller),
            )),
            lord_jaraxxus: registry.add(
                demon(
                    "Lord Jaraxxus",
                    9,
                    MinionSpec::new(3, 15).battlecry(TargetRule::None, move |game, ctx| {
                        lord_jaraxxus(game, ctx, inferno, blood_fury)
                    }),
                )
                .with_rarity(Rarity::Legendary),
            ),
            fiery_war_axe: registry.add(CardDefinition::weapon("Fiery War Axe", 2, WeaponSpec::new(3, 2))),
            arcanite_reaper: registry.add(CardDefinition::weapon("Arcanite Reaper", 5, WeaponSpec::new(5, 2))),
            gorehowl: registry.add(
                CardDefinition::weapon(
                    "Gorehowl",
                    7,
                    WeaponSpec::new(7, 1).on(AuraHost::OwnerHero, EventKind::Attack, gorehowl),
                )
                .with_rarity(Rarity::Epic),
            ),
            stonetusk_boar: registry.add(
                CardDefinition::minion("Stonetusk Boar", 1, MinionSpec::new(1, 1).charge())
                    .with_tribe(Tribe::Beast),
            ),
            chillwind_yeti: registry.add(CardDefinition::minion("Chillwind Yeti", 4, MinionSpec::new(4, 5))),
            boulderfist_ogre: registry.add(CardDefinition::minion("Boulderfist Ogre", 6, MinionSpec::new(6, 7))),
            water_elemental: registry.add(CardDefinition::minion(
                "Water Elemental",
                4,
                MinionSpec::new(3, 6).freeze(),
            )),
            harvest_golem: registry.add(
                CardDefinition::minion(
                    "Harvest Golem",
                    3,
                    MinionSpec::new(2, 3).deathrattle(move |game, ctx| {
                        let slot = dying_slot(game, ctx);
                        game.summon(ctx.controller, damaged_golem, slot).map(|_| ())
                    }),
                )
                .with_tribe(Tribe::Mech),
            ),
            baron_rivendare: registry.add(
                CardDefinition::minion("Baron Rivendare", 4, MinionSpec::new(1, 7).deathrattle_bonus(1))
                    .with_rarity(Rarity::Legendary),
            ),
            stalagg: registry.add(
                CardDefinition::minion(
                    "Stalagg",
                    5,
                    MinionSpec::new(7, 4).deathrattle(move |game, ctx| {
                        linked_death(game, ctx, "Feugen", thaddius)
                    }),
                )
                .with_rarity(Rarity::Legendary),
            ),
            feugen: registry.add(
                CardDefinition::minion(
                    "Feugen",
                    5,
                    MinionSpec::new(4, 7).deathrattle(move |game, ctx| {
                        linked_death(game, ctx, "Stalagg", thaddius)
                    }),
                )
                .with_rarity(Rarity::Legendary),
            ),
            scavenging_hyena: registry.add(
                CardDefinition::minion(
                    "Scavenging Hyena",
                    2,
                    MinionSpec::new(2, 2).on_if(
                        AuraHost::Owner,
                        EventKind::MinionDied,
                        friendly_beast_died,
                        |game, ctx| game.buff(subject(ctx)?, 2, 1),
                    ),
                )
                .with_tribe(Tribe::Beast),
            ),
            stormwind_champion: registry.add(CardDefinition::minion(
                "Stormwind Champion",
                7,
                MinionSpec::new(6, 6).stat_aura(AuraScope::OtherFriendly, 1, 1),
            )),
            sorcerers_apprentice: registry.add(CardDefinition::minion(
                "Sorcerer's Apprentice",
                2,
                MinionSpec::new(3, 2).mana_filter(ManaFilterSpec {
                    amount: 1,
                    applies_to: CardFilter::Spells,
                    min: 0,
                    target: FilterTarget::Owner,
                }),
            )),
            kobold_geomancer: registry.add(CardDefinition::minion(
                "Kobold Geomancer",
                2,
                MinionSpec::new(2, 2).spell_damage(1),
            )),
            frostbolt: registry.add(CardDefinition::spell(
                "Frostbolt",
                2,
                Targeted::new(TargetRule::AnyCharacter, |game, ctx| {
                    let target = target(ctx)?;
                    game.deal_spell_damage(ctx.controller, target, 3)?;
                    game.freeze(target)
                }),
            )),
            fireball: registry.add(CardDefinition::spell(
                "Fireball",
                4,
                Targeted::new(TargetRule::AnyCharacter, |game, ctx| {
                    game.deal_spell_damage(ctx.controller, target(ctx)?, 6).map(|_| ())
                }),
            )),
            assassinate: registry.add(CardDefinition::spell(
                "Assassinate",
                5,
                Targeted::new(TargetRule::EnemyMinion, |game, ctx| game.destroy(target(ctx)?)),
            )),
            arcane_missiles: registry.add(CardDefinition::spell(
                "Arcane Missiles",
                1,
                Targeted::untargeted(arcane_missiles),
            )),
            silence: registry.add(CardDefinition::spell(
                "Silence",
                0,
                Targeted::new(TargetRule::AnyMinion, |game, ctx| game.silence(target(ctx)?)),
            )),
            flamestrike: registry.add(CardDefinition::spell(
                "Flamestrike",
                7,
                Targeted::untargeted(|game, ctx| {
                    for minion in game.minions(ctx.opponent()).to_vec() {
                        game.deal_spell_damage(ctx.controller, minion, 4)?;
                    }
                    Ok(())
                }),
            )),
            explosive_trap: registry.add(CardDefinition::secret(
                "Explosive Trap",
                2,
                SecretSpec::new(EventKind::Attack, SecretHost::Opponent, |game, ctx| {
                    for enemy in game.characters_of(ctx.opponent()) {
                        game.deal_spell_damage(ctx.controller, enemy, 2)?;
                    }
                    Ok(())
                })
                .when(|game, ctx| {
                    let hero = game.hero_id(ctx.controller);
                    ctx.event.as_ref().and_then(|e| e.target) == Some(hero)
                }),
            )),
            the_coin: registry.add(CardDefinition::spell(
                "The Coin",
                0,
                Targeted::untargeted(|game, ctx| {
                    game.gain_temporary_mana(ctx.controller, 1);
                    Ok(())
                }),
            )),
            fireblast: registry.add(CardDefinition::hero_power(
                "Fireblast",
                2,
                Targeted::new(TargetRule::AnyCharacter, |game, ctx| {
                    game.deal_damage(ctx.source, target(ctx)?, 1).map(|_| ())
                }),
            )),
            life_tap: registry.add(CardDefinition::hero_power(
                "Life Tap",
                2,
                Targeted::untargeted(|game, ctx| {
                    game.draw(ctx.controller)?;
                    hit_own_hero(game, ctx, 2)
                }),
            )),
            armor_up: registry.add(CardDefinition::hero_power(
                "Armor Up!",
                2,
                Targeted::untargeted(|game, ctx| game.gain_armor(ctx.controller, 2)),
            )),
        }
    }
}

fn demon(name: &str, cost: i32, spec: MinionSpec) -> CardDefinition {
    CardDefinition::minion(name, cost, spec).with_tribe(Tribe::Demon)
}

fn subject(ctx: &EffectContext) -> EngineResult<EntityId> {
    ctx.subject
        .ok_or_else(|| GameError::effect(ctx.source, "effect has no subject"))
}

fn target(ctx: &EffectContext) -> EngineResult<EntityId> {
    ctx.target
        .ok_or_else(|| GameError::effect(ctx.source, "effect has no target"))
}

fn hit_own_hero(game: &mut Game, ctx: &EffectContext, amount: i32) -> EngineResult<()> {
    let hero = game.hero_id(ctx.controller);
    game.deal_damage(ctx.source, hero, amount).map(|_| ())
}

/// Slot a dying minion occupied, for deathrattles that summon in place.
fn dying_slot(game: &Game, ctx: &EffectContext) -> ZonePosition {
    ctx.subject
        .and_then(|id| game.character(id))
        .map_or(ZonePosition::Top, |c| ZonePosition::Index(c.index))
}

fn dread_infernal(game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
    let me = subject(ctx)?;
    let everyone: Vec<EntityId> = PlayerId::both()
        .flat_map(|p| game.characters_of(p))
        .filter(|&id| id != me)
        .collect();
    for id in everyone {
        game.deal_damage(Some(me), id, 1)?;
    }
    Ok(())
}

fn blood_imp(game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
    let me = subject(ctx)?;
    let others: Vec<EntityId> = game
        .minions(ctx.controller)
        .iter()
        .copied()
        .filter(|&id| id != me && !game.is_dying(id))
        .collect();
    match game.random_choice(&others) {
        Some(lucky) => game.buff(lucky, 0, 1),
        None => Ok(()),
    }
}

fn void_terror(game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
    let me = subject(ctx)?;
    let neighbours = game.player(ctx.controller).board.adjacent(me);
    let (mut attack, mut health) = (0, 0);
    for &id in &neighbours {
        if let Some(minion) = game.character(id) {
            attack += minion.calculate_attack();
            health += minion.health.max(0);
        }
        game.destroy(id)?;
    }
    game.buff(me, attack, health)
}

fn voidcaller(game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
    let player = ctx.controller;
    let demons: Vec<usize> = game
        .hand(player)
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            game.registry()
                .get(card.card_id)
                .is_some_and(|def| def.is_minion() && def.tribe == Tribe::Demon)
        })
        .map(|(index, _)| index)
        .collect();
    let Some(index) = game.random_choice(&demons) else {
        return Ok(());
    };
    let slot = dying_slot(game, ctx);
    game.put_into_play(player, index, slot).map(|_| ())
}

/// Jaraxxus leaves the battlefield and takes over as the hero.
fn lord_jaraxxus(game: &mut Game, ctx: &EffectContext, power: CardId, weapon: CardId) -> EngineResult<()> {
    let jaraxxus = subject(ctx)?;
    let health = game.character(jaraxxus).map_or(15, |c| c.health);
    game.remove_minion(jaraxxus)?;
    game.replace_hero(ctx.controller, health, power)?;
    game.equip_weapon(ctx.controller, weapon).map(|_| ())
}

/// A swing at a minion does not wear Gorehowl down.
fn gorehowl(game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
    let hit_minion = ctx
        .target
        .and_then(|id| game.character(id))
        .is_some_and(|c| c.is_minion());
    if !hit_minion {
        return Ok(());
    }
    if let Some(weapon) = game.weapon_mut(subject(ctx)?) {
        weapon.durability += 1;
    }
    Ok(())
}

/// Summon `summon` if `partner` already died on this side, silenced or not.
fn linked_death(game: &mut Game, ctx: &EffectContext, partner: &str, summon: CardId) -> EngineResult<()> {
    let partner_died = game
        .registry()
        .by_name(partner)
        .is_some_and(|card| game.player(ctx.controller).graveyard.contains(&card));
    if partner_died {
        let slot = dying_slot(game, ctx);
        game.summon(ctx.controller, summon, slot)?;
    }
    Ok(())
}

fn friendly_beast_died(game: &Game, ctx: &EffectContext) -> bool {
    let Some(event) = &ctx.event else {
        return false;
    };
    event.target != ctx.subject
        && event
            .card
            .and_then(|card| game.registry().get(card))
            .is_some_and(|def| def.tribe == Tribe::Beast)
}

fn arcane_missiles(game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
    let missiles = 3 + game.spell_damage(ctx.controller);
    for _ in 0..missiles {
        let alive: Vec<EntityId> = game
            .characters_of(ctx.opponent())
            .into_iter()
            .filter(|&id| !game.is_dying(id) && game.character(id).is_some_and(|c| c.health > 0))
            .collect();
        let Some(hit) = game.random_choice(&alive) else {
            break;
        };
        game.deal_damage(None, hit, 1)?;
    }
    Ok(())
}
