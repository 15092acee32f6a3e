//! Integration tests for the basic card set.

mod common;

use common::*;
use rust_duel::core::Action;

// =============================================================================
// Spell Tests
// =============================================================================

/// Test that spell damage minions boost spells.
#[test]
fn test_fireball_with_spell_damage() {
    let (mut game, cards) = table();
    let enemy = game.hero_id(SECOND);
    flood_mana(&mut game, FIRST);
    ready_minion(&mut game, FIRST, cards.kobold_geomancer);
    let fireball = in_hand(&mut game, FIRST, cards.fireball);

    game.perform(FIRST, Action::play(fireball).with_target(enemy)).unwrap();

    assert_eq!(health(&game, enemy), 23);
    assert_eq!(game.player(FIRST).mana.current, 6);
}

/// Test that Frostbolt damages and freezes.
#[test]
fn test_frostbolt() {
    let (mut game, cards) = table();
    let yeti = ready_minion(&mut game, SECOND, cards.chillwind_yeti);
    flood_mana(&mut game, FIRST);
    let frostbolt = in_hand(&mut game, FIRST, cards.frostbolt);

    game.perform(FIRST, Action::play(frostbolt).with_target(yeti)).unwrap();

    let yeti = game.character(yeti).unwrap();
    assert_eq!(yeti.health, 2);
    assert!(yeti.status.frozen);
}

/// Test that Assassinate only accepts enemy minions and destroys them.
#[test]
fn test_assassinate() {
    let (mut game, cards) = table();
    let mine = ready_minion(&mut game, FIRST, cards.chillwind_yeti);
    let ogre = ready_minion(&mut game, SECOND, cards.boulderfist_ogre);
    flood_mana(&mut game, FIRST);
    let assassinate = in_hand(&mut game, FIRST, cards.assassinate);

    assert!(game
        .perform(FIRST, Action::play(assassinate).with_target(mine))
        .is_err());
    game.perform(FIRST, Action::play(assassinate).with_target(ogre)).unwrap();

    assert!(game.minions(SECOND).is_empty());
    assert_eq!(game.player(SECOND).graveyard, vec![cards.boulderfist_ogre]);
}

/// Test that every Arcane Missile finds the enemy hero when it stands
/// alone.
#[test]
fn test_arcane_missiles() {
    let (mut game, cards) = table();
    let enemy = game.hero_id(SECOND);
    let missiles = in_hand(&mut game, FIRST, cards.arcane_missiles);

    game.perform(FIRST, Action::play(missiles)).unwrap();

    assert_eq!(health(&game, enemy), 27);
}

/// Test that The Coin gives a mana for this turn only.
#[test]
fn test_the_coin() {
    let (mut game, cards) = table();
    let coin = in_hand(&mut game, FIRST, cards.the_coin);

    game.perform(FIRST, Action::play(coin)).unwrap();

    let mana = game.player(FIRST).mana;
    assert_eq!(mana.current, 2);
    assert_eq!(mana.max, 1);
}

/// Test that the Silence spell removes an aura.
#[test]
fn test_silence_removes_aura() {
    let (mut game, cards) = table();
    let champion = ready_minion(&mut game, SECOND, cards.stormwind_champion);
    let yeti = ready_minion(&mut game, SECOND, cards.chillwind_yeti);
    assert_eq!(game.attack_of(yeti), 5);
    let silence = in_hand(&mut game, FIRST, cards.silence);

    game.perform(FIRST, Action::play(silence).with_target(champion)).unwrap();

    assert_eq!(game.attack_of(yeti), 4);
    assert_eq!(health(&game, yeti), 5);
}

// =============================================================================
// Aura and Cost Tests
// =============================================================================

/// Test that Stormwind Champion buffs the others and the buff leaves
/// with it.
#[test]
fn test_stormwind_champion() {
    let (mut game, cards) = table();
    let before = ready_minion(&mut game, FIRST, cards.chillwind_yeti);
    let champion = ready_minion(&mut game, FIRST, cards.stormwind_champion);
    let after = ready_minion(&mut game, FIRST, cards.stonetusk_boar);

    assert_eq!(game.attack_of(before), 5);
    assert_eq!(health(&game, before), 6);
    assert_eq!(game.attack_of(after), 2);
    assert_eq!(health(&game, after), 2);
    assert_eq!(game.attack_of(champion), 6);

    game.destroy(champion).unwrap();
    game.settle().unwrap();

    assert_eq!(game.attack_of(before), 4);
    assert_eq!(health(&game, before), 5);
    assert_eq!(health(&game, after), 1);
}

/// Test that losing an aura caps health without dealing damage.
#[test]
fn test_aura_loss_caps_health() {
    let (mut game, cards) = table();
    let champion = ready_minion(&mut game, FIRST, cards.stormwind_champion);
    let boar = ready_minion(&mut game, FIRST, cards.stonetusk_boar);
    game.deal_damage(None, boar, 1).unwrap();

    game.destroy(champion).unwrap();
    game.settle().unwrap();

    assert_eq!(game.minions(FIRST), &[boar]);
    assert_eq!(health(&game, boar), 1);
    assert_eq!(game.character(boar).unwrap().max_health(), 1);
}

/// Test Sorcerer's Apprentice discounting spells only.
#[test]
fn test_sorcerers_apprentice() {
    let (mut game, cards) = table();
    let fireball = in_hand(&mut game, FIRST, cards.fireball);
    let apprentice = ready_minion(&mut game, FIRST, cards.sorcerers_apprentice);

    assert_eq!(game.mana_cost(FIRST, 0), Some(4));
    assert_eq!(game.mana_cost(FIRST, fireball), Some(3));

    game.destroy(apprentice).unwrap();
    game.settle().unwrap();
    assert_eq!(game.mana_cost(FIRST, fireball), Some(4));
}

/// Test Summoning Portal's discount and its floor of one.
#[test]
fn test_summoning_portal() {
    let (mut game, cards) = table();
    let boar = in_hand(&mut game, FIRST, cards.stonetusk_boar);
    let fireball = in_hand(&mut game, FIRST, cards.fireball);
    ready_minion(&mut game, FIRST, cards.summoning_portal);

    assert_eq!(game.mana_cost(FIRST, 0), Some(2));
    assert_eq!(game.mana_cost(FIRST, boar), Some(1));
    assert_eq!(game.mana_cost(FIRST, fireball), Some(4));
}

// =============================================================================
// Battlecry Tests
// =============================================================================

/// Test battlecries that hurt their owner.
#[test]
fn test_pit_lord() {
    let (mut game, cards) = table();
    flood_mana(&mut game, FIRST);
    let pit_lord = in_hand(&mut game, FIRST, cards.pit_lord);

    game.perform(FIRST, Action::play(pit_lord)).unwrap();

    assert_eq!(health(&game, game.hero_id(FIRST)), 25);
    assert_eq!(game.minions(FIRST).len(), 1);
}

/// Test that Dread Infernal hits every other character.
#[test]
fn test_dread_infernal() {
    let (mut game, cards) = table();
    ready_minion(&mut game, FIRST, cards.stonetusk_boar);
    ready_minion(&mut game, SECOND, cards.stonetusk_boar);
    let yeti = ready_minion(&mut game, SECOND, cards.chillwind_yeti);
    flood_mana(&mut game, FIRST);
    let infernal = in_hand(&mut game, FIRST, cards.dread_infernal);

    game.perform(FIRST, Action::play(infernal)).unwrap();

    assert_eq!(game.minions(FIRST).len(), 1);
    assert_eq!(game.minions(SECOND), &[yeti]);
    assert_eq!(health(&game, yeti), 4);
    assert_eq!(health(&game, game.hero_id(FIRST)), 29);
    assert_eq!(health(&game, game.hero_id(SECOND)), 29);
    assert_eq!(game.deaths_this_action(), 2);
}

/// Test that Felguard costs a mana crystal.
#[test]
fn test_felguard() {
    let (mut game, cards) = table();
    flood_mana(&mut game, FIRST);
    let felguard = in_hand(&mut game, FIRST, cards.felguard);

    game.perform(FIRST, Action::play(felguard)).unwrap();

    let mana = game.player(FIRST).mana;
    assert_eq!(mana.max, 9);
    assert_eq!(mana.current, 7);
}

/// Test that Doomguard discards two cards and can attack at once.
#[test]
fn test_doomguard() {
    let (mut game, cards) = table();
    flood_mana(&mut game, FIRST);
    let doomguard = in_hand(&mut game, FIRST, cards.doomguard);
    in_hand(&mut game, FIRST, cards.the_coin);
    in_hand(&mut game, FIRST, cards.the_coin);

    game.perform(FIRST, Action::play(doomguard)).unwrap();

    assert_eq!(game.hand(FIRST).len(), 1);
    let id = game.minions(FIRST)[0];
    game.perform(FIRST, Action::attack(id, game.hero_id(SECOND))).unwrap();
    assert_eq!(health(&game, game.hero_id(SECOND)), 25);
}

/// Test that Void Terror eats its neighbours.
#[test]
fn test_void_terror() {
    let (mut game, cards) = table();
    ready_minion(&mut game, FIRST, cards.chillwind_yeti);
    ready_minion(&mut game, FIRST, cards.stonetusk_boar);
    flood_mana(&mut game, FIRST);
    let terror = in_hand(&mut game, FIRST, cards.void_terror);

    game.perform(FIRST, Action::play(terror).at_position(1)).unwrap();

    let board = game.minions(FIRST);
    assert_eq!(board.len(), 1);
    let id = board[0];
    assert_eq!(game.attack_of(id), 8);
    assert_eq!(health(&game, id), 9);
}

/// Test that Lord Jaraxxus replaces the hero, with a new hero power and
/// Blood Fury.
#[test]
fn test_lord_jaraxxus() {
    let (mut game, cards) = table();
    let hero = game.hero_id(FIRST);
    game.deal_damage(None, hero, 20).unwrap();
    flood_mana(&mut game, FIRST);
    let jaraxxus = in_hand(&mut game, FIRST, cards.lord_jaraxxus);

    game.perform(FIRST, Action::play(jaraxxus)).unwrap();

    assert!(game.minions(FIRST).is_empty());
    assert!(game.player(FIRST).graveyard.is_empty());
    assert_eq!(game.hero_id(FIRST), hero);
    let character = game.character(hero).unwrap();
    assert_eq!(character.health, 15);
    assert_eq!(character.max_health(), 15);
    assert_eq!(game.player(FIRST).hero_power, Some(cards.inferno));
    let weapon = game.equipped_weapon(FIRST).unwrap();
    assert_eq!(weapon.card, cards.blood_fury);
    assert_eq!((weapon.attack(), weapon.durability), (3, 8));
    assert_eq!(game.deaths_this_turn(), 0);

    flood_mana(&mut game, FIRST);
    game.perform(FIRST, Action::hero_power()).unwrap();

    let board = game.minions(FIRST);
    assert_eq!(board.len(), 1);
    assert_eq!(game.character(board[0]).unwrap().card, Some(cards.infernal));
}

/// Test that playing a weapon card equips it.
#[test]
fn test_play_weapon() {
    let (mut game, cards) = table();
    flood_mana(&mut game, FIRST);
    let axe = in_hand(&mut game, FIRST, cards.fiery_war_axe);

    game.perform(FIRST, Action::play(axe)).unwrap();

    let weapon = game.equipped_weapon(FIRST).unwrap();
    assert_eq!(weapon.card, cards.fiery_war_axe);
    assert_eq!(weapon.durability, 2);
    assert_eq!(game.attack_of(game.hero_id(FIRST)), 3);
}

// =============================================================================
// Triggered Ability Tests
// =============================================================================

/// Test that Blood Imp feeds another friendly minion at turn end.
#[test]
fn test_blood_imp() {
    let (mut game, cards) = table();
    let imp = ready_minion(&mut game, FIRST, cards.blood_imp);
    let yeti = ready_minion(&mut game, FIRST, cards.chillwind_yeti);

    game.perform(FIRST, Action::EndTurn).unwrap();

    assert_eq!(health(&game, yeti), 6);
    assert_eq!(health(&game, imp), 1);
}

/// Test that Water Elemental freezes attackers it strikes back at.
#[test]
fn test_water_elemental_defending() {
    let (mut game, cards) = table();
    let yeti = ready_minion(&mut game, FIRST, cards.chillwind_yeti);
    let elemental = ready_minion(&mut game, SECOND, cards.water_elemental);

    game.perform(FIRST, Action::attack(yeti, elemental)).unwrap();

    assert!(game.character(yeti).unwrap().status.frozen);
    assert_eq!(health(&game, yeti), 2);
}
