//! Action legality.
//!
//! Every check here takes `&Game` and either describes how to carry the
//! action out or says why it is illegal.

use crate::cards::{CardId, CardType};
use crate::core::{Action, AttackBlock, EntityId, PlayerId, RejectReason};
use crate::effects::{Delivery, TargetRule, Targets};
use crate::game::Game;

use super::Phase;

/// A validated card play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayPlan {
    pub hand_index: usize,
    pub card: CardId,
    pub card_type: CardType,
    pub cost: i32,
    pub target: Option<EntityId>,
}

pub(crate) fn check_turn(game: &Game, player: PlayerId) -> Result<(), RejectReason> {
    if game.is_over() {
        return Err(RejectReason::GameOver);
    }
    if game.phase() != Phase::Action {
        return Err(RejectReason::WrongPhase);
    }
    if game.current_player() != player {
        return Err(RejectReason::NotYourTurn);
    }
    Ok(())
}

/// Resolve a requested target against a rule.
///
/// `must_target` cards (spells, hero powers) cannot be played without a
/// legal target; battlecries simply do nothing when none exists.
fn resolve_target(
    legal: &Targets,
    requested: Option<EntityId>,
    rule: TargetRule,
    must_target: bool,
) -> Result<Option<EntityId>, RejectReason> {
    if !rule.wants_target() {
        return Ok(None);
    }
    match requested {
        Some(target) if legal.contains(&target) => Ok(Some(target)),
        Some(_) => Err(RejectReason::InvalidTarget),
        None if legal.is_empty() && must_target => Err(RejectReason::NoLegalTarget),
        None if legal.is_empty() => Ok(None),
        None => Err(RejectReason::TargetRequired),
    }
}

/// Validate playing the card at `hand_index`.
pub fn check_play(
    game: &Game,
    player: PlayerId,
    hand_index: usize,
    target: Option<EntityId>,
) -> Result<PlayPlan, RejectReason> {
    check_turn(game, player)?;
    let state = game.player(player);
    let instance = state
        .hand
        .get(hand_index)
        .ok_or(RejectReason::NoSuchCard(hand_index))?;
    let card = game
        .registry()
        .get(instance.card_id)
        .ok_or(RejectReason::NotPlayable)?;

    let cost = state.mana_cost(card);
    if cost > state.mana.current {
        return Err(RejectReason::NotEnoughMana {
            cost,
            available: state.mana.current,
        });
    }

    let card_type = card.card_type();
    match card_type {
        CardType::HeroPower => return Err(RejectReason::NotPlayable),
        CardType::Minion if state.board.is_full() => return Err(RejectReason::BoardFull),
        CardType::Secret => {
            if state.secrets.len() >= game.config().max_secrets {
                return Err(RejectReason::TooManySecrets);
            }
            let duplicate = state
                .secrets
                .iter()
                .filter_map(|&id| game.secret(id))
                .any(|s| s.card == card.id);
            if duplicate {
                return Err(RejectReason::DuplicateSecret);
            }
        }
        _ => {}
    }

    let rule = card.target_rule();
    let delivery = if card.is_spell() {
        Delivery::Spell
    } else {
        Delivery::Minion
    };
    let legal = rule.legal_targets(game, player, None, delivery);
    let target = resolve_target(&legal, target, rule, card_type == CardType::Spell)?;

    Ok(PlayPlan {
        hand_index,
        card: card.id,
        card_type,
        cost,
        target,
    })
}

/// Validate using the hero power. Returns the resolved target.
pub fn check_hero_power(
    game: &Game,
    player: PlayerId,
    target: Option<EntityId>,
) -> Result<Option<EntityId>, RejectReason> {
    check_turn(game, player)?;
    let state = game.player(player);
    let power = state
        .hero_power
        .and_then(|id| game.registry().get(id))
        .ok_or(RejectReason::NoHeroPower)?;
    if state.hero_power_used {
        return Err(RejectReason::HeroPowerUsed);
    }
    if power.cost > state.mana.current {
        return Err(RejectReason::NotEnoughMana {
            cost: power.cost,
            available: state.mana.current,
        });
    }
    let rule = power.target_rule();
    let legal = rule.legal_targets(game, player, None, Delivery::Spell);
    resolve_target(&legal, target, rule, true)
}

/// Why a character cannot attack, or `None` if it can.
#[must_use]
pub fn attack_block(game: &Game, id: EntityId) -> Option<AttackBlock> {
    let Some(character) = game.character(id) else {
        return Some(AttackBlock::Removed);
    };
    if character.removed || game.is_dying(id) {
        return Some(AttackBlock::Removed);
    }
    if game.attack_of(id) <= 0 {
        return Some(AttackBlock::NoAttack);
    }
    if character.status.frozen {
        return Some(AttackBlock::Frozen);
    }
    if character.attacks_this_turn >= character.max_attacks(game.config()) {
        return Some(AttackBlock::AlreadyAttacked);
    }
    if character.is_minion() && character.exhausted && !character.status.charge {
        return Some(AttackBlock::Exhausted);
    }
    None
}

/// Characters `player` may attack.
///
/// Stealthed and dying characters are excluded; if any remaining enemy
/// minion has taunt, only taunt minions are legal.
#[must_use]
pub fn legal_attack_targets(game: &Game, player: PlayerId) -> Targets {
    let enemy = game.player(player.other());
    let candidates: Targets = std::iter::once(enemy.hero)
        .chain(enemy.board.ids().iter().copied())
        .filter(|&id| {
            game.character(id).is_some_and(|c| {
                !c.removed && !c.status.stealth && !game.is_dying(id)
            })
        })
        .collect();

    let taunts: Targets = candidates
        .iter()
        .copied()
        .filter(|&id| game.character(id).is_some_and(|c| c.is_minion() && c.status.taunt))
        .collect();

    if taunts.is_empty() {
        candidates
    } else {
        taunts
    }
}

/// Validate an attack.
pub fn check_attack(
    game: &Game,
    player: PlayerId,
    attacker: EntityId,
    target: EntityId,
) -> Result<(), RejectReason> {
    check_turn(game, player)?;
    let owned = game
        .character(attacker)
        .is_some_and(|c| c.owner == player);
    if !owned {
        return Err(RejectReason::NotAnAttacker);
    }
    if let Some(block) = attack_block(game, attacker) {
        return Err(RejectReason::CannotAttack(block));
    }
    if !legal_attack_targets(game, player).contains(&target) {
        return Err(RejectReason::InvalidTarget);
    }
    Ok(())
}

/// Every legal action for `player`, ending with `EndTurn`.
///
/// Targeted cards appear once per legal target. Empty when the player
/// cannot act.
#[must_use]
pub fn legal_actions(game: &Game, player: PlayerId) -> Vec<Action> {
    if check_turn(game, player).is_err() {
        return Vec::new();
    }
    let mut actions = Vec::new();
    let state = game.player(player);

    for (hand_index, instance) in state.hand.iter().enumerate() {
        match check_play(game, player, hand_index, None) {
            Ok(_) | Err(RejectReason::TargetRequired) => {}
            Err(_) => continue,
        }
        let Some(card) = game.registry().get(instance.card_id) else {
            continue;
        };
        let rule = card.target_rule();
        let delivery = if card.is_spell() {
            Delivery::Spell
        } else {
            Delivery::Minion
        };
        let targets = rule.legal_targets(game, player, None, delivery);
        if rule.wants_target() && !targets.is_empty() {
            for target in targets {
                actions.push(Action::play(hand_index).with_target(target));
            }
        } else {
            actions.push(Action::play(hand_index));
        }
    }

    match check_hero_power(game, player, None) {
        Ok(_) => actions.push(Action::hero_power()),
        Err(RejectReason::TargetRequired) => {
            if let Some(power) = state.hero_power.and_then(|id| game.registry().get(id)) {
                for target in power.target_rule().legal_targets(game, player, None, Delivery::Spell) {
                    actions.push(Action::hero_power().with_target(target));
                }
            }
        }
        Err(_) => {}
    }

    let targets = legal_attack_targets(game, player);
    let attackers = std::iter::once(state.hero).chain(state.board.ids().iter().copied());
    for attacker in attackers {
        if attack_block(game, attacker).is_none() {
            for &target in &targets {
                actions.push(Action::attack(attacker, target));
            }
        }
    }

    actions.push(Action::EndTurn);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target_untargeted_ignores_request() {
        let legal = Targets::new();
        assert_eq!(
            resolve_target(&legal, Some(EntityId(3)), TargetRule::None, true),
            Ok(None)
        );
    }

    #[test]
    fn test_resolve_target_requires_legal_choice() {
        let legal: Targets = [EntityId(1), EntityId(2)].into_iter().collect();

        assert_eq!(
            resolve_target(&legal, Some(EntityId(2)), TargetRule::AnyCharacter, true),
            Ok(Some(EntityId(2)))
        );
        assert_eq!(
            resolve_target(&legal, Some(EntityId(9)), TargetRule::AnyCharacter, true),
            Err(RejectReason::InvalidTarget)
        );
        assert_eq!(
            resolve_target(&legal, None, TargetRule::AnyCharacter, false),
            Err(RejectReason::TargetRequired)
        );
    }

    #[test]
    fn test_resolve_target_without_candidates() {
        let legal = Targets::new();

        // Spells need something to hit
        assert_eq!(
            resolve_target(&legal, None, TargetRule::EnemyMinion, true),
            Err(RejectReason::NoLegalTarget)
        );
        // Battlecries fizzle
        assert_eq!(
            resolve_target(&legal, None, TargetRule::EnemyMinion, false),
            Ok(None)
        );
    }
}
