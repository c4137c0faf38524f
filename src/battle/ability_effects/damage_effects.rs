use crate::battle::calculators::{calculate_damage, type_effectiveness};
use crate::battle::state::{BattleEvent, BattleRng, EventBus};
use crate::combatant::Combatant;
use schema::ElementType;

// --- STANDALONE HELPER FUNCTIONS ---
// Visible only to the parent dispatcher.

fn deal_damage(target: &mut Combatant, damage: u16, bus: &mut EventBus) {
    let dealt = target.take_damage(damage);
    bus.push(BattleEvent::DamageDealt {
        target: target.name.clone(),
        damage: dealt,
        remaining_hp: target.current_hp(),
    });
}

fn recoil_share(damage: u16, divisor: u16) -> u16 {
    damage / divisor.max(1)
}

pub(super) fn apply_damage_effect(
    power: u16,
    element: Option<ElementType>,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    let roll = calculate_damage(user, target, power, element, rng);
    deal_damage(target, roll.damage, bus);
    bus.push(BattleEvent::AttackTypeEffectiveness {
        multiplier: roll.effectiveness,
    });
}

/// Every hit rolls its own jitter. Hits stop landing once the target faints.
pub(super) fn apply_multi_hit_effect(
    power: u16,
    min_hits: u8,
    max_hits: u8,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    let planned = rng.next_in_range(u32::from(min_hits), u32::from(max_hits), "multi-hit count");

    let mut hits = 0u8;
    let mut total_damage = 0u16;
    for _ in 0..planned {
        if target.is_fainted() {
            break;
        }
        let roll = calculate_damage(user, target, power, None, rng);
        total_damage = total_damage.saturating_add(target.take_damage(roll.damage));
        hits += 1;
    }

    bus.push(BattleEvent::MultiHit {
        target: target.name.clone(),
        hits,
        total_damage,
    });
    bus.push(BattleEvent::AttackTypeEffectiveness {
        multiplier: type_effectiveness(user, target, None),
    });
}

/// With `chance` percent the attack turns on the user for a share of the damage.
pub(super) fn apply_backfire_effect(
    power: u16,
    chance: u8,
    recoil_divisor: u16,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    let roll = calculate_damage(user, target, power, None, rng);

    if rng.chance(chance, "backfire") {
        let damage = user.take_damage(recoil_share(roll.damage, recoil_divisor));
        bus.push(BattleEvent::Backfired {
            user: user.name.clone(),
            damage,
        });
        return;
    }

    deal_damage(target, roll.damage, bus);
    bus.push(BattleEvent::AttackTypeEffectiveness {
        multiplier: roll.effectiveness,
    });
}

pub(super) fn apply_dual_damage_effect(
    power: u16,
    recoil_divisor: u16,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    let roll = calculate_damage(user, target, power, None, rng);
    deal_damage(target, roll.damage, bus);
    bus.push(BattleEvent::AttackTypeEffectiveness {
        multiplier: roll.effectiveness,
    });

    let recoil = user.take_damage(recoil_share(roll.damage, recoil_divisor));
    bus.push(BattleEvent::RecoilDamage {
        user: user.name.clone(),
        damage: recoil,
    });
}
