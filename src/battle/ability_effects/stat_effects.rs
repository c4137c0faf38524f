use crate::ability_data::{CleanseScope, HealAmount, Scaled};
use crate::battle::state::{BattleEvent, BattleRng, EventBus};
use crate::combatant::Combatant;
use schema::StatusKind;

pub(super) fn resolve_turns(duration: Scaled, level: u16, rng: &mut BattleRng, reason: &str) -> u8 {
    u8::try_from(duration.resolve(level, rng, reason)).unwrap_or(u8::MAX)
}

pub(super) fn apply_heal_effect(amount: HealAmount, user: &mut Combatant, bus: &mut EventBus) {
    let requested = match amount {
        HealAmount::Scaled { base, per_level } => {
            base.saturating_add(user.level().saturating_mul(per_level))
        }
        HealAmount::Full => user.max_hp(),
    };
    let restored = user.heal(requested);
    bus.push(BattleEvent::Healed {
        target: user.name.clone(),
        amount: restored,
        new_hp: user.current_hp(),
    });
}

pub(super) fn apply_buff_effect(
    kind: StatusKind,
    duration: Scaled,
    user: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    let turns = resolve_turns(duration, user.level(), rng, "buff duration");
    user.add_status_effect(kind, turns, 0);
    user.recalculate_stats();
    bus.push(BattleEvent::StatusApplied {
        target: user.name.clone(),
        status: kind,
    });
}

/// Debuff duration scales with the user's level, not the target's.
pub(super) fn apply_debuff_effect(
    kind: StatusKind,
    duration: Scaled,
    user: &Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    let turns = resolve_turns(duration, user.level(), rng, "debuff duration");
    target.add_status_effect(kind, turns, 0);
    target.recalculate_stats();
    bus.push(BattleEvent::StatusApplied {
        target: target.name.clone(),
        status: kind,
    });
}

pub(super) fn apply_cleanse_effect(scope: CleanseScope, user: &mut Combatant, bus: &mut EventBus) {
    match scope {
        CleanseScope::KeepBoosts => user
            .status_effects
            .retain(|effect| effect.kind.is_stat_boost()),
        CleanseScope::All => user.status_effects.clear(),
    }
    user.recalculate_stats();
    bus.push(BattleEvent::StatusesCleansed {
        target: user.name.clone(),
    });
}
