use super::stat_effects::resolve_turns;
use super::EffectContext;
use crate::ability_data::Scaled;
use crate::battle::state::{BattleEvent, BattleRng, EventBus};
use crate::combatant::Combatant;
use schema::{StatusKind, Target};

/// Parameters of one status infliction attempt.
#[derive(Debug, Clone, Copy)]
pub(super) struct StatusRoll {
    pub kind: StatusKind,
    pub chance: u8,
    pub duration: Scaled,
    pub intensity: Scaled,
    pub afflicts: Target,
}

fn afflict(combatant: &mut Combatant, kind: StatusKind, turns: u8, intensity: u16, bus: &mut EventBus) {
    combatant.add_status_effect(kind, turns, intensity);
    bus.push(BattleEvent::StatusApplied {
        target: combatant.name.clone(),
        status: kind,
    });
}

/// Rolls the chance first, then duration and intensity from the user's level.
pub(super) fn apply_status_inflict_effect(
    roll: StatusRoll,
    context: &EffectContext,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    if !rng.chance(roll.chance, "status infliction") {
        if context.is_pure_status() {
            bus.push(BattleEvent::AbilityFailed);
        }
        return;
    }

    let level = user.level();
    let turns = resolve_turns(roll.duration, level, rng, "status duration");
    let intensity = roll.intensity.resolve(level, rng, "status intensity");

    match roll.afflicts {
        Target::Enemy => afflict(target, roll.kind, turns, intensity, bus),
        Target::User => afflict(user, roll.kind, turns, intensity, bus),
        Target::Both => {
            afflict(target, roll.kind, turns, intensity, bus);
            afflict(user, roll.kind, turns, intensity, bus);
        }
    }
}
