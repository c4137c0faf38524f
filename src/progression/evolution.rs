use crate::battle::state::BattleRng;
use crate::combatant::{CombatStats, Combatant};
use crate::event_modifiers::EventModifiers;
use schema::Rarity;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_EVOLUTION_STAGE: u8 = 2;
const STAGE_ONE_LEVEL: u16 = 16;
const STAGE_TWO_LEVEL: u16 = 32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evolution {
    pub from_stage: u8,
    pub to_stage: u8,
    pub from_rarity: Rarity,
    pub to_rarity: Rarity,
}

/// Level at which a combatant at `stage` evolves, after any event reduction.
/// `None` once the final stage is reached.
pub fn evolution_level(stage: u8, level_reduction: u16) -> Option<u16> {
    let threshold = match stage {
        0 => STAGE_ONE_LEVEL,
        1 => STAGE_TWO_LEVEL,
        _ => return None,
    };
    Some(threshold.saturating_sub(level_reduction).max(1))
}

pub fn can_evolve(combatant: &Combatant, modifiers: &dyn EventModifiers) -> bool {
    evolution_level(combatant.evolution_stage(), modifiers.evolution_level_reduction())
        .is_some_and(|level| combatant.level() >= level)
}

/// Evolve one stage if the combatant has reached its threshold.
///
/// Evolution raises complexity by two to four points and lifts the rarity
/// one tier. HP (current too), attack, defense and speed grow
/// with the new stage, and abilities are rebound for the new tier.
pub fn check_and_evolve(
    combatant: &mut Combatant,
    modifiers: &dyn EventModifiers,
    rng: &mut BattleRng,
) -> Option<Evolution> {
    if !can_evolve(combatant, modifiers) {
        return None;
    }

    let from_stage = combatant.evolution_stage;
    let from_rarity = combatant.rarity;
    let to_stage = from_stage + 1;

    let bump = 2 + rng.next_in_range(0, 2, "evolution complexity") as u8;
    let to_rarity = from_rarity.next_tier();
    combatant.complexity = combatant
        .complexity
        .saturating_add(bump)
        .max(to_rarity.complexity_range().0);
    combatant.rarity = to_rarity;
    combatant.evolution_stage = to_stage;

    let stage = u16::from(to_stage);
    combatant.grow_max_hp(20 + stage * 10);
    combatant.grow_stats(CombatStats {
        attack: 5 + stage * 3,
        defense: 5 + stage * 3,
        speed: 3 + stage * 2,
    });
    combatant.rebind_abilities();

    debug!(
        combatant = %combatant.name,
        from_stage,
        to_stage,
        rarity = %to_rarity,
        "combatant evolved"
    );
    Some(Evolution {
        from_stage,
        to_stage,
        from_rarity,
        to_rarity,
    })
}
