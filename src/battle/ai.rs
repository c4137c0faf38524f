//! Ability selection for computer-controlled combatants.

use crate::battle::state::BattleRng;
use crate::combatant::Combatant;

/// A trait for any system that picks which ability a combatant uses.
pub trait Behavior {
    /// Index into `combatant.abilities()`, or `None` when it has nothing to use.
    fn choose_ability(&self, combatant: &Combatant, rng: &mut BattleRng) -> Option<usize>;
}

/// Uniform choice over every bound ability.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBehavior;

impl Behavior for RandomBehavior {
    fn choose_ability(&self, combatant: &Combatant, rng: &mut BattleRng) -> Option<usize> {
        let count = combatant.abilities().len();
        if count == 0 {
            return None;
        }
        Some(rng.next_index(count, "enemy ability choice"))
    }
}
