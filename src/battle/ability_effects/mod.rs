// --- HELPER MODULES ---
mod damage_effects;
mod stat_effects;
mod status_effects;

// --- IMPORTS ---
use crate::ability_data::{AbilityEffect, AbilityTemplate};
use crate::battle::state::{BattleEvent, BattleRng, EventBus};
use crate::combatant::Combatant;
use schema::AbilityId;
use self::{damage_effects::*, stat_effects::*, status_effects::*};

// --- CONTEXT ---

/// What an effect knows about the ability it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub template: &'static AbilityTemplate,
}

impl EffectContext {
    pub fn new(template: &'static AbilityTemplate) -> Self {
        Self { template }
    }

    pub fn ability(&self) -> AbilityId {
        self.template.id
    }

    /// Pure-status abilities announce a failed roll; damaging ones stay quiet.
    pub fn is_pure_status(&self) -> bool {
        self.template.power == 0
    }
}

// --- ENTRY POINT ---

/// Resolve every effect of `template` in order. Touches only the two
/// combatants and the RNG. Stops early once either side has fainted.
pub fn apply_ability(
    template: &'static AbilityTemplate,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    bus.push(BattleEvent::AbilityUsed {
        user: user.name.clone(),
        ability: template.id,
    });

    if template.effects.is_empty() {
        bus.push(BattleEvent::NothingHappened);
        return;
    }

    let context = EffectContext::new(template);
    for effect in template.effects {
        effect.apply(&context, user, target, rng, bus);
        if user.is_fainted() || target.is_fainted() {
            break;
        }
    }
}

// --- DISPATCH ---

impl AbilityEffect {
    pub(crate) fn apply(
        &self,
        context: &EffectContext,
        user: &mut Combatant,
        target: &mut Combatant,
        rng: &mut BattleRng,
        bus: &mut EventBus,
    ) {
        match *self {
            Self::Damage { power, element } => {
                apply_damage_effect(power, element, user, target, rng, bus)
            }
            Self::MultiHit {
                power,
                min_hits,
                max_hits,
            } => apply_multi_hit_effect(power, min_hits, max_hits, user, target, rng, bus),
            Self::Backfire {
                power,
                chance,
                recoil_divisor,
            } => apply_backfire_effect(power, chance, recoil_divisor, user, target, rng, bus),
            Self::DualDamage {
                power,
                recoil_divisor,
            } => apply_dual_damage_effect(power, recoil_divisor, user, target, rng, bus),
            Self::Heal(amount) => apply_heal_effect(amount, user, bus),
            Self::Buff { kind, duration } => apply_buff_effect(kind, duration, user, rng, bus),
            Self::Debuff { kind, duration } => {
                apply_debuff_effect(kind, duration, user, target, rng, bus)
            }
            Self::StatusInflict {
                kind,
                chance,
                duration,
                intensity,
                afflicts,
            } => apply_status_inflict_effect(
                StatusRoll {
                    kind,
                    chance,
                    duration,
                    intensity,
                    afflicts,
                },
                context,
                user,
                target,
                rng,
                bus,
            ),
            Self::Cleanse(scope) => apply_cleanse_effect(scope, user, bus),
        }
    }
}
