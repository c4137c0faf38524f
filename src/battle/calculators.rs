use crate::battle::state::BattleRng;
use crate::combatant::Combatant;
use crate::config::BattleConfig;
use schema::ElementType;

/// Result of one damage computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub damage: u16,
    pub effectiveness: f64,
}

/// Type multiplier for an attack from `attacker` on `defender`.
///
/// `element` overrides the attacker's own types for typed signature abilities.
pub fn type_effectiveness(
    attacker: &Combatant,
    defender: &Combatant,
    element: Option<ElementType>,
) -> f64 {
    let (attack_primary, attack_secondary) = match element {
        Some(element) => (element, None),
        None => attacker.types(),
    };
    let (defend_primary, defend_secondary) = defender.types();
    ElementType::dual_effectiveness(
        attack_primary,
        attack_secondary,
        defend_primary,
        defend_secondary,
    )
}

/// `round((attack * power / 100 - defense / 2) * effectiveness * jitter)`,
/// never less than 1.
pub fn damage_formula(attack: u16, defense: u16, power: u16, effectiveness: f64, jitter: f64) -> u16 {
    let raw = f64::from(attack) * f64::from(power) / 100.0 - f64::from(defense) * 0.5;
    let scaled = (raw * effectiveness * jitter).round();
    if scaled.is_nan() {
        return 1;
    }
    scaled.clamp(1.0, f64::from(u16::MAX)) as u16
}

/// Full damage computation with one jitter draw.
pub fn calculate_damage(
    user: &Combatant,
    target: &Combatant,
    power: u16,
    element: Option<ElementType>,
    rng: &mut BattleRng,
) -> DamageRoll {
    let effectiveness = type_effectiveness(user, target, element);
    let jitter = rng.jitter("damage variance");
    DamageRoll {
        damage: damage_formula(user.attack(), target.defense(), power, effectiveness, jitter),
        effectiveness,
    }
}

/// XP for beating `enemy`: level times the per-level base, scaled by rarity
/// and the event multiplier.
pub fn calculate_xp_reward(enemy: &Combatant, config: &BattleConfig, xp_multiplier: f64) -> u32 {
    let base = f64::from(enemy.level()) * f64::from(config.xp_per_enemy_level);
    let total = base * enemy.rarity.xp_multiplier() * xp_multiplier;
    total.max(0.0) as u32
}
