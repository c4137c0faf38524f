use crate::battle::state::BattleRng;
use crate::combatant::Combatant;
use crate::config::BattleConfig;

/// Chance that a net holds `target`.
///
/// Missing HP is the base chance. The rarity penalty removes its share, the
/// event multiplier scales the rest, and the result is clamped to the
/// configured floor and ceiling.
pub fn calculate_capture_chance(
    target: &Combatant,
    config: &BattleConfig,
    capture_rate_multiplier: f64,
) -> f64 {
    let base = 1.0 - target.hp_fraction();
    let chance = base * (1.0 - target.rarity.capture_penalty()) * capture_rate_multiplier;
    if !chance.is_finite() {
        return config.capture_floor;
    }
    chance.max(config.capture_floor).min(config.capture_ceiling)
}

/// Returns true if the capture succeeds.
pub fn roll_capture_success(chance: f64, rng: &mut BattleRng) -> bool {
    rng.roll_probability(chance, "capture roll")
}

/// Get a descriptive capture chance category for display purposes
pub fn capture_chance_description(chance: f64) -> &'static str {
    match chance {
        c if c >= 0.75 => "Excellent",
        c if c >= 0.5 => "Good",
        c if c >= 0.25 => "Fair",
        c if c >= 0.1 => "Poor",
        _ => "Very Poor",
    }
}
