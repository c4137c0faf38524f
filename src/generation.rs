//! Wild encounter creation: base stats, rarity rolls, names and types.

use crate::battle::state::BattleRng;
use crate::combatant::{CombatStats, Combatant};
use crate::event_modifiers::EventModifiers;
use schema::{Archetype, ElementType, Rarity};
use strum::IntoEnumIterator;
use tracing::debug;
use uuid::Uuid;

const NAME_PREFIXES: [&str; 7] = ["Go", "Gopher", "Code", "Byte", "Bit", "Dev", "Hack"];
const NAME_SUFFIXES: [&str; 7] = ["mon", "gopher", "coder", "dev", "hack", "byte", "bit"];

/// Percent chance a generated name is built on the archetype.
const ARCHETYPE_NAME_CHANCE: u8 = 30;
/// Percent chance a Rare or better wild creature carries a second element.
const SECONDARY_TYPE_CHANCE: u8 = 50;

/// HP, attack, defense, speed at level 1 and Common rarity.
fn archetype_base(archetype: Archetype) -> (u16, CombatStats) {
    match archetype {
        Archetype::Hacker => (60, CombatStats::new(45, 30, 55)),
        Archetype::Tank => (90, CombatStats::new(35, 50, 25)),
        Archetype::Speedy => (50, CombatStats::new(40, 25, 65)),
        Archetype::Support => (70, CombatStats::new(35, 40, 40)),
        Archetype::Mage => (55, CombatStats::new(50, 30, 45)),
    }
}

/// Scale the archetype profile by rarity and level, then vary each value by
/// up to five percent either way. Returns `(max_hp, stats)`.
pub fn generate_base_stats(
    archetype: Archetype,
    rarity: Rarity,
    level: u16,
    rng: &mut BattleRng,
) -> (u16, CombatStats) {
    let (hp, stats) = archetype_base(archetype);
    let level_multiplier = 1.0 + f64::from(level.max(1) - 1) * 0.1;
    let multiplier = rarity.stat_multiplier() * level_multiplier;

    let mut scale = |base: u16, reason: &str| -> u16 {
        let scaled = (f64::from(base) * multiplier).min(f64::from(u16::MAX)) as u32;
        let percent = 95 + rng.next_in_range(0, 10, reason);
        (scaled * percent / 100).clamp(1, u32::from(u16::MAX)) as u16
    };

    let max_hp = scale(hp, "hp variance");
    let stats = CombatStats {
        attack: scale(stats.attack, "attack variance"),
        defense: scale(stats.defense, "defense variance"),
        speed: scale(stats.speed, "speed variance"),
    };
    (max_hp, stats)
}

/// Roll a wild rarity. A boost above 1.0 pulls the roll toward the rare end
/// by shrinking its distance from 100.
pub fn roll_wild_rarity(rng: &mut BattleRng, boost: f64) -> Rarity {
    let roll = rng.next_outcome("wild rarity");
    if boost <= 1.0 || !boost.is_finite() {
        return Rarity::from_wild_roll(roll);
    }
    let distance = f64::from(100 - roll.min(100)) / boost;
    Rarity::from_wild_roll(100 - distance as u8)
}

/// Any element other than `primary`.
pub fn random_secondary_type(primary: ElementType, rng: &mut BattleRng) -> ElementType {
    let candidates: Vec<ElementType> = ElementType::iter().filter(|&e| e != primary).collect();
    candidates[rng.next_index(candidates.len(), "secondary type")]
}

pub fn generate_name(archetype: Archetype, rng: &mut BattleRng) -> String {
    let stem = if rng.chance(ARCHETYPE_NAME_CHANCE, "archetype name") {
        archetype.to_string()
    } else {
        NAME_PREFIXES[rng.next_index(NAME_PREFIXES.len(), "name prefix")].to_string()
    };
    let suffix = NAME_SUFFIXES[rng.next_index(NAME_SUFFIXES.len(), "name suffix")];
    format!("{}{}", stem, suffix)
}

/// Build a complete wild combatant at `level`, honoring any active rarity
/// and shiny events.
pub fn generate_wild(level: u16, modifiers: &dyn EventModifiers, rng: &mut BattleRng) -> Combatant {
    let archetypes: Vec<Archetype> = Archetype::iter().collect();
    let archetype = archetypes[rng.next_index(archetypes.len(), "wild archetype")];
    let rarity = roll_wild_rarity(rng, modifiers.rarity_boost());
    let (max_hp, stats) = generate_base_stats(archetype, rarity, level, rng);
    let name = generate_name(archetype, rng);

    let (low, high) = rarity.complexity_range();
    let complexity = rng.next_in_range(u32::from(low), u32::from(high), "complexity") as u8;

    let mut wild = Combatant::new(
        Uuid::new_v4().to_string(),
        name,
        archetype,
        rarity,
        level,
        max_hp,
        stats,
    )
    .with_complexity(complexity);

    if rarity >= Rarity::Rare && rng.chance(SECONDARY_TYPE_CHANCE, "has secondary type") {
        let secondary = random_secondary_type(wild.primary_type, rng);
        wild = wild.with_secondary_type(secondary);
    }
    wild.shiny = rng.next_fraction("shiny") < modifiers.shiny_rate();

    debug!(
        id = %wild.id,
        name = %wild.name,
        %archetype,
        %rarity,
        level,
        shiny = wild.shiny,
        "wild combatant generated"
    );
    wild
}
