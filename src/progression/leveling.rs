use crate::battle::state::BattleRng;
use crate::combatant::{CombatStats, Combatant};
use schema::Archetype;
use serde::{Deserialize, Serialize};

const XP_CURVE_FACTOR: u64 = 50;
const BASE_HP_GROWTH: u16 = 10;
const HP_GROWTH_SPREAD: u32 = 5;

/// Total XP required to reach `level`.
pub fn xp_needed(level: u16) -> u64 {
    let level = u64::from(level);
    XP_CURVE_FACTOR * level * level
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u16,
    pub to: u16,
}

/// Inclusive per-level growth ranges for one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GrowthRanges {
    hp: (u16, u16),
    attack: (u16, u16),
    defense: (u16, u16),
    speed: (u16, u16),
}

fn growth_for(archetype: Archetype) -> GrowthRanges {
    match archetype {
        Archetype::Hacker => GrowthRanges {
            hp: (0, 0),
            attack: (3, 5),
            defense: (1, 2),
            speed: (4, 6),
        },
        Archetype::Tank => GrowthRanges {
            hp: (5, 9),
            attack: (1, 2),
            defense: (4, 6),
            speed: (1, 1),
        },
        Archetype::Speedy => GrowthRanges {
            hp: (0, 0),
            attack: (2, 4),
            defense: (1, 2),
            speed: (5, 8),
        },
        Archetype::Support => GrowthRanges {
            hp: (3, 5),
            attack: (2, 3),
            defense: (2, 3),
            speed: (2, 3),
        },
        Archetype::Mage => GrowthRanges {
            hp: (0, 0),
            attack: (4, 6),
            defense: (2, 3),
            speed: (2, 3),
        },
    }
}

fn roll(range: (u16, u16), rng: &mut BattleRng, reason: &str) -> u16 {
    rng.next_in_range(u32::from(range.0), u32::from(range.1), reason) as u16
}

impl Combatant {
    /// Add XP and level up while the total crosses the next threshold.
    ///
    /// Returns the levels crossed, or `None` if the level did not change.
    pub fn add_xp(&mut self, amount: u32, rng: &mut BattleRng) -> Option<LevelUp> {
        self.xp = self.xp.saturating_add(u64::from(amount));

        let from = self.level;
        while self.level < u16::MAX && self.xp >= xp_needed(self.level + 1) {
            self.level += 1;
            self.apply_level_growth(rng);
        }

        (self.level > from).then_some(LevelUp {
            from,
            to: self.level,
        })
    }

    /// XP still missing before the next level.
    pub fn xp_to_next_level(&self) -> u64 {
        xp_needed(self.level.saturating_add(1)).saturating_sub(self.xp)
    }

    fn apply_level_growth(&mut self, rng: &mut BattleRng) {
        let growth = growth_for(self.archetype);

        let hp = BASE_HP_GROWTH
            .saturating_add(rng.next_in_range(0, HP_GROWTH_SPREAD, "level hp growth") as u16)
            .saturating_add(u16::from(self.complexity / 2))
            .saturating_add(roll(growth.hp, rng, "archetype hp growth"));
        self.grow_max_hp(hp);

        let stats = CombatStats {
            attack: roll(growth.attack, rng, "attack growth"),
            defense: roll(growth.defense, rng, "defense growth"),
            speed: roll(growth.speed, rng, "speed growth"),
        };
        self.grow_stats(stats);
    }
}
