use crate::ability_data::Ability;
use crate::battle::state::{Battle, BattleEvent, BattleRng, EventBus};
use crate::combatant::{CombatStats, Combatant};
use crate::errors::BattleResult;
use crate::event_modifiers::{EventModifiers, FixedModifiers};
use schema::{AbilityId, Archetype, Rarity, StatusKind};
use std::sync::Arc;

/// A builder for creating test combatants with common defaults.
///
/// Defaults to a level 5 Common Hacker with 100 HP, stats 100/20/30 and
/// Quick Hit only, so a neutral Quick Hit between two defaults deals 10.
///
/// # Example
/// ```
/// let combatant = TestCombatantBuilder::new("Sparky")
///     .with_abilities(vec![AbilityId::QuickHit])
///     .with_status(StatusKind::Paralysis, 2)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    archetype: Archetype,
    rarity: Rarity,
    level: u16,
    max_hp: u16,
    current_hp: Option<u16>,
    stats: CombatStats,
    abilities: Vec<AbilityId>,
    statuses: Vec<(StatusKind, u8, u16)>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            archetype: Archetype::Hacker,
            rarity: Rarity::Common,
            level: 5,
            max_hp: 100,
            current_hp: None,
            stats: CombatStats::new(100, 20, 30),
            abilities: vec![AbilityId::QuickHit],
            statuses: Vec::new(),
        }
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = archetype;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_level(mut self, level: u16) -> Self {
        self.level = level;
        self
    }

    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.max_hp = max_hp;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_stats(mut self, attack: u16, defense: u16, speed: u16) -> Self {
        self.stats = CombatStats::new(attack, defense, speed);
        self
    }

    pub fn with_abilities(mut self, abilities: Vec<AbilityId>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_status(self, kind: StatusKind, turns: u8) -> Self {
        self.with_status_intensity(kind, turns, 0)
    }

    pub fn with_status_intensity(mut self, kind: StatusKind, turns: u8, intensity: u16) -> Self {
        self.statuses.push((kind, turns, intensity));
        self
    }

    pub fn build(self) -> Combatant {
        let id = self.name.to_lowercase();
        let abilities = self
            .abilities
            .iter()
            .enumerate()
            .map(|(index, template)| Ability::new(format!("{}_ability_{}", id, index), *template))
            .collect();

        let mut combatant = Combatant::new(
            id,
            self.name,
            self.archetype,
            self.rarity,
            self.level,
            self.max_hp,
            self.stats,
        )
        .with_abilities(abilities)
        .with_current_hp(self.current_hp.unwrap_or(self.max_hp));

        for (kind, turns, intensity) in self.statuses {
            combatant.add_status_effect(kind, turns, intensity);
        }
        combatant.recalculate_stats();
        combatant
    }
}

/// Creates a battle with neutral modifiers, led by the first party member.
pub fn create_test_battle(party: Vec<Combatant>, enemy: Combatant, rng: BattleRng) -> Battle {
    create_test_battle_with_modifiers(party, enemy, Arc::new(FixedModifiers::default()), rng)
}

pub fn create_test_battle_with_modifiers(
    party: Vec<Combatant>,
    enemy: Combatant,
    modifiers: Arc<dyn EventModifiers>,
    rng: BattleRng,
) -> Battle {
    assert_ok(Battle::new("test_battle", party, 0, enemy, modifiers, rng))
}

/// Creates a `BattleRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> BattleRng {
    BattleRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// True if any event in the bus matches the predicate.
pub fn has_event(bus: &EventBus, predicate: impl Fn(&BattleEvent) -> bool) -> bool {
    bus.events().iter().any(predicate)
}
