use crate::ability_data::{abilities_for, ability_count_for, Ability};
use crate::battle::conditions::StatusEffect;
use schema::{Archetype, ElementType, Rarity};
use serde::{Deserialize, Serialize};

/// Attack, defense and speed. HP is tracked separately because it is
/// consumed rather than modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

impl CombatStats {
    pub const fn new(attack: u16, defense: u16, speed: u16) -> Self {
        Self {
            attack,
            defense,
            speed,
        }
    }

    pub fn saturating_add(self, other: CombatStats) -> Self {
        Self {
            attack: self.attack.saturating_add(other.attack),
            defense: self.defense.saturating_add(other.defense),
            speed: self.speed.saturating_add(other.speed),
        }
    }
}

/// A creature's battle-scoped runtime state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub archetype: Archetype,
    pub primary_type: ElementType,
    pub secondary_type: Option<ElementType>,
    pub rarity: Rarity,
    pub complexity: u8,
    pub shiny: bool,
    pub(crate) level: u16,
    pub(crate) xp: u64,
    pub(crate) evolution_stage: u8,
    current_hp: u16,
    max_hp: u16,
    stats: CombatStats,
    // Snapshotted the first time anything modifies `stats`
    base_stats: Option<CombatStats>,
    stat_boost: f64,
    abilities: Vec<Ability>,
    pub(crate) status_effects: Vec<StatusEffect>,
}

impl Combatant {
    /// Create a combatant at full HP with abilities bound from its archetype
    /// pool. The complexity score defaults to the bottom of the rarity band.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        archetype: Archetype,
        rarity: Rarity,
        level: u16,
        max_hp: u16,
        stats: CombatStats,
    ) -> Self {
        let mut combatant = Self {
            id: id.into(),
            name: name.into(),
            archetype,
            primary_type: archetype.primary_type(),
            secondary_type: None,
            rarity,
            complexity: rarity.complexity_range().0,
            shiny: false,
            level: level.max(1),
            xp: 0,
            evolution_stage: 0,
            current_hp: max_hp,
            max_hp,
            stats,
            base_stats: None,
            stat_boost: 1.0,
            abilities: Vec::new(),
            status_effects: Vec::new(),
        };
        combatant.rebind_abilities();
        combatant
    }

    /// A secondary type equal to the primary is dropped.
    pub fn with_secondary_type(mut self, element: ElementType) -> Self {
        self.secondary_type = (element != self.primary_type).then_some(element);
        self
    }

    pub fn with_evolution_stage(mut self, stage: u8) -> Self {
        self.evolution_stage = stage.min(2);
        self.rebind_abilities();
        self
    }

    /// Replace the bound abilities, e.g. when restoring a stored creature.
    pub fn with_abilities(mut self, abilities: Vec<Ability>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_current_hp(mut self, hp: u16) -> Self {
        self.current_hp = hp.min(self.max_hp);
        self
    }

    pub fn with_xp(mut self, xp: u64) -> Self {
        self.xp = xp;
        self
    }

    pub fn with_complexity(mut self, complexity: u8) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn evolution_stage(&self) -> u8 {
        self.evolution_stage
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.max_hp
    }

    pub fn stats(&self) -> CombatStats {
        self.stats
    }

    pub fn attack(&self) -> u16 {
        self.stats.attack
    }

    pub fn defense(&self) -> u16 {
        self.stats.defense
    }

    pub fn speed(&self) -> u16 {
        self.stats.speed
    }

    /// Unmodified stats. Falls back to the live stats before any snapshot.
    pub fn base_stats(&self) -> CombatStats {
        self.base_stats.unwrap_or(self.stats)
    }

    pub fn stat_boost(&self) -> f64 {
        self.stat_boost
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn ability(&self, index: usize) -> Option<&Ability> {
        self.abilities.get(index)
    }

    pub fn status_effects(&self) -> &[StatusEffect] {
        &self.status_effects
    }

    pub fn types(&self) -> (ElementType, Option<ElementType>) {
        (self.primary_type, self.secondary_type)
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Current HP as a fraction of max. A zero max reads as empty.
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.current_hp) / f64::from(self.max_hp)
    }

    /// Returns the damage actually taken after clamping at zero.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let taken = amount.min(self.current_hp);
        self.current_hp -= taken;
        taken
    }

    /// Returns the HP actually restored after clamping at max.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.max_hp.saturating_sub(self.current_hp));
        self.current_hp += restored;
        restored
    }

    pub fn restore_full_hp(&mut self) -> u16 {
        self.heal(self.max_hp)
    }

    /// Record the unmodified stats once. Later calls never overwrite them.
    pub fn snapshot_base_stats(&mut self) {
        if self.base_stats.is_none() {
            self.base_stats = Some(self.stats);
        }
    }

    /// Apply an event-wide multiplier that survives status recalculation.
    pub fn apply_stat_boost(&mut self, multiplier: f64) {
        self.snapshot_base_stats();
        self.stat_boost = multiplier;
        self.recalculate_stats();
    }

    /// Drop statuses and boosts so only durable stats are written back.
    pub fn clear_battle_modifiers(&mut self) {
        self.status_effects.clear();
        self.stat_boost = 1.0;
        if let Some(base) = self.base_stats.take() {
            self.stats = base;
        }
    }

    /// Full HP and no lingering effects.
    pub fn full_restore(&mut self) {
        self.restore_full_hp();
        self.clear_battle_modifiers();
    }

    pub(crate) fn set_live_stats(&mut self, stats: CombatStats) {
        self.stats = stats;
    }

    pub(crate) fn snapshotted_base(&self) -> Option<CombatStats> {
        self.base_stats
    }

    /// Permanent growth. Lands on the base stats when modifiers are active so
    /// the next recalculation keeps it.
    pub(crate) fn grow_stats(&mut self, growth: CombatStats) {
        match self.base_stats.as_mut() {
            Some(base) => {
                *base = base.saturating_add(growth);
                self.recalculate_stats();
            }
            None => self.stats = self.stats.saturating_add(growth),
        }
    }

    /// Raises max HP and current HP together.
    pub(crate) fn grow_max_hp(&mut self, amount: u16) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
    }

    /// Bind the first `ability_count_for` entries of the archetype pool.
    pub fn rebind_abilities(&mut self) {
        let count = ability_count_for(self.level, self.evolution_stage, self.rarity);
        self.abilities = abilities_for(self.archetype, self.evolution_stage, self.rarity)
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(index, template)| Ability::new(format!("{}_ability_{}", self.id, index), template))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::AbilityId;

    fn sparky() -> Combatant {
        Combatant::new(
            "g1",
            "Sparky",
            Archetype::Hacker,
            Rarity::Common,
            5,
            60,
            CombatStats::new(45, 30, 55),
        )
    }

    #[test]
    fn test_new_binds_abilities_from_pool() {
        let combatant = sparky();
        let templates: Vec<_> = combatant.abilities().iter().map(|a| a.template).collect();
        assert_eq!(templates, vec![AbilityId::QuickHit, AbilityId::GoPanic]);
        assert_eq!(combatant.abilities()[1].id, "g1_ability_1");
        assert_eq!(combatant.current_hp(), 60);
        assert_eq!(combatant.primary_type, ElementType::Hacker);
    }

    #[test]
    fn test_evolution_stage_rebinds_abilities() {
        let combatant = sparky().with_evolution_stage(2);
        assert_eq!(combatant.abilities().len(), 6);
        assert_eq!(combatant.abilities()[4].template, AbilityId::Deadlock);
    }

    #[test]
    fn test_hp_stays_clamped() {
        let mut combatant = sparky();
        assert_eq!(combatant.take_damage(25), 25);
        assert_eq!(combatant.heal(100), 25);
        assert_eq!(combatant.current_hp(), 60);
        assert_eq!(combatant.take_damage(500), 60);
        assert!(combatant.is_fainted());
        assert_eq!(combatant.hp_fraction(), 0.0);
    }

    #[test]
    fn test_heal_above_max_restores_nothing() {
        let mut combatant = sparky();
        combatant.current_hp = 200;
        assert_eq!(combatant.heal(10), 0);
        assert_eq!(combatant.current_hp(), 200);
    }

    #[test]
    fn test_zero_max_hp_is_handled() {
        let combatant = Combatant::new(
            "g0",
            "Null",
            Archetype::Tank,
            Rarity::Common,
            1,
            0,
            CombatStats::default(),
        );
        assert!(combatant.is_fainted());
        assert_eq!(combatant.hp_fraction(), 0.0);
    }

    #[test]
    fn test_secondary_type_never_duplicates_primary() {
        assert_eq!(sparky().with_secondary_type(ElementType::Hacker).secondary_type, None);
        assert_eq!(
            sparky().with_secondary_type(ElementType::Mage).secondary_type,
            Some(ElementType::Mage)
        );
    }

    #[test]
    fn test_stat_boost_keeps_base_and_clears_cleanly() {
        let mut combatant = sparky();
        combatant.apply_stat_boost(1.1);
        assert_eq!(combatant.stats(), CombatStats::new(49, 33, 60));
        assert_eq!(combatant.base_stats(), CombatStats::new(45, 30, 55));

        combatant.clear_battle_modifiers();
        assert_eq!(combatant.stats(), CombatStats::new(45, 30, 55));
        assert_eq!(combatant.stat_boost(), 1.0);
    }

    #[test]
    fn test_growth_lands_on_base_stats() {
        let mut combatant = sparky();
        combatant.apply_stat_boost(2.0);
        combatant.grow_stats(CombatStats::new(5, 0, 0));
        assert_eq!(combatant.base_stats().attack, 50);
        assert_eq!(combatant.attack(), 100);
    }
}
