use crate::battle::state::BattleRng;
use crate::errors::{AbilityDataError, AbilityDataResult};
use schema::{AbilityId, Archetype, ElementType, Rarity, StatusKind, Target};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::warn;

// Immutable template registry, built on first lookup
static ABILITY_TEMPLATES: LazyLock<HashMap<AbilityId, &'static AbilityTemplate>> =
    LazyLock::new(|| {
        TEMPLATES
            .iter()
            .chain(std::iter::once(&IDLE))
            .map(|template| (template.id, template))
            .collect()
    });

/// Look up the template behind an ability id.
pub fn get_ability_template(id: AbilityId) -> AbilityDataResult<&'static AbilityTemplate> {
    ABILITY_TEMPLATES
        .get(&id)
        .copied()
        .ok_or(AbilityDataError::MissingTemplate(id))
}

/// Resolve a persisted template id string.
pub fn parse_ability_id(template_id: &str) -> AbilityDataResult<AbilityId> {
    AbilityId::from_str(template_id)
        .map_err(|_| AbilityDataError::UnknownTemplate(template_id.to_string()))
}

/// A value that grows with the user's level and may carry a random spread.
/// Resolves to `base + level / level_divisor + rand(0..=spread)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scaled {
    pub base: u16,
    pub level_divisor: u16,
    pub spread: u16,
}

impl Scaled {
    pub const fn fixed(base: u16) -> Self {
        Self {
            base,
            level_divisor: 0,
            spread: 0,
        }
    }

    pub const fn per_level(base: u16, level_divisor: u16) -> Self {
        Self {
            base,
            level_divisor,
            spread: 0,
        }
    }

    pub const fn random(base: u16, spread: u16) -> Self {
        Self {
            base,
            level_divisor: 0,
            spread,
        }
    }

    /// Only draws from the RNG when there is a spread to roll.
    pub fn resolve(&self, level: u16, rng: &mut BattleRng, reason: &str) -> u16 {
        let level_bonus = match self.level_divisor {
            0 => 0,
            divisor => level / divisor,
        };
        let spread = rng.next_in_range(0, u32::from(self.spread), reason) as u16;
        self.base.saturating_add(level_bonus).saturating_add(spread)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealAmount {
    /// `base + level * per_level`
    Scaled { base: u16, per_level: u16 },
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanseScope {
    /// Keep attack/defense/speed boosts, drop everything else.
    KeepBoosts,
    All,
}

/// One step of an ability's resolution. Templates run their effects in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityEffect {
    /// Direct damage. `element` replaces the user's own types for the match-up.
    Damage {
        power: u16,
        element: Option<ElementType>,
    },
    MultiHit {
        power: u16,
        min_hits: u8,
        max_hits: u8,
    },
    /// Damage that, with `chance` percent, lands on the user divided by `recoil_divisor`.
    Backfire {
        power: u16,
        chance: u8,
        recoil_divisor: u16,
    },
    /// Full damage to the target and `damage / recoil_divisor` to the user.
    DualDamage { power: u16, recoil_divisor: u16 },
    Heal(HealAmount),
    Buff { kind: StatusKind, duration: Scaled },
    Debuff { kind: StatusKind, duration: Scaled },
    StatusInflict {
        kind: StatusKind,
        chance: u8,
        duration: Scaled,
        intensity: Scaled,
        afflicts: Target,
    },
    Cleanse(CleanseScope),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbilityTemplate {
    pub id: AbilityId,
    pub name: &'static str,
    pub description: &'static str,
    pub power: u16,
    pub cost: u16,
    pub target: Target,
    pub effects: &'static [AbilityEffect],
}

/// An ability bound to one combatant. Only the id pair is stored; everything
/// else comes from the shared template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub template: AbilityId,
}

impl Ability {
    pub fn new(id: impl Into<String>, template: AbilityId) -> Self {
        Self {
            id: id.into(),
            template,
        }
    }

    /// Strict construction from a stored template id.
    pub fn from_template_id(id: impl Into<String>, template_id: &str) -> AbilityDataResult<Self> {
        let template = parse_ability_id(template_id)?;
        get_ability_template(template)?;
        Ok(Self::new(id, template))
    }

    /// Lenient construction for live encounters: unknown ids become `Idle`.
    pub fn from_template_id_or_idle(id: impl Into<String>, template_id: &str) -> Self {
        let id = id.into();
        match Self::from_template_id(id.clone(), template_id) {
            Ok(ability) => ability,
            Err(err) => {
                warn!(ability = %id, %err, "substituting idle ability");
                Self::new(id, AbilityId::Idle)
            }
        }
    }

    pub fn template(&self) -> &'static AbilityTemplate {
        get_ability_template(self.template).unwrap_or(&IDLE)
    }

    pub fn name(&self) -> &'static str {
        self.template().name
    }

    pub fn description(&self) -> &'static str {
        self.template().description
    }

    pub fn power(&self) -> u16 {
        self.template().power
    }

    pub fn cost(&self) -> u16 {
        self.template().cost
    }

    pub fn target(&self) -> Target {
        self.template().target
    }
}

/// How many abilities a combatant carries. Rarity and evolution dominate level.
pub fn ability_count_for(level: u16, evolution_stage: u8, rarity: Rarity) -> usize {
    if rarity == Rarity::Legendary {
        7
    } else if evolution_stage >= 2 {
        6
    } else if evolution_stage == 1 {
        5
    } else if level >= 20 {
        4
    } else if level >= 10 {
        3
    } else {
        2
    }
}

/// Ordered ability pool for a creature. Combatants take the first
/// `ability_count_for` entries, so unlocked tiers come right after the basics.
pub fn abilities_for(archetype: Archetype, evolution_stage: u8, rarity: Rarity) -> Vec<AbilityId> {
    use AbilityId::*;

    let (basics, stage_one, stage_two, legendary, signature, utility) = match archetype {
        Archetype::Hacker => (
            [QuickHit, GoPanic, Goroutine, RaceCondition],
            ConcurrentStrike,
            Deadlock,
            LegendaryStrike,
            HackAttack,
            [PoisonSting, PowerUp],
        ),
        Archetype::Tank => (
            [QuickHit, InterfaceGuard, DeferRecover, GarbageCollector],
            ReflectGuard,
            UltimateGuard,
            GodMode,
            TankSlam,
            [Harden, Weaken],
        ),
        Archetype::Speedy => (
            [QuickHit, Goroutine, ChannelBlast, GoPanic],
            SelectStorm,
            GoroutineSwarm,
            Apocalypse,
            SpeedRush,
            [Agility, SlowDown],
        ),
        Archetype::Support => (
            [GarbageCollector, InterfaceGuard, DeferRecover, QuickHit],
            ContextTimeout,
            FullRecovery,
            DivineHeal,
            SupportBoost,
            [SleepPowder, ConfuseRay],
        ),
        Archetype::Mage => (
            [ChannelBlast, GoPanic, RaceCondition, Goroutine],
            MutexLock,
            ChannelOverload,
            TimeRewind,
            MagicBlast,
            [BurnAttack, ParalyzeBolt],
        ),
    };

    let mut pool = basics.to_vec();
    if rarity == Rarity::Legendary {
        pool.push(legendary);
    }
    if evolution_stage >= 2 {
        pool.push(stage_two);
    }
    if evolution_stage >= 1 {
        pool.push(stage_one);
    }
    pool.push(signature);
    pool.extend(utility);
    pool
}

// --- TEMPLATE TABLE ---

const fn damage(power: u16) -> AbilityEffect {
    AbilityEffect::Damage {
        power,
        element: None,
    }
}

const fn typed_damage(power: u16, element: ElementType) -> AbilityEffect {
    AbilityEffect::Damage {
        power,
        element: Some(element),
    }
}

const fn inflict(kind: StatusKind, chance: u8, duration: Scaled) -> AbilityEffect {
    AbilityEffect::StatusInflict {
        kind,
        chance,
        duration,
        intensity: Scaled::fixed(0),
        afflicts: Target::Enemy,
    }
}

const STAT_TURNS: Scaled = Scaled::per_level(3, 5);
const TWO_OR_THREE: Scaled = Scaled::random(2, 1);

static IDLE: AbilityTemplate = AbilityTemplate {
    id: AbilityId::Idle,
    name: "Idle",
    description: "Waits and watches",
    power: 0,
    cost: 0,
    target: Target::User,
    effects: &[],
};

static TEMPLATES: &[AbilityTemplate] = &[
    AbilityTemplate {
        id: AbilityId::QuickHit,
        name: "Quick Hit",
        description: "A fast, reliable attack",
        power: 20,
        cost: 5,
        target: Target::Enemy,
        effects: &[damage(20)],
    },
    AbilityTemplate {
        id: AbilityId::GoPanic,
        name: "Go Panic()",
        description: "Causes chaos and may confuse the target",
        power: 40,
        cost: 10,
        target: Target::Enemy,
        effects: &[damage(40), inflict(StatusKind::Confusion, 30, TWO_OR_THREE)],
    },
    AbilityTemplate {
        id: AbilityId::GarbageCollector,
        name: "Garbage Collector",
        description: "Cleans up and restores HP",
        power: 30,
        cost: 15,
        target: Target::User,
        effects: &[AbilityEffect::Heal(HealAmount::Scaled {
            base: 30,
            per_level: 2,
        })],
    },
    AbilityTemplate {
        id: AbilityId::RaceCondition,
        name: "Race Condition",
        description: "Unpredictable but powerful, may backfire",
        power: 60,
        cost: 20,
        target: Target::Enemy,
        effects: &[AbilityEffect::Backfire {
            power: 60,
            chance: 20,
            recoil_divisor: 2,
        }],
    },
    AbilityTemplate {
        id: AbilityId::Goroutine,
        name: "Goroutine",
        description: "Spawns two or three concurrent attacks",
        power: 15,
        cost: 8,
        target: Target::Enemy,
        effects: &[AbilityEffect::MultiHit {
            power: 15,
            min_hits: 2,
            max_hits: 3,
        }],
    },
    AbilityTemplate {
        id: AbilityId::ChannelBlast,
        name: "Channel Blast",
        description: "Sends a burst of data through a channel",
        power: 50,
        cost: 18,
        target: Target::Enemy,
        effects: &[damage(50)],
    },
    AbilityTemplate {
        id: AbilityId::InterfaceGuard,
        name: "Interface Guard",
        description: "Implements a defensive interface",
        power: 25,
        cost: 12,
        target: Target::User,
        effects: &[AbilityEffect::Buff {
            kind: StatusKind::DefenseUp,
            duration: STAT_TURNS,
        }],
    },
    AbilityTemplate {
        id: AbilityId::DeferRecover,
        name: "Defer Recover",
        description: "Recovers from panic, heals and blocks the next attack",
        power: 35,
        cost: 20,
        target: Target::User,
        effects: &[
            AbilityEffect::Heal(HealAmount::Scaled {
                base: 35,
                per_level: 3,
            }),
            AbilityEffect::Buff {
                kind: StatusKind::Protect,
                duration: Scaled::fixed(1),
            },
        ],
    },
    AbilityTemplate {
        id: AbilityId::BurnAttack,
        name: "Flame On",
        description: "Sets the target ablaze",
        power: 35,
        cost: 12,
        target: Target::Enemy,
        effects: &[
            damage(35),
            inflict(StatusKind::Burn, 40, Scaled::random(3, 1)),
        ],
    },
    AbilityTemplate {
        id: AbilityId::PoisonSting,
        name: "Toxic Code",
        description: "Injects malicious code that keeps hurting",
        power: 30,
        cost: 10,
        target: Target::Enemy,
        effects: &[
            damage(30),
            AbilityEffect::StatusInflict {
                kind: StatusKind::Poison,
                chance: 50,
                duration: Scaled::random(4, 1),
                intensity: Scaled::per_level(2, 5),
                afflicts: Target::Enemy,
            },
        ],
    },
    AbilityTemplate {
        id: AbilityId::ParalyzeBolt,
        name: "Static Shock",
        description: "Paralyzes with static electricity",
        power: 35,
        cost: 12,
        target: Target::Enemy,
        effects: &[
            damage(35),
            inflict(StatusKind::Paralysis, 30, TWO_OR_THREE),
        ],
    },
    AbilityTemplate {
        id: AbilityId::SleepPowder,
        name: "Sleep Mode",
        description: "Puts the target into sleep mode",
        power: 0,
        cost: 15,
        target: Target::Enemy,
        effects: &[inflict(StatusKind::Sleep, 60, TWO_OR_THREE)],
    },
    AbilityTemplate {
        id: AbilityId::ConfuseRay,
        name: "Confuse Ray",
        description: "Confuses the target",
        power: 0,
        cost: 10,
        target: Target::Enemy,
        effects: &[inflict(StatusKind::Confusion, 70, TWO_OR_THREE)],
    },
    AbilityTemplate {
        id: AbilityId::PowerUp,
        name: "Power Up",
        description: "Raises attack",
        power: 0,
        cost: 15,
        target: Target::User,
        effects: &[AbilityEffect::Buff {
            kind: StatusKind::AttackUp,
            duration: STAT_TURNS,
        }],
    },
    AbilityTemplate {
        id: AbilityId::Harden,
        name: "Harden",
        description: "Raises defense",
        power: 0,
        cost: 15,
        target: Target::User,
        effects: &[AbilityEffect::Buff {
            kind: StatusKind::DefenseUp,
            duration: STAT_TURNS,
        }],
    },
    AbilityTemplate {
        id: AbilityId::Agility,
        name: "Agility",
        description: "Raises speed",
        power: 0,
        cost: 15,
        target: Target::User,
        effects: &[AbilityEffect::Buff {
            kind: StatusKind::SpeedUp,
            duration: STAT_TURNS,
        }],
    },
    AbilityTemplate {
        id: AbilityId::Weaken,
        name: "Weaken",
        description: "Lowers the target's attack",
        power: 0,
        cost: 12,
        target: Target::Enemy,
        effects: &[AbilityEffect::Debuff {
            kind: StatusKind::AttackDown,
            duration: STAT_TURNS,
        }],
    },
    AbilityTemplate {
        id: AbilityId::BreakArmor,
        name: "Break Armor",
        description: "Lowers the target's defense",
        power: 0,
        cost: 12,
        target: Target::Enemy,
        effects: &[AbilityEffect::Debuff {
            kind: StatusKind::DefenseDown,
            duration: STAT_TURNS,
        }],
    },
    AbilityTemplate {
        id: AbilityId::SlowDown,
        name: "Slow Down",
        description: "Lowers the target's speed",
        power: 0,
        cost: 12,
        target: Target::Enemy,
        effects: &[AbilityEffect::Debuff {
            kind: StatusKind::SpeedDown,
            duration: STAT_TURNS,
        }],
    },
    AbilityTemplate {
        id: AbilityId::HackAttack,
        name: "Hack Attack",
        description: "Powerful Hacker-type attack",
        power: 55,
        cost: 18,
        target: Target::Enemy,
        effects: &[typed_damage(55, ElementType::Hacker)],
    },
    AbilityTemplate {
        id: AbilityId::TankSlam,
        name: "Tank Slam",
        description: "Powerful Tank-type attack",
        power: 55,
        cost: 18,
        target: Target::Enemy,
        effects: &[typed_damage(55, ElementType::Tank)],
    },
    AbilityTemplate {
        id: AbilityId::SpeedRush,
        name: "Speed Rush",
        description: "Powerful Speedy-type attack",
        power: 55,
        cost: 18,
        target: Target::Enemy,
        effects: &[typed_damage(55, ElementType::Speedy)],
    },
    AbilityTemplate {
        id: AbilityId::MagicBlast,
        name: "Magic Blast",
        description: "Powerful Mage-type attack",
        power: 55,
        cost: 18,
        target: Target::Enemy,
        effects: &[typed_damage(55, ElementType::Mage)],
    },
    AbilityTemplate {
        id: AbilityId::SupportBoost,
        name: "Support Boost",
        description: "Heals and raises attack and defense",
        power: 40,
        cost: 20,
        target: Target::User,
        effects: &[
            AbilityEffect::Heal(HealAmount::Scaled {
                base: 40,
                per_level: 3,
            }),
            AbilityEffect::Buff {
                kind: StatusKind::AttackUp,
                duration: STAT_TURNS,
            },
            AbilityEffect::Buff {
                kind: StatusKind::DefenseUp,
                duration: STAT_TURNS,
            },
        ],
    },
    AbilityTemplate {
        id: AbilityId::ConcurrentStrike,
        name: "Concurrent Strike",
        description: "Strikes three or four times at once",
        power: 25,
        cost: 15,
        target: Target::Enemy,
        effects: &[AbilityEffect::MultiHit {
            power: 25,
            min_hits: 3,
            max_hits: 4,
        }],
    },
    AbilityTemplate {
        id: AbilityId::MutexLock,
        name: "Mutex Lock",
        description: "Locks the target and may paralyze it",
        power: 65,
        cost: 22,
        target: Target::Enemy,
        effects: &[
            damage(65),
            inflict(StatusKind::Paralysis, 40, TWO_OR_THREE),
        ],
    },
    AbilityTemplate {
        id: AbilityId::ContextTimeout,
        name: "Context Timeout",
        description: "Cancels the target's context and may put it to sleep",
        power: 60,
        cost: 20,
        target: Target::Enemy,
        effects: &[damage(60), inflict(StatusKind::Sleep, 35, TWO_OR_THREE)],
    },
    AbilityTemplate {
        id: AbilityId::ReflectGuard,
        name: "Reflect Guard",
        description: "Raises defense and blocks the next attack",
        power: 0,
        cost: 18,
        target: Target::User,
        effects: &[
            AbilityEffect::Buff {
                kind: StatusKind::DefenseUp,
                duration: STAT_TURNS,
            },
            AbilityEffect::Buff {
                kind: StatusKind::Protect,
                duration: Scaled::fixed(1),
            },
        ],
    },
    AbilityTemplate {
        id: AbilityId::SelectStorm,
        name: "Select Storm",
        description: "Fires on every ready channel, four or five hits",
        power: 20,
        cost: 16,
        target: Target::Enemy,
        effects: &[AbilityEffect::MultiHit {
            power: 20,
            min_hits: 4,
            max_hits: 5,
        }],
    },
    AbilityTemplate {
        id: AbilityId::Deadlock,
        name: "Deadlock",
        description: "Massive damage that may freeze both fighters",
        power: 80,
        cost: 30,
        target: Target::Enemy,
        effects: &[
            damage(80),
            AbilityEffect::StatusInflict {
                kind: StatusKind::Paralysis,
                chance: 30,
                duration: Scaled::fixed(1),
                intensity: Scaled::fixed(0),
                afflicts: Target::Both,
            },
        ],
    },
    AbilityTemplate {
        id: AbilityId::GoroutineSwarm,
        name: "Goroutine Swarm",
        description: "Unleashes five to seven goroutines",
        power: 18,
        cost: 25,
        target: Target::Enemy,
        effects: &[AbilityEffect::MultiHit {
            power: 18,
            min_hits: 5,
            max_hits: 7,
        }],
    },
    AbilityTemplate {
        id: AbilityId::ChannelOverload,
        name: "Channel Overload",
        description: "Floods the target with data",
        power: 90,
        cost: 35,
        target: Target::Enemy,
        effects: &[damage(90)],
    },
    AbilityTemplate {
        id: AbilityId::FullRecovery,
        name: "Full Recovery",
        description: "Fully heals and clears every ailment",
        power: 0,
        cost: 30,
        target: Target::User,
        effects: &[
            AbilityEffect::Heal(HealAmount::Full),
            AbilityEffect::Cleanse(CleanseScope::KeepBoosts),
        ],
    },
    AbilityTemplate {
        id: AbilityId::UltimateGuard,
        name: "Ultimate Guard",
        description: "Greatly raises defense and blocks the next attack",
        power: 0,
        cost: 28,
        target: Target::User,
        effects: &[
            AbilityEffect::Buff {
                kind: StatusKind::DefenseUp,
                duration: Scaled::per_level(4, 5),
            },
            AbilityEffect::Buff {
                kind: StatusKind::Protect,
                duration: Scaled::fixed(1),
            },
        ],
    },
    AbilityTemplate {
        id: AbilityId::LegendaryStrike,
        name: "Legendary Strike",
        description: "An attack of legend",
        power: 100,
        cost: 40,
        target: Target::Enemy,
        effects: &[damage(100)],
    },
    AbilityTemplate {
        id: AbilityId::DivineHeal,
        name: "Divine Heal",
        description: "Restores all HP",
        power: 0,
        cost: 35,
        target: Target::User,
        effects: &[AbilityEffect::Heal(HealAmount::Full)],
    },
    AbilityTemplate {
        id: AbilityId::GodMode,
        name: "God Mode",
        description: "Raises attack, defense and speed for a long time",
        power: 0,
        cost: 40,
        target: Target::User,
        effects: &[
            AbilityEffect::Buff {
                kind: StatusKind::AttackUp,
                duration: Scaled::per_level(5, 3),
            },
            AbilityEffect::Buff {
                kind: StatusKind::DefenseUp,
                duration: Scaled::per_level(5, 3),
            },
            AbilityEffect::Buff {
                kind: StatusKind::SpeedUp,
                duration: Scaled::per_level(5, 3),
            },
        ],
    },
    AbilityTemplate {
        id: AbilityId::Apocalypse,
        name: "Apocalypse",
        description: "Devastates the target at a cost to the user",
        power: 120,
        cost: 50,
        target: Target::Both,
        effects: &[AbilityEffect::DualDamage {
            power: 120,
            recoil_divisor: 3,
        }],
    },
    AbilityTemplate {
        id: AbilityId::TimeRewind,
        name: "Time Rewind",
        description: "Restores all HP and erases every effect",
        power: 0,
        cost: 45,
        target: Target::User,
        effects: &[
            AbilityEffect::Heal(HealAmount::Full),
            AbilityEffect::Cleanse(CleanseScope::All),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_ability_id_has_a_template() {
        for id in AbilityId::iter() {
            let template = get_ability_template(id).unwrap();
            assert_eq!(template.id, id);
        }
        assert_eq!(TEMPLATES.len() + 1, AbilityId::iter().count());
    }

    #[test]
    fn test_damaging_templates_report_their_power() {
        for template in TEMPLATES {
            let effect_power = template.effects.iter().find_map(|effect| match *effect {
                AbilityEffect::Damage { power, .. }
                | AbilityEffect::MultiHit { power, .. }
                | AbilityEffect::Backfire { power, .. }
                | AbilityEffect::DualDamage { power, .. } => Some(power),
                _ => None,
            });
            if let Some(power) = effect_power {
                assert_eq!(power, template.power, "{:?}", template.id);
            }
        }
    }

    #[test]
    fn test_strict_lookup_rejects_unknown_ids() {
        assert_eq!(
            Ability::from_template_id("a1", "warp_drive"),
            Err(AbilityDataError::UnknownTemplate("warp_drive".to_string()))
        );
        assert_eq!(
            Ability::from_template_id("a1", "goroutine").unwrap().template,
            AbilityId::Goroutine
        );
    }

    #[test]
    fn test_lenient_lookup_falls_back_to_idle() {
        let ability = Ability::from_template_id_or_idle("a1", "warp_drive");
        assert_eq!(ability.template, AbilityId::Idle);
        assert_eq!(ability.power(), 0);
        assert!(ability.template().effects.is_empty());
    }

    #[rstest]
    #[case(1, 0, Rarity::Common, 2)]
    #[case(9, 0, Rarity::Rare, 2)]
    #[case(10, 0, Rarity::Common, 3)]
    #[case(20, 0, Rarity::Epic, 4)]
    #[case(5, 1, Rarity::Common, 5)]
    #[case(40, 2, Rarity::Common, 6)]
    #[case(1, 0, Rarity::Legendary, 7)]
    #[case(40, 2, Rarity::Legendary, 7)]
    fn test_ability_count_for(
        #[case] level: u16,
        #[case] stage: u8,
        #[case] rarity: Rarity,
        #[case] expected: usize,
    ) {
        assert_eq!(ability_count_for(level, stage, rarity), expected);
    }

    #[test]
    fn test_pools_always_cover_the_ability_count() {
        for archetype in Archetype::iter() {
            for rarity in Rarity::iter() {
                for stage in 0..=2 {
                    let pool = abilities_for(archetype, stage, rarity);
                    assert!(pool.len() >= ability_count_for(40, stage, rarity));
                }
            }
        }
    }

    #[test]
    fn test_evolved_pool_leads_with_unlocked_tiers() {
        let pool = abilities_for(Archetype::Hacker, 1, Rarity::Common);
        let bound: Vec<_> = pool
            .into_iter()
            .take(ability_count_for(16, 1, Rarity::Common))
            .collect();
        assert_eq!(
            bound,
            vec![
                AbilityId::QuickHit,
                AbilityId::GoPanic,
                AbilityId::Goroutine,
                AbilityId::RaceCondition,
                AbilityId::ConcurrentStrike,
            ]
        );
    }

    #[test]
    fn test_scaled_values_grow_with_level() {
        let mut rng = BattleRng::new_for_test(vec![]);
        assert_eq!(Scaled::per_level(3, 5).resolve(12, &mut rng, "duration"), 5);
        assert_eq!(Scaled::fixed(1).resolve(99, &mut rng, "duration"), 1);

        let mut rng = BattleRng::new_for_test(vec![51]);
        assert_eq!(Scaled::random(2, 1).resolve(1, &mut rng, "duration"), 3);
    }
}
