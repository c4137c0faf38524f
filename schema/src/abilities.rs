use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Template identifier for every ability in the catalog.
///
/// The string form (`"quick_hit"`, `"go_panic"`, ...) is the id persisted by
/// hosts and accepted by `AbilityId::from_str`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AbilityId {
    // Archetype basics
    QuickHit,
    GoPanic,
    GarbageCollector,
    RaceCondition,
    Goroutine,
    ChannelBlast,
    InterfaceGuard,
    DeferRecover,

    // Status infliction
    BurnAttack,
    PoisonSting,
    ParalyzeBolt,
    SleepPowder,
    ConfuseRay,

    // Stat modifiers
    PowerUp,
    Harden,
    Agility,
    Weaken,
    BreakArmor,
    SlowDown,

    // Archetype signatures
    HackAttack,
    TankSlam,
    SpeedRush,
    MagicBlast,
    SupportBoost,

    // Evolution stage 1
    ConcurrentStrike,
    MutexLock,
    ContextTimeout,
    ReflectGuard,
    SelectStorm,

    // Evolution stage 2
    Deadlock,
    GoroutineSwarm,
    ChannelOverload,
    FullRecovery,
    UltimateGuard,

    // Legendary
    LegendaryStrike,
    DivineHeal,
    GodMode,
    Apocalypse,
    TimeRewind,

    /// Non-damaging stand-in used when a stored template id cannot be resolved.
    Idle,
}

impl AbilityId {
    /// The snake_case template id.
    pub fn as_id(self) -> &'static str {
        self.into()
    }
}

/// Who an ability is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Target {
    User,
    Enemy,
    Both,
}
