//! Gophermon Battle Engine
//!
//! Turn-based wild encounters between a player's party and one wild
//! combatant: type match-ups, timed status effects, a catalog of abilities,
//! capture, XP and evolution. The engine performs no I/O. Hosts feed it
//! actions and render the messages it returns.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod ability_data;
pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod event_modifiers;
pub mod generation;
pub mod progression;
pub mod snapshot;

// --- PUBLIC API RE-EXPORTS ---
// The types a host needs to run an encounter end to end.

// --- From the `schema` crate ---
pub use schema::{AbilityId, Archetype, ElementType, Rarity, StatType, StatusKind, Target};

// --- From this crate's modules (`src/`) ---

// Core battle state and the action entry point.
pub use battle::state::{
    ActionRejection, Battle, BattleEvent, BattleRng, BattleStatus, EventBus, PlayerAction,
    TurnOwner,
};

// Runtime combatants and their ability catalog.
pub use ability_data::{get_ability_template, Ability, AbilityTemplate};
pub use battle::conditions::StatusEffect;
pub use combatant::{CombatStats, Combatant};

// Tuning, events and errors.
pub use config::BattleConfig;
pub use errors::{BattleEngineError, BattleResult};
pub use event_modifiers::{EventKind, EventManager, EventModifiers, FixedModifiers};

// Between-battle progression.
pub use generation::generate_wild;
pub use progression::{check_and_evolve, recover_from_blackout, LevelUp};
