//! Time-boxed global events and the multipliers they expose to battles.
//!
//! Battles only ever read through [`EventModifiers`]. [`EventManager`] owns the
//! running events behind a lock so one manager can be shared by every battle
//! in flight.

use crate::battle::state::BattleRng;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use strum::EnumString;
use tracing::info;
use uuid::Uuid;

pub const BASE_SHINY_RATE: f64 = 1.0 / 4096.0;
pub const EVENT_SHINY_RATE: f64 = 1.0 / 100.0;

/// Read-only multipliers a battle consults. Neutral values mean "no event".
pub trait EventModifiers: Send + Sync + fmt::Debug {
    fn xp_multiplier(&self) -> f64;
    fn capture_rate_multiplier(&self) -> f64;
    fn stat_boost_multiplier(&self) -> f64;
    fn evolution_level_reduction(&self) -> u16;

    fn shiny_rate(&self) -> f64 {
        BASE_SHINY_RATE
    }

    fn rarity_boost(&self) -> f64 {
        1.0
    }
}

/// A frozen set of multipliers. The default is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedModifiers {
    pub xp: f64,
    pub capture_rate: f64,
    pub stat_boost: f64,
    pub evolution_level_reduction: u16,
    pub shiny_rate: f64,
    pub rarity_boost: f64,
}

impl Default for FixedModifiers {
    fn default() -> Self {
        Self {
            xp: 1.0,
            capture_rate: 1.0,
            stat_boost: 1.0,
            evolution_level_reduction: 0,
            shiny_rate: BASE_SHINY_RATE,
            rarity_boost: 1.0,
        }
    }
}

impl EventModifiers for FixedModifiers {
    fn xp_multiplier(&self) -> f64 {
        self.xp
    }

    fn capture_rate_multiplier(&self) -> f64 {
        self.capture_rate
    }

    fn stat_boost_multiplier(&self) -> f64 {
        self.stat_boost
    }

    fn evolution_level_reduction(&self) -> u16 {
        self.evolution_level_reduction
    }

    fn shiny_rate(&self) -> f64 {
        self.shiny_rate
    }

    fn rarity_boost(&self) -> f64 {
        self.rarity_boost
    }
}

/// Parses from its variant name, ignoring ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum EventKind {
    ShinyHunt,
    DoubleXp,
    RareEncounter,
    LuckyDay,
    StatBoost,
    EvolutionFest,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::ShinyHunt,
        EventKind::DoubleXp,
        EventKind::RareEncounter,
        EventKind::LuckyDay,
        EventKind::StatBoost,
        EventKind::EvolutionFest,
    ];

    /// Uniform pick over every kind.
    pub fn random(rng: &mut BattleRng) -> EventKind {
        EventKind::ALL[rng.next_index(EventKind::ALL.len(), "event kind")]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EventKind::ShinyHunt => "Shiny Hunt",
            EventKind::DoubleXp => "Double XP Weekend",
            EventKind::RareEncounter => "Rare Encounter Festival",
            EventKind::LuckyDay => "Lucky Day",
            EventKind::StatBoost => "Power Surge",
            EventKind::EvolutionFest => "Evolution Festival",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EventKind::ShinyHunt => "Shiny gophers appear far more often",
            EventKind::DoubleXp => "All battles award double experience",
            EventKind::RareEncounter => "Rare gophers appear twice as often",
            EventKind::LuckyDay => "Nets are 50% more likely to hold",
            EventKind::StatBoost => "Every fighter enters battle 10% stronger",
            EventKind::EvolutionFest => "Gophers evolve five levels early",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl GameEvent {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }

    pub fn time_remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.ends_at - now).max(TimeDelta::zero())
    }
}

/// Registry of running events.
#[derive(Debug, Default)]
pub struct EventManager {
    events: RwLock<HashMap<Uuid, GameEvent>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_event(&self, kind: EventKind, duration: TimeDelta) -> GameEvent {
        self.start_event_at(kind, Utc::now(), duration)
    }

    pub fn start_random_event(&self, duration: TimeDelta, rng: &mut BattleRng) -> GameEvent {
        self.start_event(EventKind::random(rng), duration)
    }

    /// Start an event, replacing any event of the same kind.
    pub fn start_event_at(
        &self,
        kind: EventKind,
        starts_at: DateTime<Utc>,
        duration: TimeDelta,
    ) -> GameEvent {
        let event = GameEvent {
            id: Uuid::new_v4(),
            kind,
            starts_at,
            ends_at: starts_at + duration,
        };

        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        events.retain(|_, existing| existing.kind != kind);
        events.insert(event.id, event.clone());

        info!(event_id = %event.id, %kind, ends_at = %event.ends_at, "event started");
        event
    }

    pub fn end_event(&self, id: Uuid) -> Option<GameEvent> {
        let ended = self
            .events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if let Some(event) = &ended {
            info!(event_id = %event.id, kind = %event.kind, "event ended");
        }
        ended
    }

    pub fn active_events(&self) -> Vec<GameEvent> {
        self.active_events_at(Utc::now())
    }

    /// Events running at `now`, oldest first.
    pub fn active_events_at(&self, now: DateTime<Utc>) -> Vec<GameEvent> {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        let mut active: Vec<GameEvent> = events
            .values()
            .filter(|event| event.is_active_at(now))
            .cloned()
            .collect();
        active.sort_by_key(|event| event.starts_at);
        active
    }

    pub fn is_active_at(&self, kind: EventKind, now: DateTime<Utc>) -> bool {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .any(|event| event.kind == kind && event.is_active_at(now))
    }

    /// Drop every event that has ended by `now`. Returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        let before = events.len();
        events.retain(|_, event| event.ends_at > now);
        before - events.len()
    }

    /// Freeze the multipliers in force at `now`.
    pub fn modifiers_at(&self, now: DateTime<Utc>) -> FixedModifiers {
        let active = |kind| self.is_active_at(kind, now);
        FixedModifiers {
            xp: if active(EventKind::DoubleXp) { 2.0 } else { 1.0 },
            capture_rate: if active(EventKind::LuckyDay) { 1.5 } else { 1.0 },
            stat_boost: if active(EventKind::StatBoost) { 1.10 } else { 1.0 },
            evolution_level_reduction: if active(EventKind::EvolutionFest) { 5 } else { 0 },
            shiny_rate: if active(EventKind::ShinyHunt) {
                EVENT_SHINY_RATE
            } else {
                BASE_SHINY_RATE
            },
            rarity_boost: if active(EventKind::RareEncounter) { 2.0 } else { 1.0 },
        }
    }
}

impl EventModifiers for EventManager {
    fn xp_multiplier(&self) -> f64 {
        self.modifiers_at(Utc::now()).xp
    }

    fn capture_rate_multiplier(&self) -> f64 {
        self.modifiers_at(Utc::now()).capture_rate
    }

    fn stat_boost_multiplier(&self) -> f64 {
        self.modifiers_at(Utc::now()).stat_boost
    }

    fn evolution_level_reduction(&self) -> u16 {
        self.modifiers_at(Utc::now()).evolution_level_reduction
    }

    fn shiny_rate(&self) -> f64 {
        self.modifiers_at(Utc::now()).shiny_rate
    }

    fn rarity_boost(&self) -> f64 {
        self.modifiers_at(Utc::now()).rarity_boost
    }
}
