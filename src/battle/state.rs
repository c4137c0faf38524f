use crate::combatant::Combatant;
use crate::config::BattleConfig;
use crate::errors::{BattleResult, BattleStateError};
use crate::event_modifiers::{EventModifiers, FixedModifiers};
use crate::progression::ParticipationTracker;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{AbilityId, StatusKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    Active,
    Won,
    Lost,
    Escaped,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        self != BattleStatus::Active
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOwner {
    Player,
    Enemy,
}

/// The four things a player can do on their turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Fight { ability_index: usize },
    Swap { party_index: usize },
    Run,
    ThrowNet,
}

/// Why a submitted action was refused before anything happened.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ActionRejection {
    BattleOver,
    NotYourTurn,
    InvalidAbility(usize),
    InvalidPartyMember(usize),
    TargetFainted { name: String },
    AlreadyActive { name: String },
}

impl fmt::Display for ActionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionRejection::BattleOver => write!(f, "Battle is already over!"),
            ActionRejection::NotYourTurn => write!(f, "It's not your turn!"),
            ActionRejection::InvalidAbility(_) => write!(f, "Invalid ability!"),
            ActionRejection::InvalidPartyMember(_) => write!(f, "Invalid party member!"),
            ActionRejection::TargetFainted { name } => {
                write!(f, "{} is fainted and can't battle!", name)
            }
            ActionRejection::AlreadyActive { name } => {
                write!(f, "{} is already in battle!", name)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsParalyzed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Encounter
    WildAppeared {
        name: String,
    },
    TurnPassed {
        to: TurnOwner,
    },

    // Abilities
    AbilityUsed {
        user: String,
        ability: AbilityId,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    MultiHit {
        target: String,
        hits: u8,
        total_damage: u16,
    },
    Backfired {
        user: String,
        damage: u16,
    },
    RecoilDamage {
        user: String,
        damage: u16,
    },
    Healed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    AttackBlocked {
        target: String,
    },
    AbilityFailed,
    NothingHappened,
    NoAbilities {
        name: String,
    },

    // Status effects
    StatusApplied {
        target: String,
        status: StatusKind,
    },
    StatusDamage {
        target: String,
        status: StatusKind,
        damage: u16,
        remaining_hp: u16,
    },
    StatusExpired {
        target: String,
        status: StatusKind,
    },
    StatusesCleansed {
        target: String,
    },
    WokeUp {
        name: String,
    },
    ConfusionSelfHit {
        name: String,
        damage: u16,
    },
    ActionFailed {
        name: String,
        reason: ActionFailureReason,
    },

    // Party movement
    Fainted {
        name: String,
    },
    Recalled {
        name: String,
    },
    SentOut {
        name: String,
    },

    // Run and capture
    EscapeSucceeded,
    EscapeFailed,
    CaptureAttempted {
        target: String,
        chance: f64,
    },
    CaptureFailed {
        target: String,
    },
    Captured {
        target: String,
    },

    // Progression
    ExperienceGained {
        name: String,
        amount: u32,
    },
    LeveledUp {
        name: String,
        new_level: u16,
    },

    // Outcome
    ActionRejected {
        reason: ActionRejection,
    },
    BattleEnded {
        outcome: BattleStatus,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::WildAppeared { name } => Some(format!("A wild {} appeared!", name)),
            BattleEvent::TurnPassed { .. } => None,

            BattleEvent::AbilityUsed { user, ability } => {
                let name = crate::ability_data::get_ability_template(*ability)
                    .map(|template| template.name)
                    .unwrap_or("an unknown ability");
                Some(format!("{} used {}!", user, name))
            }
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m >= 2.0 => Some("It's super effective!".to_string()),
                m if m >= 1.5 => Some("It's effective!".to_string()),
                m if m <= 0.5 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::MultiHit {
                hits, total_damage, ..
            } => Some(format!(
                "Hit {} times for {} total damage!",
                hits, total_damage
            )),
            BattleEvent::Backfired { user, damage } => Some(format!(
                "But it backfired! {} took {} damage!",
                user, damage
            )),
            BattleEvent::RecoilDamage { user, damage } => {
                Some(format!("{} took {} recoil damage!", user, damage))
            }
            BattleEvent::Healed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::AttackBlocked { target } => {
                Some(format!("{} was protected from the attack!", target))
            }
            BattleEvent::AbilityFailed => Some("But it failed!".to_string()),
            BattleEvent::NothingHappened => Some("But nothing happened!".to_string()),
            BattleEvent::NoAbilities { name } => Some(format!("{} has no abilities!", name)),

            BattleEvent::StatusApplied { target, status } => {
                Some(Self::format_status_applied(target, *status))
            }
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by {}! ({} damage)",
                target,
                Self::format_status_source(*status),
                damage
            )),
            BattleEvent::StatusExpired { target, status } => {
                Some(Self::format_status_expired(target, *status))
            }
            BattleEvent::StatusesCleansed { target } => {
                Some(format!("{}'s status effects were cleared!", target))
            }
            BattleEvent::WokeUp { name } => Some(format!("{} woke up!", name)),
            BattleEvent::ConfusionSelfHit { name, damage } => Some(format!(
                "{} is confused! It hurt itself in confusion for {} damage!",
                name, damage
            )),
            BattleEvent::ActionFailed { name, reason } => {
                Some(format!("{} {}", name, Self::format_action_failure_reason(reason)))
            }

            BattleEvent::Fainted { name } => Some(format!("{} was defeated!", name)),
            BattleEvent::Recalled { name } => Some(format!("{}, come back!", name)),
            BattleEvent::SentOut { name } => Some(format!("Go, {}!", name)),

            BattleEvent::EscapeSucceeded => Some("Got away safely!".to_string()),
            BattleEvent::EscapeFailed => Some("Couldn't escape!".to_string()),
            BattleEvent::CaptureAttempted { .. } => None,
            BattleEvent::CaptureFailed { target } => Some(format!("{} broke free!", target)),
            BattleEvent::Captured { target } => {
                Some(format!("Successfully captured {}!", target))
            }

            BattleEvent::ExperienceGained { name, amount } => {
                Some(format!("{} gained {} XP!", name, amount))
            }
            BattleEvent::LeveledUp { name, new_level } => {
                Some(format!("{} leveled up to level {}!", name, new_level))
            }

            BattleEvent::ActionRejected { reason } => Some(reason.to_string()),
            BattleEvent::BattleEnded { .. } => None,
        }
    }

    fn format_status_applied(target: &str, status: StatusKind) -> String {
        if let Some((stat, _)) = status.stat_modifier() {
            let direction = if status.is_stat_boost() { "rose" } else { "fell" };
            return format!("{}'s {} {}!", target, stat, direction);
        }
        let text = match status {
            StatusKind::Burn => "was burned!",
            StatusKind::Poison => "was poisoned!",
            StatusKind::Paralysis => "was paralyzed!",
            StatusKind::Sleep => "fell asleep!",
            StatusKind::Confusion => "became confused!",
            _ => "is protecting itself!",
        };
        format!("{} {}", target, text)
    }

    fn format_status_source(status: StatusKind) -> &'static str {
        match status {
            StatusKind::Burn => "its burn",
            StatusKind::Poison => "poison",
            _ => "its condition",
        }
    }

    fn format_status_expired(target: &str, status: StatusKind) -> String {
        if let Some((stat, _)) = status.stat_modifier() {
            return format!("{}'s {} returned to normal.", target, stat);
        }
        let text = match status {
            StatusKind::Burn => "is no longer burned.",
            StatusKind::Poison => "is no longer poisoned.",
            StatusKind::Paralysis => "can move freely again!",
            StatusKind::Sleep => "woke up!",
            StatusKind::Confusion => "snapped out of confusion!",
            _ => "is no longer protected.",
        };
        format!("{} {}", target, text)
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> &'static str {
        match reason {
            ActionFailureReason::IsAsleep => "is fast asleep!",
            ActionFailureReason::IsParalyzed => "is paralyzed! It can't move!",
        }
    }
}

/// Event bus for collecting the events of one resolved action.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = BattleEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Human-readable text of every non-silent event, in order.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    /// Shows debug format of all events.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Source of every random draw in a battle.
///
/// Test RNGs replay a script of outcomes in 1..=100 and panic when it runs
/// dry. Seeded RNGs draw from `StdRng`.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u8>, index: usize },
    Seeded(StdRng),
}

impl Default for BattleRng {
    fn default() -> Self {
        Self::new_random()
    }
}

impl BattleRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// Next percentile outcome in 1..=100.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                outcome
            }
            RngSource::Seeded(rng) => rng.random_range(1..=100),
        };
        trace!(outcome, reason, "rng consumed");
        outcome
    }

    /// True when the outcome lands at or under `percent`.
    pub fn chance(&mut self, percent: u8, reason: &str) -> bool {
        self.next_outcome(reason) <= percent
    }

    /// Like `chance` for a probability in 0.0..=1.0.
    pub fn roll_probability(&mut self, probability: f64, reason: &str) -> bool {
        f64::from(self.next_outcome(reason)) <= probability * 100.0
    }

    /// Uniform value in `low..=high`. An empty span returns `low` without a draw.
    pub fn next_in_range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        if high <= low {
            return low;
        }
        if let RngSource::Seeded(rng) = &mut self.source {
            let value = rng.random_range(low..=high);
            trace!(value, reason, "rng consumed");
            return value;
        }
        low + u32::from(self.next_outcome(reason)) % (high - low + 1)
    }

    /// Index into a collection of `len` items.
    pub fn next_index(&mut self, len: usize, reason: &str) -> usize {
        if len <= 1 {
            return 0;
        }
        if let RngSource::Seeded(rng) = &mut self.source {
            let value = rng.random_range(0..len);
            trace!(value, reason, "rng consumed");
            return value;
        }
        usize::from(self.next_outcome(reason)) % len
    }

    /// Damage variance factor in roughly 0.9..=1.1. A scripted 50 is exactly 1.0.
    pub fn jitter(&mut self, reason: &str) -> f64 {
        if let RngSource::Seeded(rng) = &mut self.source {
            let value = rng.random_range(0.9..=1.1);
            trace!(value, reason, "rng consumed");
            return value;
        }
        1.0 + (f64::from(self.next_outcome(reason)) - 50.0) / 500.0
    }

    /// Fraction in 0.0..1.0, for odds finer than one percent.
    pub fn next_fraction(&mut self, reason: &str) -> f64 {
        if let RngSource::Seeded(rng) = &mut self.source {
            let value: f64 = rng.random();
            trace!(value, reason, "rng consumed");
            return value;
        }
        f64::from(self.next_outcome(reason).saturating_sub(1)) / 100.0
    }
}

fn neutral_modifiers() -> Arc<dyn EventModifiers> {
    Arc::new(FixedModifiers::default())
}

/// One encounter between the player's party and a wild combatant.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Battle {
    pub battle_id: String,
    pub(crate) party: Vec<Combatant>,
    pub(crate) active_index: usize,
    pub(crate) enemy: Combatant,
    pub(crate) participants: ParticipationTracker,
    pub(crate) turn_owner: TurnOwner,
    pub(crate) status: BattleStatus,
    pub(crate) captured: bool,
    pub(crate) log: Vec<String>,
    pub(crate) config: BattleConfig,
    #[serde(skip, default = "neutral_modifiers")]
    pub(crate) modifiers: Arc<dyn EventModifiers>,
    #[serde(skip)]
    pub(crate) rng: BattleRng,
}

impl Battle {
    /// Start an encounter. `party` is the player's full reserve and
    /// `active_index` picks who leads. Any active stat-boost event is applied
    /// to every combatant here.
    pub fn new(
        battle_id: impl Into<String>,
        party: Vec<Combatant>,
        active_index: usize,
        enemy: Combatant,
        modifiers: Arc<dyn EventModifiers>,
        rng: BattleRng,
    ) -> BattleResult<Self> {
        let lead = party
            .get(active_index)
            .ok_or(if party.is_empty() {
                BattleStateError::EmptyParty
            } else {
                BattleStateError::InvalidActiveIndex(active_index)
            })?;
        if lead.is_fainted() {
            return Err(BattleStateError::ActiveCombatantFainted(lead.name.clone()).into());
        }
        if enemy.is_fainted() {
            return Err(BattleStateError::InconsistentState(format!(
                "enemy {} is already fainted",
                enemy.name
            ))
            .into());
        }

        let mut battle = Self {
            battle_id: battle_id.into(),
            party,
            active_index,
            enemy,
            participants: ParticipationTracker::new(),
            turn_owner: TurnOwner::Player,
            status: BattleStatus::Active,
            captured: false,
            log: Vec::new(),
            config: BattleConfig::default(),
            modifiers,
            rng,
        };

        let boost = battle.modifiers.stat_boost_multiplier();
        if boost > 1.0 {
            for combatant in battle.party.iter_mut().chain(std::iter::once(&mut battle.enemy)) {
                combatant.apply_stat_boost(boost);
            }
        }

        battle.participants.record(active_index);
        if let Some(message) = (BattleEvent::WildAppeared {
            name: battle.enemy.name.clone(),
        })
        .format()
        {
            battle.log.push(message);
        }

        debug!(
            battle_id = %battle.battle_id,
            enemy = %battle.enemy.name,
            party_size = battle.party.len(),
            boost,
            "battle created"
        );
        Ok(battle)
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Re-inject the parts of a battle that are not serialized.
    pub fn reattach(&mut self, modifiers: Arc<dyn EventModifiers>, rng: BattleRng) {
        self.modifiers = modifiers;
        self.rng = rng;
    }

    /// Verify indices that a corrupted snapshot could break.
    pub fn check_consistency(&self) -> Result<(), BattleStateError> {
        if self.party.is_empty() {
            return Err(BattleStateError::EmptyParty);
        }
        if self.active_index >= self.party.len() {
            return Err(BattleStateError::InvalidActiveIndex(self.active_index));
        }
        if let Some(index) = self
            .participants
            .participants()
            .iter()
            .find(|&&index| index >= self.party.len())
        {
            return Err(BattleStateError::InconsistentState(format!(
                "participant index {} outside party of {}",
                index,
                self.party.len()
            )));
        }
        for combatant in self.party.iter().chain(std::iter::once(&self.enemy)) {
            if combatant.current_hp() > combatant.max_hp() {
                return Err(BattleStateError::InconsistentState(format!(
                    "{} has {} HP above its maximum of {}",
                    combatant.name,
                    combatant.current_hp(),
                    combatant.max_hp()
                )));
            }
            let mut seen = HashSet::new();
            if let Some(effect) = combatant
                .status_effects()
                .iter()
                .find(|effect| !seen.insert(effect.kind))
            {
                return Err(BattleStateError::InconsistentState(format!(
                    "{} carries {:?} more than once",
                    combatant.name, effect.kind
                )));
            }
        }
        Ok(())
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn turn_owner(&self) -> TurnOwner {
        self.turn_owner
    }

    pub fn active(&self) -> &Combatant {
        &self.party[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn party(&self) -> &[Combatant] {
        &self.party
    }

    /// Party indices of everyone who has been sent out, in order of first appearance.
    pub fn participants(&self) -> &[usize] {
        self.participants.participants()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// True when the battle was won by capturing the enemy.
    pub fn was_captured(&self) -> bool {
        self.captured
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn modifiers(&self) -> &dyn EventModifiers {
        self.modifiers.as_ref()
    }

    /// Hand the combatants back for write-back once the battle is over.
    pub fn into_combatants(self) -> (Vec<Combatant>, Combatant) {
        (self.party, self.enemy)
    }

    pub(crate) fn active_mut(&mut self) -> &mut Combatant {
        &mut self.party[self.active_index]
    }
}
