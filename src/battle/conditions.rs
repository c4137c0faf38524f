use crate::battle::state::BattleEvent;
use crate::combatant::{CombatStats, Combatant};
use schema::{StatType, StatusKind};
use serde::{Deserialize, Serialize};

/// A timed condition on one combatant. At most one entry exists per kind.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Zero means the effect expires during the current processing step.
    pub turns_remaining: u8,
    /// Extra damage per tick for damage-over-time kinds.
    pub intensity: u16,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, turns_remaining: u8, intensity: u16) -> Self {
        Self {
            kind,
            turns_remaining,
            intensity,
        }
    }
}

impl Combatant {
    /// Add a status, or refresh an existing one of the same kind.
    ///
    /// A refresh replaces the duration and keeps the higher intensity. The
    /// first application of any status snapshots the base stats.
    pub fn add_status_effect(&mut self, kind: StatusKind, duration: u8, intensity: u16) {
        self.snapshot_base_stats();
        match self.status_effects.iter_mut().find(|effect| effect.kind == kind) {
            Some(existing) => {
                existing.turns_remaining = duration;
                existing.intensity = existing.intensity.max(intensity);
            }
            None => self
                .status_effects
                .push(StatusEffect::new(kind, duration, intensity)),
        }
    }

    pub fn remove_status_effect(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let index = self
            .status_effects
            .iter()
            .position(|effect| effect.kind == kind)?;
        Some(self.status_effects.remove(index))
    }

    pub fn has_status_effect(&self, kind: StatusKind) -> bool {
        self.status_effects.iter().any(|effect| effect.kind == kind)
    }

    pub fn status_effect(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.status_effects.iter().find(|effect| effect.kind == kind)
    }

    /// Rebuild attack, defense and speed from the base snapshot, every active
    /// stat modifier and the event stat boost. Truncates toward zero.
    pub fn recalculate_stats(&mut self) {
        let Some(base) = self.snapshotted_base() else {
            return;
        };

        let mut attack = f64::from(base.attack);
        let mut defense = f64::from(base.defense);
        let mut speed = f64::from(base.speed);
        for effect in &self.status_effects {
            match effect.kind.stat_modifier() {
                Some((StatType::Attack, multiplier)) => attack *= multiplier,
                Some((StatType::Defense, multiplier)) => defense *= multiplier,
                Some((StatType::Speed, multiplier)) => speed *= multiplier,
                None => {}
            }
        }

        let boost = self.stat_boost();
        self.set_live_stats(CombatStats {
            attack: to_stat(attack * boost),
            defense: to_stat(defense * boost),
            speed: to_stat(speed * boost),
        });
    }

    /// Tick every status once at the start of this combatant's turn.
    ///
    /// Durations drop by one. Burn and poison deal their damage. Anything at
    /// zero turns expires, and Protect always expires after a single pass.
    /// Sleep, paralysis and confusion only tick here; the turn logic decides
    /// whether they cost the action.
    pub fn process_status_effects_at_turn_start(&mut self) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let max_hp = self.max_hp();

        for index in 0..self.status_effects.len() {
            let effect = &mut self.status_effects[index];
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
            let StatusEffect {
                kind,
                turns_remaining,
                intensity,
            } = *effect;

            let tick_damage = match kind {
                StatusKind::Burn => Some(max_hp / 8),
                StatusKind::Poison => Some((max_hp / 16).saturating_add(intensity)),
                _ => None,
            };
            if let Some(damage) = tick_damage {
                let dealt = self.take_damage(damage);
                events.push(BattleEvent::StatusDamage {
                    target: self.name.clone(),
                    status: kind,
                    damage: dealt,
                    remaining_hp: self.current_hp(),
                });
            }

            if turns_remaining == 0 || kind == StatusKind::Protect {
                events.push(BattleEvent::StatusExpired {
                    target: self.name.clone(),
                    status: kind,
                });
            }
        }

        self.status_effects
            .retain(|effect| effect.turns_remaining > 0 && effect.kind != StatusKind::Protect);
        self.recalculate_stats();
        events
    }
}

fn to_stat(value: f64) -> u16 {
    value.clamp(0.0, f64::from(u16::MAX)) as u16
}
