//! Battle tuning loaded from RON.
//!
//! Every fixed probability the turn state machine rolls against lives here so
//! hosts can rebalance encounters without a rebuild. A partial file only
//! overrides the fields it names.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Percent chance a sleeping combatant wakes at the start of its turn.
    pub wake_chance: u8,
    /// Percent chance a paralyzed combatant loses its turn.
    pub full_paralysis_chance: u8,
    /// Percent chance a confused combatant hits itself instead of fighting.
    pub confusion_chance: u8,
    /// Percent chance the player gets away when running.
    pub escape_chance: u8,
    pub capture_floor: f64,
    pub capture_ceiling: f64,
    /// XP granted per enemy level before rarity and event multipliers.
    pub xp_per_enemy_level: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            wake_chance: 30,
            full_paralysis_chance: 25,
            confusion_chance: 33,
            escape_chance: 70,
            capture_floor: 0.05,
            capture_ceiling: 0.90,
            xp_per_enemy_level: 10,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let chances = [
            ("wake_chance", self.wake_chance),
            ("full_paralysis_chance", self.full_paralysis_chance),
            ("confusion_chance", self.confusion_chance),
            ("escape_chance", self.escape_chance),
        ];
        for (name, value) in chances {
            if value > 100 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a percentage, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.capture_floor)
            || !(0.0..=1.0).contains(&self.capture_ceiling)
        {
            return Err(ConfigError::Validation(
                "capture bounds must lie within 0.0..=1.0".to_string(),
            ));
        }
        if self.capture_floor > self.capture_ceiling {
            return Err(ConfigError::Validation(format!(
                "capture_floor {} exceeds capture_ceiling {}",
                self.capture_floor, self.capture_ceiling
            )));
        }
        Ok(())
    }
}
