use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// The stat a modifier status acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum StatType {
    Attack,
    Defense,
    Speed,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Attack => write!(f, "attack"),
            StatType::Defense => write!(f, "defense"),
            StatType::Speed => write!(f, "speed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum StatusKind {
    Burn,
    Poison,
    Confusion,
    Paralysis,
    Sleep,
    AttackUp,
    AttackDown,
    DefenseUp,
    DefenseDown,
    SpeedUp,
    SpeedDown,
    Protect,
}

impl StatusKind {
    /// Multiplier applied to one stat while this status is active.
    /// Up kinds give x1.5 and Down kinds give x0.75.
    pub fn stat_modifier(self) -> Option<(StatType, f64)> {
        match self {
            StatusKind::AttackUp => Some((StatType::Attack, 1.5)),
            StatusKind::AttackDown => Some((StatType::Attack, 0.75)),
            StatusKind::DefenseUp => Some((StatType::Defense, 1.5)),
            StatusKind::DefenseDown => Some((StatType::Defense, 0.75)),
            StatusKind::SpeedUp => Some((StatType::Speed, 1.5)),
            StatusKind::SpeedDown => Some((StatType::Speed, 0.75)),
            _ => None,
        }
    }

    pub fn is_stat_modifier(self) -> bool {
        self.stat_modifier().is_some()
    }

    pub fn is_stat_boost(self) -> bool {
        matches!(
            self,
            StatusKind::AttackUp | StatusKind::DefenseUp | StatusKind::SpeedUp
        )
    }

    pub fn is_damage_over_time(self) -> bool {
        matches!(self, StatusKind::Burn | StatusKind::Poison)
    }

    /// Statuses the battle checks before letting a combatant act.
    pub fn gates_action(self) -> bool {
        matches!(
            self,
            StatusKind::Confusion | StatusKind::Paralysis | StatusKind::Sleep
        )
    }
}
