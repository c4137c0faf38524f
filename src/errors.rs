use schema::AbilityId;
use thiserror::Error;

/// Main error type for the Gophermon battle engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to ability template lookup
    #[error("Ability data error: {0}")]
    AbilityData(#[from] AbilityDataError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
}

/// Errors related to ability catalog lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbilityDataError {
    /// A stored template id does not name any ability
    #[error("Unknown ability template: {0}")]
    UnknownTemplate(String),
    /// The id parsed but the registry has no entry for it
    #[error("Ability template not registered: {0:?}")]
    MissingTemplate(AbilityId),
}

/// Errors related to battle construction and state consistency
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// The player brought nobody to the fight
    #[error("Player party is empty")]
    EmptyParty,
    /// The active index does not point into the party
    #[error("Invalid active party index: {0}")]
    InvalidActiveIndex(usize),
    /// A fainted combatant was put forward as the active battler
    #[error("Active combatant {0} is fainted")]
    ActiveCombatantFainted(String),
    /// Battle state is in an inconsistent or corrupted state
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Errors raised while loading a battle tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Errors raised while encoding or decoding a battle snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Binary snapshot error: {0}")]
    Binary(#[from] postcard::Error),
    #[error("JSON snapshot error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot failed consistency check: {0}")]
    Inconsistent(#[from] BattleStateError),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using AbilityDataError
pub type AbilityDataResult<T> = Result<T, AbilityDataError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_errors_convert_and_display() {
        let err: BattleEngineError = AbilityDataError::UnknownTemplate("warp_drive".into()).into();
        assert_eq!(
            err.to_string(),
            "Ability data error: Unknown ability template: warp_drive"
        );

        let err: BattleEngineError = BattleStateError::InvalidActiveIndex(4).into();
        assert_eq!(
            err.to_string(),
            "Battle state error: Invalid active party index: 4"
        );
    }
}
