//! Battle snapshots for hosts that persist encounters between actions.
//!
//! The binary form is compact postcard; JSON is for inspection and debugging.
//! Event modifiers and the RNG are not part of a snapshot and must be supplied
//! again on restore.

use crate::battle::state::{Battle, BattleRng};
use crate::errors::SnapshotError;
use crate::event_modifiers::EventModifiers;
use std::sync::Arc;
use tracing::debug;

pub fn encode_battle(battle: &Battle) -> Result<Vec<u8>, SnapshotError> {
    let bytes = postcard::to_allocvec(battle)?;
    debug!(battle_id = %battle.battle_id, size = bytes.len(), "battle encoded");
    Ok(bytes)
}

/// Restore a battle and re-attach its collaborators. Snapshots whose indices
/// no longer line up with the party are refused.
pub fn decode_battle(
    bytes: &[u8],
    modifiers: Arc<dyn EventModifiers>,
    rng: BattleRng,
) -> Result<Battle, SnapshotError> {
    let mut battle: Battle = postcard::from_bytes(bytes)?;
    battle.reattach(modifiers, rng);
    battle.check_consistency()?;
    Ok(battle)
}

pub fn battle_to_json(battle: &Battle) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(battle)?)
}

pub fn battle_from_json(
    json: &str,
    modifiers: Arc<dyn EventModifiers>,
    rng: BattleRng,
) -> Result<Battle, SnapshotError> {
    let mut battle: Battle = serde_json::from_str(json)?;
    battle.reattach(modifiers, rng);
    battle.check_consistency()?;
    Ok(battle)
}
