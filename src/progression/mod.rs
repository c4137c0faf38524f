pub mod evolution;
pub mod leveling;
pub mod participation;

pub use evolution::{can_evolve, check_and_evolve, evolution_level, Evolution, MAX_EVOLUTION_STAGE};
pub use leveling::{xp_needed, LevelUp};
pub use participation::ParticipationTracker;

use crate::combatant::Combatant;
use tracing::info;

/// True when the party has members and every one of them is fainted.
pub fn is_blacked_out(party: &[Combatant]) -> bool {
    !party.is_empty() && party.iter().all(Combatant::is_fainted)
}

/// Restore a wiped-out party to full HP with no lingering effects.
/// Returns false, leaving the party untouched, if anyone is still standing.
pub fn recover_from_blackout(party: &mut [Combatant]) -> bool {
    if !is_blacked_out(party) {
        return false;
    }
    for combatant in party.iter_mut() {
        combatant.full_restore();
    }
    info!(party_size = party.len(), "party recovered from blackout");
    true
}
