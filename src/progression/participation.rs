use serde::{Deserialize, Serialize};

/// Tracks which party members have been sent out during a battle.
/// Indices are kept in order of first appearance and never removed, so a
/// member that later faints still shares the reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationTracker {
    participants: Vec<usize>,
}

impl ParticipationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the party member at `party_index` took the field.
    /// Returns true the first time an index is seen.
    pub fn record(&mut self, party_index: usize) -> bool {
        if self.participants.contains(&party_index) {
            return false;
        }
        self.participants.push(party_index);
        true
    }

    pub fn participants(&self) -> &[usize] {
        &self.participants
    }

    pub fn has_participated(&self, party_index: usize) -> bool {
        self.participants.contains(&party_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_participation_tracking() {
        let mut tracker = ParticipationTracker::new();

        assert!(tracker.record(0));
        assert!(tracker.record(2));
        // Swapping back in does not duplicate
        assert!(!tracker.record(0));

        assert_eq!(tracker.participants(), &[0, 2]);
        assert!(tracker.has_participated(2));
        assert!(!tracker.has_participated(1));
    }
}
