use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum ElementType {
    Hacker,
    Tank,
    Speedy,
    Support,
    Mage,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ElementType {
    /// Calculate type effectiveness multiplier for attacking type vs defending type
    /// Returns: 2.0 = Super Effective, 1.5 = Effective, 1.0 = Normal, 0.5 = Not Very Effective
    pub fn effectiveness(attacking: ElementType, defending: ElementType) -> f64 {
        use ElementType::*;

        match (attacking, defending) {
            // Hacker
            (Hacker, Speedy) => 2.0,
            (Hacker, Support) => 1.5,
            (Hacker, Tank) => 0.5,
            (Hacker, _) => 1.0,

            // Tank
            (Tank, Hacker) => 2.0,
            (Tank, Support) | (Tank, Mage) => 1.5,
            (Tank, Tank) | (Tank, Speedy) => 0.5,

            // Speedy
            (Speedy, Tank) => 2.0,
            (Speedy, Hacker) | (Speedy, Mage) => 1.5,
            (Speedy, _) => 1.0,

            // Support
            (Support, Mage) => 2.0,
            (Support, Tank) => 1.5,
            (Support, Support) => 0.5,
            (Support, _) => 1.0,

            // Mage
            (Mage, Hacker) | (Mage, Speedy) => 1.5,
            (Mage, Support) => 0.5,
            (Mage, _) => 1.0,
        }
    }

    /// Effectiveness when either side may carry a secondary type.
    ///
    /// One dual-typed side averages the two lookups against the lone opposing
    /// type. Two dual-typed sides take the best of all four pairings.
    pub fn dual_effectiveness(
        attacker_primary: ElementType,
        attacker_secondary: Option<ElementType>,
        defender_primary: ElementType,
        defender_secondary: Option<ElementType>,
    ) -> f64 {
        let single = Self::effectiveness;

        match (attacker_secondary, defender_secondary) {
            (None, None) => single(attacker_primary, defender_primary),
            (Some(attacker_secondary), None) => {
                (single(attacker_primary, defender_primary)
                    + single(attacker_secondary, defender_primary))
                    / 2.0
            }
            (None, Some(defender_secondary)) => {
                (single(attacker_primary, defender_primary)
                    + single(attacker_primary, defender_secondary))
                    / 2.0
            }
            (Some(attacker_secondary), Some(defender_secondary)) => [
                (attacker_primary, defender_primary),
                (attacker_primary, defender_secondary),
                (attacker_secondary, defender_primary),
                (attacker_secondary, defender_secondary),
            ]
            .into_iter()
            .map(|(attacking, defending)| OrderedFloat(single(attacking, defending)))
            .max()
            .map_or(1.0, OrderedFloat::into_inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ElementType::{self, *};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(Tank, Hacker, 2.0)]
    #[case(Hacker, Tank, 0.5)]
    #[case(Hacker, Speedy, 2.0)]
    #[case(Speedy, Hacker, 1.5)]
    #[case(Support, Mage, 2.0)]
    #[case(Mage, Support, 0.5)]
    #[case(Speedy, Tank, 2.0)]
    #[case(Tank, Speedy, 0.5)]
    fn test_known_asymmetric_pairs(
        #[case] attacking: ElementType,
        #[case] defending: ElementType,
        #[case] expected: f64,
    ) {
        assert_eq!(ElementType::effectiveness(attacking, defending), expected);
    }

    #[test]
    fn test_mirror_matchups() {
        assert_eq!(ElementType::effectiveness(Hacker, Hacker), 1.0);
        assert_eq!(ElementType::effectiveness(Speedy, Speedy), 1.0);
        assert_eq!(ElementType::effectiveness(Mage, Mage), 1.0);
        assert_eq!(ElementType::effectiveness(Tank, Tank), 0.5);
        assert_eq!(ElementType::effectiveness(Support, Support), 0.5);
    }

    #[test]
    fn test_every_pairing_is_a_known_multiplier() {
        for attacking in ElementType::iter() {
            for defending in ElementType::iter() {
                let value = ElementType::effectiveness(attacking, defending);
                assert!(
                    [0.5, 1.0, 1.5, 2.0].contains(&value),
                    "{attacking} vs {defending} gave {value}"
                );
            }
        }
    }

    #[test]
    fn test_single_dual_attacker_averages() {
        // Hacker vs Tank = 0.5, Tank vs Tank = 0.5
        assert_eq!(ElementType::dual_effectiveness(Hacker, Some(Tank), Tank, None), 0.5);
        // Hacker vs Speedy = 2.0, Mage vs Speedy = 1.5
        assert_eq!(ElementType::dual_effectiveness(Hacker, Some(Mage), Speedy, None), 1.75);
    }

    #[test]
    fn test_single_dual_defender_averages() {
        // Tank vs Hacker = 2.0, Tank vs Speedy = 0.5
        assert_eq!(ElementType::dual_effectiveness(Tank, None, Hacker, Some(Speedy)), 1.25);
    }

    #[test]
    fn test_both_dual_takes_best_pairing() {
        // Pairings: Hacker/Tank 0.5, Hacker/Mage 1.0, Support/Tank 1.5, Support/Mage 2.0
        let value = ElementType::dual_effectiveness(Hacker, Some(Support), Tank, Some(Mage));
        assert_eq!(value, 2.0);

        // The average of the same pairings would be 1.25
        assert!(value > 1.25);
    }

    #[test]
    fn test_dual_with_no_secondaries_matches_single() {
        for attacking in ElementType::iter() {
            for defending in ElementType::iter() {
                assert_eq!(
                    ElementType::dual_effectiveness(attacking, None, defending, None),
                    ElementType::effectiveness(attacking, defending)
                );
            }
        }
    }
}
