use crate::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// One of the five creature classes. Drives base stats, growth and ability pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum Archetype {
    Hacker,
    Tank,
    Speedy,
    Support,
    Mage,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Archetype {
    /// Every archetype fights with the element of the same name.
    pub fn primary_type(self) -> ElementType {
        match self {
            Archetype::Hacker => ElementType::Hacker,
            Archetype::Tank => ElementType::Tank,
            Archetype::Speedy => ElementType::Speedy,
            Archetype::Support => ElementType::Support,
            Archetype::Mage => ElementType::Mage,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, EnumIter,
)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Rarity {
    pub fn stat_multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.15,
            Rarity::Rare => 1.3,
            Rarity::Epic => 1.5,
            Rarity::Legendary => 1.8,
        }
    }

    pub fn xp_multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.2,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
        }
    }

    /// Fraction removed from the capture chance. Rarer creatures resist the net.
    pub fn capture_penalty(self) -> f64 {
        match self {
            Rarity::Common => 0.0,
            Rarity::Uncommon => 0.1,
            Rarity::Rare => 0.2,
            Rarity::Epic => 0.3,
            Rarity::Legendary => 0.4,
        }
    }

    /// Map a complexity score to its tier.
    pub fn from_complexity(score: u8) -> Self {
        match score {
            0..=2 => Rarity::Common,
            3..=4 => Rarity::Uncommon,
            5..=6 => Rarity::Rare,
            7..=8 => Rarity::Epic,
            _ => Rarity::Legendary,
        }
    }

    /// Inclusive complexity band for this tier.
    pub fn complexity_range(self) -> (u8, u8) {
        match self {
            Rarity::Common => (1, 2),
            Rarity::Uncommon => (3, 4),
            Rarity::Rare => (5, 6),
            Rarity::Epic => (7, 8),
            Rarity::Legendary => (9, 10),
        }
    }

    /// Wild encounter distribution: 60/25/10/4/1 percent for a roll in 1..=100.
    pub fn from_wild_roll(roll: u8) -> Self {
        match roll {
            0..=60 => Rarity::Common,
            61..=85 => Rarity::Uncommon,
            86..=95 => Rarity::Rare,
            96..=99 => Rarity::Epic,
            _ => Rarity::Legendary,
        }
    }

    /// The tier above this one, capped at Legendary.
    pub fn next_tier(self) -> Self {
        match self {
            Rarity::Common => Rarity::Uncommon,
            Rarity::Uncommon => Rarity::Rare,
            Rarity::Rare => Rarity::Epic,
            Rarity::Epic | Rarity::Legendary => Rarity::Legendary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(0, Rarity::Common)]
    #[case(2, Rarity::Common)]
    #[case(3, Rarity::Uncommon)]
    #[case(6, Rarity::Rare)]
    #[case(8, Rarity::Epic)]
    #[case(9, Rarity::Legendary)]
    #[case(15, Rarity::Legendary)]
    fn test_complexity_to_rarity(#[case] score: u8, #[case] expected: Rarity) {
        assert_eq!(Rarity::from_complexity(score), expected);
    }

    #[test]
    fn test_complexity_range_round_trips_through_from_complexity() {
        for rarity in Rarity::iter() {
            let (low, high) = rarity.complexity_range();
            assert_eq!(Rarity::from_complexity(low), rarity);
            assert_eq!(Rarity::from_complexity(high), rarity);
        }
    }

    #[rstest]
    #[case(1, Rarity::Common)]
    #[case(60, Rarity::Common)]
    #[case(61, Rarity::Uncommon)]
    #[case(85, Rarity::Uncommon)]
    #[case(95, Rarity::Rare)]
    #[case(99, Rarity::Epic)]
    #[case(100, Rarity::Legendary)]
    fn test_wild_roll_distribution(#[case] roll: u8, #[case] expected: Rarity) {
        assert_eq!(Rarity::from_wild_roll(roll), expected);
    }

    #[test]
    fn test_next_tier_caps_at_legendary() {
        assert_eq!(Rarity::Common.next_tier(), Rarity::Uncommon);
        assert_eq!(Rarity::Legendary.next_tier(), Rarity::Legendary);
    }
}
