//! Spending unspent attribute points.

use embercrest_content::domain::attributes::{Attribute, PrimaryStats};
use thiserror::Error;

use super::character::Character;

/// Why an allocation was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationFailure {
    /// The allocation spends nothing.
    #[error("no attribute points allocated")]
    NoPointsAllocated,

    /// Points cannot be taken back out of an attribute.
    #[error("cannot allocate a negative amount to {0}")]
    NegativeAllocation(Attribute),

    /// The allocation spends more points than the character has.
    #[error("allocation needs {requested} attribute points but only {available} are unspent")]
    InsufficientAttributePoints {
        /// Points the allocation would spend.
        requested: i64,
        /// Points the character has.
        available: u32,
    },
}

/// Returns `character` with `allocation` added to its base attributes and
/// the spent points removed from the unspent pool.
///
/// Maxima derived from attributes only grow, so current vitals stay valid.
///
/// # Errors
///
/// Returns `AllocationFailure` if the allocation is empty, negative, or
/// larger than the unspent pool.
pub fn allocate_attributes(
    character: &Character,
    allocation: &PrimaryStats,
) -> Result<Character, AllocationFailure> {
    if let Some(attribute) = Attribute::ALL
        .into_iter()
        .find(|a| allocation.get(*a) < 0)
    {
        return Err(AllocationFailure::NegativeAllocation(attribute));
    }

    let requested = allocation.total();
    if requested == 0 {
        return Err(AllocationFailure::NoPointsAllocated);
    }
    let available = character.unspent_attribute_points;
    let remaining = u32::try_from(i64::from(available) - requested).map_err(|_| {
        AllocationFailure::InsufficientAttributePoints {
            requested,
            available,
        }
    })?;

    Ok(Character {
        attributes: character.attributes + *allocation,
        unspent_attribute_points: remaining,
        ..character.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::race::Race;
    use uuid::Uuid;

    fn character_with_points(points: u32) -> Character {
        let mut character = Character::new(
            Uuid::new_v4(),
            "Oren",
            Race::Dwarf,
            PrimaryStats {
                strength: 5,
                stamina: 5,
                ..PrimaryStats::default()
            },
        );
        character.unspent_attribute_points = points;
        character
    }

    #[test]
    fn test_allocate_spends_points_and_raises_attributes() {
        let character = character_with_points(5);
        let allocation = PrimaryStats {
            strength: 2,
            stamina: 3,
            ..PrimaryStats::default()
        };

        let updated = allocate_attributes(&character, &allocation).unwrap();

        assert_eq!(updated.attributes.strength, 7);
        assert_eq!(updated.attributes.stamina, 8);
        assert_eq!(updated.unspent_attribute_points, 0);
        assert_eq!(updated.vitals, character.vitals);
    }

    #[test]
    fn test_allocate_more_than_pool_is_rejected() {
        let character = character_with_points(2);
        let allocation = PrimaryStats {
            agility: 3,
            ..PrimaryStats::default()
        };

        let result = allocate_attributes(&character, &allocation);

        assert_eq!(
            result,
            Err(AllocationFailure::InsufficientAttributePoints {
                requested: 3,
                available: 2,
            })
        );
    }

    #[test]
    fn test_allocate_nothing_is_rejected() {
        let character = character_with_points(2);
        let result = allocate_attributes(&character, &PrimaryStats::default());
        assert_eq!(result, Err(AllocationFailure::NoPointsAllocated));
    }

    #[test]
    fn test_allocate_negative_is_rejected() {
        let character = character_with_points(4);
        let allocation = PrimaryStats {
            strength: 3,
            energy: -1,
            ..PrimaryStats::default()
        };

        let result = allocate_attributes(&character, &allocation);

        assert_eq!(
            result,
            Err(AllocationFailure::NegativeAllocation(Attribute::Energy))
        );
    }
}
