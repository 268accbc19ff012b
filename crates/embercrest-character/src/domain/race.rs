//! Playable races and their flat modifiers.

use serde::{Deserialize, Serialize};

/// Playable race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    /// No racial modifier.
    Human,
    /// Bonus mana regeneration.
    Elf,
    /// Bonus armor.
    Dwarf,
}

/// Flat bonuses a race adds on top of the derived statline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RacialModifiers {
    /// Flat armor.
    pub armor: i32,
    /// Flat mana regeneration.
    pub mana_regen: i32,
}

impl RacialModifiers {
    /// No modifier at all.
    pub const NONE: Self = Self {
        armor: 0,
        mana_regen: 0,
    };
}

const RACIAL_MODIFIERS: &[(Race, RacialModifiers)] = &[
    (Race::Human, RacialModifiers::NONE),
    (
        Race::Elf,
        RacialModifiers {
            mana_regen: 10,
            ..RacialModifiers::NONE
        },
    ),
    (
        Race::Dwarf,
        RacialModifiers {
            armor: 5,
            ..RacialModifiers::NONE
        },
    ),
];

impl Race {
    /// Looks up this race's modifiers. Races absent from the table get none.
    #[must_use]
    pub fn modifiers(self) -> RacialModifiers {
        RACIAL_MODIFIERS
            .iter()
            .find(|(race, _)| *race == self)
            .map_or(RacialModifiers::NONE, |(_, modifiers)| *modifiers)
    }
}
