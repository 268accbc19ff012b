//! The six allocatable primary attributes.

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Names one of the six primary attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Drives physical damage.
    Strength,
    /// Drives dodge chance.
    Agility,
    /// Drives crit chance.
    Accuracy,
    /// Drives max health.
    Stamina,
    /// Drives max mana, mana regen and magic damage.
    Intelligence,
    /// Drives max energy.
    Energy,
}

impl Attribute {
    /// All attributes, in display order.
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Agility,
        Self::Accuracy,
        Self::Stamina,
        Self::Intelligence,
        Self::Energy,
    ];
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Strength => "strength",
            Self::Agility => "agility",
            Self::Accuracy => "accuracy",
            Self::Stamina => "stamina",
            Self::Intelligence => "intelligence",
            Self::Energy => "energy",
        };
        f.write_str(name)
    }
}

/// A value for each primary attribute.
///
/// Used for a character's base attributes, for item stat bonuses and for
/// item attribute requirements (zero meaning "no requirement").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryStats {
    /// Strength.
    pub strength: i32,
    /// Agility.
    pub agility: i32,
    /// Accuracy.
    pub accuracy: i32,
    /// Stamina.
    pub stamina: i32,
    /// Intelligence.
    pub intelligence: i32,
    /// Energy.
    pub energy: i32,
}

impl PrimaryStats {
    /// Returns the value of `attribute`.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Accuracy => self.accuracy,
            Attribute::Stamina => self.stamina,
            Attribute::Intelligence => self.intelligence,
            Attribute::Energy => self.energy,
        }
    }

    /// Returns a mutable reference to the value of `attribute`.
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Accuracy => &mut self.accuracy,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Energy => &mut self.energy,
        }
    }

    /// Applies `f` to every attribute value.
    #[must_use]
    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self {
            strength: f(self.strength),
            agility: f(self.agility),
            accuracy: f(self.accuracy),
            stamina: f(self.stamina),
            intelligence: f(self.intelligence),
            energy: f(self.energy),
        }
    }

    /// Sum of all six values.
    #[must_use]
    pub fn total(&self) -> i64 {
        Attribute::ALL
            .iter()
            .map(|a| i64::from(self.get(*a)))
            .sum()
    }
}

impl Add for PrimaryStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            strength: self.strength + rhs.strength,
            agility: self.agility + rhs.agility,
            accuracy: self.accuracy + rhs.accuracy,
            stamina: self.stamina + rhs.stamina,
            intelligence: self.intelligence + rhs.intelligence,
            energy: self.energy + rhs.energy,
        }
    }
}

impl AddAssign for PrimaryStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
