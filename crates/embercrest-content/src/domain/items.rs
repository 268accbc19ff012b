//! Item templates, rolled affixes and item instances.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attributes::PrimaryStats;

/// Item rarity. Also names the essence tier an item consumes and yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Common.
    Common,
    /// Uncommon.
    Uncommon,
    /// Rare.
    Rare,
    /// Epic.
    Epic,
    /// Legendary.
    Legendary,
}

impl Rarity {
    /// All rarities, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Multiplier applied to the upgrade gold cost.
    #[must_use]
    pub fn upgrade_cost_multiplier(self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Uncommon => 1.5,
            Self::Rare => 2.5,
            Self::Epic => 4.0,
            Self::Legendary => 8.0,
        }
    }
}

/// The slot an item template is designed for.
///
/// Rings are generic here; the equipment resolver picks a concrete ring slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    /// Helmets.
    Head,
    /// Amulets.
    Neck,
    /// Body armor.
    Chest,
    /// Gloves.
    Hands,
    /// Leg armor.
    Legs,
    /// Boots.
    Feet,
    /// Either ring slot.
    Ring,
    /// One-handed weapons.
    MainHand,
    /// Shields and off-hand foci.
    OffHand,
    /// Two-handed weapons.
    TwoHand,
}

/// Display grouping of an item template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Weapons of any handedness.
    Weapon,
    /// Off-hand items.
    Shield,
    /// Wearable armor pieces.
    Armor,
    /// Rings and amulets.
    Jewelry,
}

impl From<ItemSlot> for ItemCategory {
    fn from(slot: ItemSlot) -> Self {
        match slot {
            ItemSlot::MainHand | ItemSlot::TwoHand => Self::Weapon,
            ItemSlot::OffHand => Self::Shield,
            ItemSlot::Ring | ItemSlot::Neck => Self::Jewelry,
            ItemSlot::Head | ItemSlot::Chest | ItemSlot::Hands | ItemSlot::Legs | ItemSlot::Feet => {
                Self::Armor
            }
        }
    }
}

/// Combat-relevant bonuses granted by a template or a rolled affix.
///
/// All fields default to zero so catalog documents only list what they grant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatBonuses {
    /// Flat primary attribute bonuses.
    pub stats: PrimaryStats,
    /// Added to minimum physical damage.
    pub min_damage: i32,
    /// Added to maximum physical damage.
    pub max_damage: i32,
    /// Added to minimum magic damage.
    pub min_magic_damage: i32,
    /// Added to maximum magic damage.
    pub max_magic_damage: i32,
    /// Flat armor.
    pub armor: i32,
    /// Flat maximum health.
    pub max_health: i32,
    /// Crit chance, in percent.
    pub crit_chance: f64,
    /// Added to the crit damage modifier, in percent.
    pub crit_damage_modifier: i32,
    /// Armor ignored on hit.
    pub armor_penetration: i32,
    /// Share of damage returned as health, in percent.
    pub life_steal_percent: f64,
    /// Share of damage returned as mana, in percent.
    pub mana_steal_percent: f64,
    /// Health returned per hit.
    pub life_steal_flat: i32,
    /// Mana returned per hit.
    pub mana_steal_flat: i32,
    /// Dodge chance, in percent.
    pub dodge_chance: f64,
    /// Extra attacks per round.
    pub attacks_per_round_bonus: f64,
}

impl CombatBonuses {
    /// Whether any magic damage is granted.
    #[must_use]
    pub fn has_magic_damage(&self) -> bool {
        self.min_magic_damage > 0 || self.max_magic_damage > 0
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Slot the item is worn in.
    pub slot: ItemSlot,
    /// Display grouping.
    pub category: ItemCategory,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Base gold value.
    #[serde(default)]
    pub value: u64,
    /// Bonuses before upgrade scaling.
    #[serde(default)]
    pub bonuses: CombatBonuses,
    /// Attacks per round for weapons. Absent means one.
    #[serde(default)]
    pub attacks_per_round: Option<f64>,
    /// Mana spent per attack for magical weapons.
    #[serde(default)]
    pub mana_cost: Option<i32>,
    /// Minimum character level.
    #[serde(default)]
    pub required_level: u32,
    /// Minimum total attributes.
    #[serde(default)]
    pub required_stats: PrimaryStats,
}

impl ItemTemplate {
    /// Creates a template with no bonuses, no requirements and zero value.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, slot: ItemSlot, rarity: Rarity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot,
            category: ItemCategory::from(slot),
            rarity,
            value: 0,
            bonuses: CombatBonuses::default(),
            attacks_per_round: None,
            mana_cost: None,
            required_level: 0,
            required_stats: PrimaryStats::default(),
        }
    }

    /// A weapon is magical when it grants magic damage.
    #[must_use]
    pub fn is_magical(&self) -> bool {
        self.bonuses.has_magic_damage()
    }
}

/// Whether an affix goes before or after the item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixKind {
    /// Shown before the base name.
    Prefix,
    /// Shown after the base name.
    Suffix,
}

/// Catalog definition of an affix. Display metadata only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affix {
    /// Catalog identifier.
    pub id: String,
    /// Display name, e.g. "Vicious" or "of the Bear".
    pub name: String,
    /// Prefix or suffix.
    pub kind: AffixKind,
}

/// A frozen affix roll attached to an item instance at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledAffixStats {
    /// The affix this roll came from.
    pub affix_id: String,
    /// Prefix or suffix.
    pub kind: AffixKind,
    /// Resolved bonuses.
    #[serde(default)]
    pub bonuses: CombatBonuses,
}

/// A concrete item owned by a character or a trader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    /// Unique per item; never shared between two instances.
    pub unique_id: Uuid,
    /// The catalog template.
    pub template_id: String,
    /// Upgrade level, 0 up to the configured maximum.
    #[serde(default)]
    pub upgrade_level: u8,
    /// Rolled prefix, if any.
    #[serde(default)]
    pub prefix: Option<RolledAffixStats>,
    /// Rolled suffix, if any.
    #[serde(default)]
    pub suffix: Option<RolledAffixStats>,
}

impl ItemInstance {
    /// Creates an unaffixed, unupgraded instance with a fresh id.
    #[must_use]
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            unique_id: Uuid::new_v4(),
            template_id: template_id.into(),
            upgrade_level: 0,
            prefix: None,
            suffix: None,
        }
    }

    /// Returns the instance with `upgrade_level` set.
    #[must_use]
    pub fn with_upgrade_level(mut self, upgrade_level: u8) -> Self {
        self.upgrade_level = upgrade_level;
        self
    }

    /// Returns the instance with a rolled prefix attached.
    #[must_use]
    pub fn with_prefix(mut self, prefix: RolledAffixStats) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Returns the instance with a rolled suffix attached.
    #[must_use]
    pub fn with_suffix(mut self, suffix: RolledAffixStats) -> Self {
        self.suffix = Some(suffix);
        self
    }

    /// Rolled affixes, prefix first.
    pub fn affixes(&self) -> impl Iterator<Item = &RolledAffixStats> {
        self.prefix.iter().chain(self.suffix.iter())
    }

    /// Scaling applied to flat template bonuses: 10% per upgrade level.
    #[must_use]
    pub fn upgrade_factor(&self) -> f64 {
        f64::from(self.upgrade_level) * 0.1
    }
}
