//! The character snapshot.

use std::collections::BTreeMap;

use embercrest_content::domain::attributes::PrimaryStats;
use embercrest_content::domain::items::{ItemInstance, Rarity};
use embercrest_core::repository::Snapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::race::Race;
use super::stats::vital_maxima;

/// A concrete equipment slot on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    /// Helmet.
    Head,
    /// Amulet.
    Neck,
    /// Body armor.
    Chest,
    /// Gloves.
    Hands,
    /// Leg armor.
    Legs,
    /// Boots.
    Feet,
    /// First ring.
    Ring1,
    /// Second ring.
    Ring2,
    /// One-handed weapon.
    MainHand,
    /// Shield or focus.
    OffHand,
    /// Two-handed weapon.
    TwoHand,
}

/// Equipped items keyed by slot. A missing key is an empty slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Equipment(BTreeMap<EquipmentSlot, ItemInstance>);

impl Equipment {
    /// Creates an equipment set with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the item in `slot`.
    #[must_use]
    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemInstance> {
        self.0.get(&slot)
    }

    /// Returns the item in `slot` mutably.
    pub fn get_mut(&mut self, slot: EquipmentSlot) -> Option<&mut ItemInstance> {
        self.0.get_mut(&slot)
    }

    /// Whether `slot` holds an item.
    #[must_use]
    pub fn is_occupied(&self, slot: EquipmentSlot) -> bool {
        self.0.contains_key(&slot)
    }

    /// Places `item` in `slot`, returning what was there before.
    pub fn insert(&mut self, slot: EquipmentSlot, item: ItemInstance) -> Option<ItemInstance> {
        self.0.insert(slot, item)
    }

    /// Empties `slot`, returning what was there.
    pub fn remove(&mut self, slot: EquipmentSlot) -> Option<ItemInstance> {
        self.0.remove(&slot)
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &ItemInstance)> {
        self.0.iter().map(|(slot, item)| (*slot, item))
    }

    /// Slot holding the item with `unique_id`.
    #[must_use]
    pub fn slot_of(&self, unique_id: Uuid) -> Option<EquipmentSlot> {
        self.iter()
            .find(|(_, item)| item.unique_id == unique_id)
            .map(|(slot, _)| slot)
    }

    /// Whether every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Current health, mana and energy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// Current health.
    pub health: i32,
    /// Current mana.
    pub mana: i32,
    /// Current energy.
    pub energy: i32,
}

/// Essence balances, one per rarity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Essences {
    /// Common essence.
    pub common: u32,
    /// Uncommon essence.
    pub uncommon: u32,
    /// Rare essence.
    pub rare: u32,
    /// Epic essence.
    pub epic: u32,
    /// Legendary essence.
    pub legendary: u32,
}

impl Essences {
    /// Balance of the `tier` essence.
    #[must_use]
    pub fn get(&self, tier: Rarity) -> u32 {
        match tier {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }

    /// Mutable balance of the `tier` essence.
    pub fn get_mut(&mut self, tier: Rarity) -> &mut u32 {
        match tier {
            Rarity::Common => &mut self.common,
            Rarity::Uncommon => &mut self.uncommon,
            Rarity::Rare => &mut self.rare,
            Rarity::Epic => &mut self.epic,
            Rarity::Legendary => &mut self.legendary,
        }
    }
}

/// Gold and essences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currencies {
    /// Gold.
    pub gold: u64,
    /// Essence balances.
    pub essences: Essences,
}

/// Where an item currently lives on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    /// At this index of the inventory.
    Inventory(usize),
    /// In this equipment slot.
    Equipped(EquipmentSlot),
}

/// The character snapshot every gameplay action reads and replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Race.
    pub race: Race,
    /// Character level.
    pub level: u32,
    /// Experience points.
    pub experience: u64,
    /// Allocated base attributes.
    pub attributes: PrimaryStats,
    /// Attribute points not yet allocated.
    pub unspent_attribute_points: u32,
    /// Current vitals.
    pub vitals: Vitals,
    /// Equipped items.
    #[serde(default)]
    pub equipment: Equipment,
    /// Carried items, in display order.
    #[serde(default)]
    pub inventory: Vec<ItemInstance>,
    /// Gold and essences.
    #[serde(default)]
    pub currencies: Currencies,
}

impl Character {
    /// Creates a level 1 character with full vitals and nothing carried.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, race: Race, attributes: PrimaryStats) -> Self {
        Self {
            id,
            name: name.into(),
            race,
            level: 1,
            experience: 0,
            attributes,
            unspent_attribute_points: 0,
            vitals: vital_maxima(&attributes, 0),
            equipment: Equipment::new(),
            inventory: Vec::new(),
            currencies: Currencies::default(),
        }
    }

    /// Index of the inventory item with `unique_id`.
    #[must_use]
    pub fn inventory_position(&self, unique_id: Uuid) -> Option<usize> {
        self.inventory
            .iter()
            .position(|item| item.unique_id == unique_id)
    }

    /// Finds an item, searching the inventory first and then equipment slots
    /// in slot order.
    #[must_use]
    pub fn locate(&self, unique_id: Uuid) -> Option<ItemLocation> {
        self.inventory_position(unique_id)
            .map(ItemLocation::Inventory)
            .or_else(|| self.equipment.slot_of(unique_id).map(ItemLocation::Equipped))
    }

    /// Returns the item at `location`.
    #[must_use]
    pub fn item_at(&self, location: ItemLocation) -> Option<&ItemInstance> {
        match location {
            ItemLocation::Inventory(index) => self.inventory.get(index),
            ItemLocation::Equipped(slot) => self.equipment.get(slot),
        }
    }

    /// Returns the item at `location` mutably.
    pub fn item_at_mut(&mut self, location: ItemLocation) -> Option<&mut ItemInstance> {
        match location {
            ItemLocation::Inventory(index) => self.inventory.get_mut(index),
            ItemLocation::Equipped(slot) => self.equipment.get_mut(slot),
        }
    }

    /// Takes the item at `location` off the character. Later inventory
    /// items shift down one position.
    pub fn take_item(&mut self, location: ItemLocation) -> Option<ItemInstance> {
        match location {
            ItemLocation::Inventory(index) if index < self.inventory.len() => {
                Some(self.inventory.remove(index))
            }
            ItemLocation::Inventory(_) => None,
            ItemLocation::Equipped(slot) => self.equipment.remove(slot),
        }
    }
}

impl Snapshot for Character {
    fn snapshot_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> PrimaryStats {
        PrimaryStats {
            strength: 5,
            agility: 5,
            accuracy: 5,
            stamina: 10,
            intelligence: 4,
            energy: 9,
        }
    }

    #[test]
    fn test_new_character_starts_with_full_vitals() {
        let character = Character::new(Uuid::new_v4(), "Ysolde", Race::Human, attributes());

        assert_eq!(character.level, 1);
        assert_eq!(character.vitals.health, 150);
        assert_eq!(character.vitals.mana, 60);
        assert_eq!(character.vitals.energy, 14);
        assert!(character.equipment.is_empty());
        assert!(character.inventory.is_empty());
    }

    #[test]
    fn test_locate_prefers_inventory_then_equipment() {
        let mut character = Character::new(Uuid::new_v4(), "Ysolde", Race::Human, attributes());
        let carried = ItemInstance::new("helm");
        let worn = ItemInstance::new("ring");
        character.inventory.push(carried.clone());
        character.equipment.insert(EquipmentSlot::Ring2, worn.clone());

        assert_eq!(
            character.locate(carried.unique_id),
            Some(ItemLocation::Inventory(0))
        );
        assert_eq!(
            character.locate(worn.unique_id),
            Some(ItemLocation::Equipped(EquipmentSlot::Ring2))
        );
        assert_eq!(character.locate(Uuid::new_v4()), None);
    }

    #[test]
    fn test_take_item_removes_from_inventory_or_slot() {
        let mut character = Character::new(Uuid::new_v4(), "Ysolde", Race::Human, attributes());
        let first = ItemInstance::new("helm");
        let second = ItemInstance::new("boots");
        let worn = ItemInstance::new("ring");
        character.inventory.push(first.clone());
        character.inventory.push(second.clone());
        character.equipment.insert(EquipmentSlot::Ring1, worn.clone());

        let taken = character.take_item(ItemLocation::Inventory(0));
        let taken_worn = character.take_item(ItemLocation::Equipped(EquipmentSlot::Ring1));

        assert_eq!(taken, Some(first));
        assert_eq!(taken_worn, Some(worn));
        assert_eq!(character.inventory, vec![second]);
        assert!(character.equipment.is_empty());
        assert_eq!(character.take_item(ItemLocation::Inventory(5)), None);
    }

    #[test]
    fn test_essences_get_mut_targets_matching_tier() {
        let mut essences = Essences::default();
        *essences.get_mut(Rarity::Epic) += 2;
        assert_eq!(essences.get(Rarity::Epic), 2);
        assert_eq!(essences.epic, 2);
        assert_eq!(essences.get(Rarity::Rare), 0);
    }

    #[test]
    fn test_character_round_trips_through_json() {
        let mut character = Character::new(Uuid::new_v4(), "Ysolde", Race::Elf, attributes());
        character
            .equipment
            .insert(EquipmentSlot::MainHand, ItemInstance::new("sword"));

        let json = serde_json::to_string(&character).unwrap();
        let restored: Character = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, character);
    }
}
