//! Commands for the Inventory & Economy context.

use embercrest_character::domain::character::EquipmentSlot;
use uuid::Uuid;

/// Command to equip an inventory item.
#[derive(Debug, Clone)]
pub struct EquipItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The item to equip.
    pub item_id: Uuid,
}

/// Command to move an equipped item back into the inventory.
#[derive(Debug, Clone)]
pub struct UnequipItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The item to unequip.
    pub item_id: Uuid,
    /// The slot the item is expected in.
    pub slot: EquipmentSlot,
}

/// Command to attempt an upgrade of a carried or equipped item.
#[derive(Debug, Clone)]
pub struct UpgradeItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The item to upgrade.
    pub item_id: Uuid,
}

/// Command to disenchant an inventory item into essence.
#[derive(Debug, Clone)]
pub struct DisenchantItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// The item to disenchant.
    pub item_id: Uuid,
}
