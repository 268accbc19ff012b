//! Moving items between the inventory and equipment slots.
//!
//! Both operations are pure: they validate against the character as given
//! and return a new snapshot, leaving the input untouched on rejection.
//! Neither caps current vitals; that happens when the snapshot is persisted.

use embercrest_character::domain::character::{Character, Equipment, EquipmentSlot};
use embercrest_character::domain::stats::derive_stats;
use embercrest_content::domain::attributes::Attribute;
use embercrest_content::domain::catalog::GameCatalog;
use embercrest_content::domain::items::{ItemSlot, ItemTemplate};
use embercrest_core::config::EngineConfig;
use thiserror::Error;
use uuid::Uuid;

/// Why an equip or unequip was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipFailure {
    /// The item is not where the operation expects it.
    #[error("item not found: {0}")]
    ItemNotFound(Uuid),

    /// The item's template is missing from the catalog.
    #[error("unknown item template: {0}")]
    UnknownTemplate(String),

    /// The character's level is below the template's requirement.
    #[error("requires level {required}, character is level {actual}")]
    LevelTooLow {
        /// Required level.
        required: u32,
        /// Character level.
        actual: u32,
    },

    /// A derived attribute total is below the template's requirement.
    #[error("requires {required} {attribute}, character has {actual}")]
    AttributeRequirementNotMet {
        /// The attribute that falls short.
        attribute: Attribute,
        /// Required total.
        required: i32,
        /// Derived total.
        actual: i32,
    },

    /// Both ring slots are taken.
    #[error("both ring slots are occupied")]
    RingSlotsFull,

    /// A two-handed weapon cannot be equipped while the off hand is in use.
    #[error("cannot equip a two-handed weapon while the off hand is occupied")]
    TwoHandedConflict,

    /// The inventory cannot hold the items the operation would move into it.
    #[error("inventory is full (capacity {capacity})")]
    InventoryFull {
        /// Configured capacity.
        capacity: usize,
    },
}

/// Resolves the concrete slot an item of `slot` goes into.
///
/// # Errors
///
/// Returns `EquipFailure::RingSlotsFull` for a ring when both ring slots are
/// occupied.
pub fn target_slot(slot: ItemSlot, equipment: &Equipment) -> Result<EquipmentSlot, EquipFailure> {
    Ok(match slot {
        ItemSlot::Head => EquipmentSlot::Head,
        ItemSlot::Neck => EquipmentSlot::Neck,
        ItemSlot::Chest => EquipmentSlot::Chest,
        ItemSlot::Hands => EquipmentSlot::Hands,
        ItemSlot::Legs => EquipmentSlot::Legs,
        ItemSlot::Feet => EquipmentSlot::Feet,
        ItemSlot::MainHand => EquipmentSlot::MainHand,
        ItemSlot::OffHand => EquipmentSlot::OffHand,
        ItemSlot::TwoHand => EquipmentSlot::TwoHand,
        ItemSlot::Ring => [EquipmentSlot::Ring1, EquipmentSlot::Ring2]
            .into_iter()
            .find(|ring| !equipment.is_occupied(*ring))
            .ok_or(EquipFailure::RingSlotsFull)?,
    })
}

/// Occupied slots that must be emptied to put an item in `target`, in the
/// order their items return to the inventory.
fn displaced_slots(
    target: EquipmentSlot,
    equipment: &Equipment,
) -> Result<Vec<EquipmentSlot>, EquipFailure> {
    let companions: &[EquipmentSlot] = match target {
        EquipmentSlot::TwoHand if equipment.is_occupied(EquipmentSlot::OffHand) => {
            return Err(EquipFailure::TwoHandedConflict);
        }
        EquipmentSlot::TwoHand => &[EquipmentSlot::MainHand, EquipmentSlot::OffHand],
        EquipmentSlot::MainHand | EquipmentSlot::OffHand => &[EquipmentSlot::TwoHand],
        _ => &[],
    };

    Ok(companions
        .iter()
        .copied()
        .chain(std::iter::once(target))
        .filter(|slot| equipment.is_occupied(*slot))
        .collect())
}

fn check_requirements(
    character: &Character,
    template: &ItemTemplate,
    catalog: &GameCatalog,
) -> Result<(), EquipFailure> {
    let derived = derive_stats(character, catalog);

    if derived.level < template.required_level {
        return Err(EquipFailure::LevelTooLow {
            required: template.required_level,
            actual: derived.level,
        });
    }

    for attribute in Attribute::ALL {
        let required = template.required_stats.get(attribute);
        let actual = derived.stats.get(attribute);
        if required > actual {
            return Err(EquipFailure::AttributeRequirementNotMet {
                attribute,
                required,
                actual,
            });
        }
    }

    Ok(())
}

/// Equips the inventory item `item_id`.
///
/// Items pushed out of their slots are appended to the end of the inventory.
///
/// Stored vitals are not capped here. Persist the result through
/// `persist_character`, which caps them at the new derived maxima.
///
/// # Errors
///
/// Returns an `EquipFailure` describing the first rule the move breaks.
pub fn equip(
    character: &Character,
    item_id: Uuid,
    catalog: &GameCatalog,
    config: &EngineConfig,
) -> Result<Character, EquipFailure> {
    let position = character
        .inventory_position(item_id)
        .ok_or(EquipFailure::ItemNotFound(item_id))?;
    let item = &character.inventory[position];
    let template = catalog
        .template_for(item)
        .ok_or_else(|| EquipFailure::UnknownTemplate(item.template_id.clone()))?;

    check_requirements(character, template, catalog)?;

    let target = target_slot(template.slot, &character.equipment)?;
    let displaced = displaced_slots(target, &character.equipment)?;

    let resulting_len = character.inventory.len() - 1 + displaced.len();
    if resulting_len > config.inventory_capacity {
        return Err(EquipFailure::InventoryFull {
            capacity: config.inventory_capacity,
        });
    }

    let mut next = character.clone();
    let item = next.inventory.remove(position);
    for slot in displaced {
        next.inventory.extend(next.equipment.remove(slot));
    }
    next.equipment.insert(target, item);
    Ok(next)
}

/// Moves the item `item_id` out of `slot` to the end of the inventory.
///
/// Stored vitals are not capped here. Persist the result through
/// `persist_character`, which caps them at the new derived maxima.
///
/// # Errors
///
/// Returns `EquipFailure::InventoryFull` if the inventory is at capacity, or
/// `EquipFailure::ItemNotFound` if `slot` does not hold `item_id`.
pub fn unequip(
    character: &Character,
    item_id: Uuid,
    slot: EquipmentSlot,
    config: &EngineConfig,
) -> Result<Character, EquipFailure> {
    if character.inventory.len() >= config.inventory_capacity {
        return Err(EquipFailure::InventoryFull {
            capacity: config.inventory_capacity,
        });
    }

    let mut next = character.clone();
    let item = next
        .equipment
        .remove(slot)
        .filter(|item| item.unique_id == item_id)
        .ok_or(EquipFailure::ItemNotFound(item_id))?;
    next.inventory.push(item);
    Ok(next)
}
