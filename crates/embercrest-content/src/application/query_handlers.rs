//! Query handlers for the game-data catalog.
//!
//! This module resolves item instances against the catalog and returns
//! read-only view DTOs for display.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::catalog::GameCatalog;
use crate::domain::items::{ItemInstance, ItemSlot, Rarity, RolledAffixStats};

/// Read-only view of an item instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    /// The instance identifier.
    pub unique_id: Uuid,
    /// The catalog template.
    pub template_id: String,
    /// Name including affixes and upgrade level, e.g. "Vicious Iron Sword of the Bear +3".
    pub display_name: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Template slot.
    pub slot: ItemSlot,
    /// Upgrade level.
    pub upgrade_level: u8,
    /// Base gold value.
    pub value: u64,
}

/// Builds the display name of `item`.
///
/// Affixes missing from the catalog are left out of the name.
#[must_use]
pub fn display_name(item: &ItemInstance, base_name: &str, catalog: &GameCatalog) -> String {
    let affix_name = |rolled: Option<&RolledAffixStats>| {
        rolled
            .and_then(|r| catalog.affix(&r.affix_id))
            .map(|a| a.name.as_str())
    };

    let mut parts: Vec<&str> = Vec::with_capacity(3);
    parts.extend(affix_name(item.prefix.as_ref()));
    parts.push(base_name);
    parts.extend(affix_name(item.suffix.as_ref()));

    let mut name = parts.join(" ");
    if item.upgrade_level > 0 {
        name.push_str(&format!(" +{}", item.upgrade_level));
    }
    name
}

/// Resolves an item instance into a view.
///
/// Returns `None` when the item's template is not in the catalog.
#[must_use]
pub fn item_view(item: &ItemInstance, catalog: &GameCatalog) -> Option<ItemView> {
    let template = catalog.template_for(item)?;
    Some(ItemView {
        unique_id: item.unique_id,
        template_id: item.template_id.clone(),
        display_name: display_name(item, &template.name, catalog),
        rarity: template.rarity,
        slot: template.slot,
        upgrade_level: item.upgrade_level,
        value: template.value,
    })
}
