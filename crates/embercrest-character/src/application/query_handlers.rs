//! Query handlers for the Character context.
//!
//! This module loads characters and returns read-only view DTOs built from
//! the derived statline and the catalog.

use embercrest_content::application::query_handlers::{ItemView, item_view};
use embercrest_content::domain::catalog::GameCatalog;
use embercrest_core::config::EngineConfig;
use embercrest_core::error::DomainError;
use embercrest_core::repository::SnapshotRepository;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::character::{Character, Currencies, EquipmentSlot};
use crate::domain::stats::{DerivedCharacter, derive_stats};

/// Read-only view of an equipped item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquippedItemView {
    /// The slot the item occupies.
    pub slot: EquipmentSlot,
    /// The item.
    pub item: ItemView,
}

/// Read-only view of a character sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSheetView {
    /// The derived statline.
    pub derived: DerivedCharacter,
    /// Equipped items in slot order.
    pub equipment: Vec<EquippedItemView>,
    /// Carried items in inventory order.
    pub inventory: Vec<ItemView>,
    /// Inventory capacity.
    pub inventory_capacity: usize,
    /// Attribute points not yet allocated.
    pub unspent_attribute_points: u32,
    /// Gold and essences.
    pub currencies: Currencies,
}

/// Builds the sheet for an already loaded character.
///
/// Items whose template is missing from the catalog are left out.
#[must_use]
pub fn character_sheet(
    character: &Character,
    catalog: &GameCatalog,
    config: &EngineConfig,
) -> CharacterSheetView {
    let equipment = character
        .equipment
        .iter()
        .filter_map(|(slot, item)| {
            let view = item_view(item, catalog);
            if view.is_none() {
                debug!(
                    item_id = %item.unique_id,
                    template_id = %item.template_id,
                    "equipped item has no template"
                );
            }
            view.map(|item| EquippedItemView { slot, item })
        })
        .collect();

    let inventory = character
        .inventory
        .iter()
        .filter_map(|item| item_view(item, catalog))
        .collect();

    CharacterSheetView {
        derived: derive_stats(character, catalog),
        equipment,
        inventory,
        inventory_capacity: config.inventory_capacity,
        unspent_attribute_points: character.unspent_attribute_points,
        currencies: character.currencies,
    }
}

/// Retrieves a character by id and builds its sheet.
///
/// # Errors
///
/// Returns `DomainError::CharacterNotFound` if the character does not exist,
/// or `DomainError::Infrastructure` if loading fails.
#[instrument(skip(catalog, config, repo))]
pub async fn get_character_sheet(
    character_id: Uuid,
    catalog: &GameCatalog,
    config: &EngineConfig,
    repo: &dyn SnapshotRepository<Character>,
) -> Result<CharacterSheetView, DomainError> {
    let character = repo.load(character_id).await?;
    Ok(character_sheet(&character, catalog, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embercrest_content::domain::attributes::PrimaryStats;
    use embercrest_content::domain::items::{ItemInstance, ItemSlot, ItemTemplate, Rarity};
    use embercrest_test_support::{InMemoryRepository, init_tracing};

    use crate::domain::race::Race;

    fn catalog() -> GameCatalog {
        let mut helm = ItemTemplate::new("helm", "Iron Helm", ItemSlot::Head, Rarity::Common);
        helm.bonuses.armor = 4;
        let boots = ItemTemplate::new("boots", "Boots", ItemSlot::Feet, Rarity::Uncommon);
        GameCatalog::new([helm, boots], Vec::new()).unwrap()
    }

    fn character() -> Character {
        let mut character = Character::new(
            Uuid::new_v4(),
            "Maren",
            Race::Dwarf,
            PrimaryStats {
                stamina: 3,
                ..PrimaryStats::default()
            },
        );
        character
            .equipment
            .insert(EquipmentSlot::Head, ItemInstance::new("helm"));
        character.inventory.push(ItemInstance::new("boots"));
        character.inventory.push(ItemInstance::new("unknown"));
        character.currencies.gold = 75;
        character
    }

    #[tokio::test]
    async fn test_get_character_sheet_returns_derived_view() {
        init_tracing();
        let character = character();
        let repo = InMemoryRepository::with([character.clone()]);

        let sheet = get_character_sheet(
            character.id,
            &catalog(),
            &EngineConfig::default(),
            &repo,
        )
        .await
        .unwrap();

        assert_eq!(sheet.derived.armor, 9);
        assert_eq!(sheet.equipment.len(), 1);
        assert_eq!(sheet.equipment[0].slot, EquipmentSlot::Head);
        assert_eq!(sheet.equipment[0].item.display_name, "Iron Helm");
        assert_eq!(sheet.inventory.len(), 1);
        assert_eq!(sheet.inventory[0].display_name, "Boots");
        assert_eq!(sheet.inventory_capacity, 40);
        assert_eq!(sheet.currencies.gold, 75);
    }

    #[tokio::test]
    async fn test_get_character_sheet_unknown_character_returns_not_found() {
        init_tracing();
        let repo: InMemoryRepository<Character> = InMemoryRepository::new();
        let id = Uuid::new_v4();

        let result = get_character_sheet(id, &catalog(), &EngineConfig::default(), &repo).await;

        match result {
            Err(DomainError::CharacterNotFound(missing)) => assert_eq!(missing, id),
            other => panic!("expected CharacterNotFound, got {other:?}"),
        }
    }
}
