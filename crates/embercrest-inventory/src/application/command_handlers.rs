//! Command handlers for the Inventory & Economy context.
//!
//! Each handler loads the character, runs the pure domain operation, saves
//! the new snapshot and re-derives stats from what the repository returned.

use std::sync::Mutex;

use embercrest_character::application::command_handlers::{
    CharacterCommandResult, persist_character,
};
use embercrest_character::domain::character::Character;
use embercrest_content::domain::catalog::GameCatalog;
use embercrest_content::domain::items::Rarity;
use embercrest_core::config::EngineConfig;
use embercrest_core::error::DomainError;
use embercrest_core::repository::SnapshotRepository;
use embercrest_core::rng::DeterministicRng;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::commands::{DisenchantItem, EquipItem, UnequipItem, UpgradeItem};
use crate::domain::economy::{self, EconomyFailure};
use crate::domain::equipment::{self, EquipFailure};

/// Errors returned by Inventory & Economy command handlers.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The equip or unequip was rejected.
    #[error(transparent)]
    Equip(#[from] EquipFailure),

    /// The upgrade or disenchant was rejected.
    #[error(transparent)]
    Economy(#[from] EconomyFailure),

    /// Loading, saving or RNG access failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of a handled upgrade attempt.
#[derive(Debug, Clone)]
pub struct UpgradeCommandResult {
    /// The stored character and its derived stats.
    pub result: CharacterCommandResult,
    /// Whether the item gained a level.
    pub success: bool,
    /// The item's level after the attempt.
    pub new_level: u8,
    /// Gold paid.
    pub gold_spent: u64,
}

/// Result of a handled disenchant.
#[derive(Debug, Clone)]
pub struct DisenchantCommandResult {
    /// The stored character and its derived stats.
    pub result: CharacterCommandResult,
    /// Essence tier credited.
    pub essence: Rarity,
    /// Essence credited, possibly zero.
    pub amount: u32,
    /// Gold paid.
    pub gold_spent: u64,
}

/// Handles the `EquipItem` command.
///
/// # Errors
///
/// Returns `InventoryError::Equip` if the move is rejected, or
/// `InventoryError::Domain` if loading or saving fails.
#[instrument(
    skip(command, catalog, config, repo),
    fields(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        item_id = %command.item_id
    )
)]
pub async fn handle_equip_item(
    command: &EquipItem,
    catalog: &GameCatalog,
    config: &EngineConfig,
    repo: &dyn SnapshotRepository<Character>,
) -> Result<CharacterCommandResult, InventoryError> {
    let character = repo.load(command.character_id).await?;

    let updated = equipment::equip(&character, command.item_id, catalog, config)
        .inspect_err(|failure| warn!(%failure, "equip rejected"))?;

    let result = persist_character(updated, catalog, repo).await?;
    info!(inventory_len = result.character.inventory.len(), "item equipped");
    Ok(result)
}

/// Handles the `UnequipItem` command.
///
/// # Errors
///
/// Returns `InventoryError::Equip` if the move is rejected, or
/// `InventoryError::Domain` if loading or saving fails.
#[instrument(
    skip(command, catalog, config, repo),
    fields(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        item_id = %command.item_id,
        slot = ?command.slot
    )
)]
pub async fn handle_unequip_item(
    command: &UnequipItem,
    catalog: &GameCatalog,
    config: &EngineConfig,
    repo: &dyn SnapshotRepository<Character>,
) -> Result<CharacterCommandResult, InventoryError> {
    let character = repo.load(command.character_id).await?;

    let updated = equipment::unequip(&character, command.item_id, command.slot, config)
        .inspect_err(|failure| warn!(%failure, "unequip rejected"))?;

    let result = persist_character(updated, catalog, repo).await?;
    info!(inventory_len = result.character.inventory.len(), "item unequipped");
    Ok(result)
}

/// Handles the `UpgradeItem` command.
///
/// # Errors
///
/// Returns `InventoryError::Economy` if the attempt is rejected, or
/// `InventoryError::Domain` if loading, saving or RNG access fails. A failed
/// roll is not an error.
#[instrument(
    skip(command, catalog, config, rng, repo),
    fields(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        item_id = %command.item_id
    )
)]
pub async fn handle_upgrade_item(
    command: &UpgradeItem,
    catalog: &GameCatalog,
    config: &EngineConfig,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn SnapshotRepository<Character>,
) -> Result<UpgradeCommandResult, InventoryError> {
    let character = repo.load(command.character_id).await?;

    // Lock RNG only for the synchronous domain call, never across an await.
    let outcome = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        economy::upgrade(&character, command.item_id, catalog, config, &mut *rng_guard)
    }
    .inspect_err(|failure| warn!(%failure, "upgrade rejected"))?;

    let result = persist_character(outcome.character, catalog, repo).await?;
    info!(
        success = outcome.success,
        new_level = outcome.new_level,
        gold_spent = outcome.gold_spent,
        "upgrade attempted"
    );
    Ok(UpgradeCommandResult {
        result,
        success: outcome.success,
        new_level: outcome.new_level,
        gold_spent: outcome.gold_spent,
    })
}

/// Handles the `DisenchantItem` command.
///
/// # Errors
///
/// Returns `InventoryError::Economy` if the disenchant is rejected, or
/// `InventoryError::Domain` if loading, saving or RNG access fails.
#[instrument(
    skip(command, catalog, rng, repo),
    fields(
        correlation_id = %command.correlation_id,
        character_id = %command.character_id,
        item_id = %command.item_id
    )
)]
pub async fn handle_disenchant_item(
    command: &DisenchantItem,
    catalog: &GameCatalog,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn SnapshotRepository<Character>,
) -> Result<DisenchantCommandResult, InventoryError> {
    let character = repo.load(command.character_id).await?;

    let outcome = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        economy::disenchant(&character, command.item_id, catalog, &mut *rng_guard)
    }
    .inspect_err(|failure| warn!(%failure, "disenchant rejected"))?;

    let result = persist_character(outcome.character, catalog, repo).await?;
    info!(
        essence = ?outcome.essence,
        amount = outcome.amount,
        gold_spent = outcome.gold_spent,
        "item disenchanted"
    );
    Ok(DisenchantCommandResult {
        result,
        essence: outcome.essence,
        amount: outcome.amount,
        gold_spent: outcome.gold_spent,
    })
}
