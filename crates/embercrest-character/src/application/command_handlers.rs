//! Command handlers for the Character context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the character, run the domain operation,
//! persist the new snapshot and re-derive stats from the stored copy.

use embercrest_content::domain::catalog::GameCatalog;
use embercrest_core::error::DomainError;
use embercrest_core::repository::SnapshotRepository;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::domain::allocation::{AllocationFailure, allocate_attributes};
use crate::domain::character::Character;
use crate::domain::commands::AllocateAttributes;
use crate::domain::stats::{DerivedCharacter, clamp_vitals, derive_stats};

/// Result of a successfully handled command.
#[derive(Debug, Clone)]
pub struct CharacterCommandResult {
    /// The character as returned by the persistence collaborator.
    pub character: Character,
    /// Stats derived from the returned character.
    pub derived: DerivedCharacter,
}

/// Errors returned by Character command handlers.
#[derive(Debug, Error)]
pub enum CharacterError {
    /// The allocation was rejected.
    #[error(transparent)]
    Allocation(#[from] AllocationFailure),

    /// Loading or saving failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Caps vitals, saves `character` and derives stats from the authoritative
/// echo, which may differ from what was sent.
///
/// # Errors
///
/// Returns `DomainError` if the save fails.
pub async fn persist_character(
    character: Character,
    catalog: &GameCatalog,
    repo: &dyn SnapshotRepository<Character>,
) -> Result<CharacterCommandResult, DomainError> {
    let saved = repo.save(clamp_vitals(character, catalog)).await?;
    let derived = derive_stats(&saved, catalog);
    Ok(CharacterCommandResult {
        character: saved,
        derived,
    })
}

/// Handles the `AllocateAttributes` command: loads the character, spends the
/// points, and persists the result.
///
/// # Errors
///
/// Returns `CharacterError::Allocation` if the allocation is rejected, or
/// `CharacterError::Domain` if loading or saving fails.
#[instrument(
    skip(command, catalog, repo),
    fields(correlation_id = %command.correlation_id, character_id = %command.character_id)
)]
pub async fn handle_allocate_attributes(
    command: &AllocateAttributes,
    catalog: &GameCatalog,
    repo: &dyn SnapshotRepository<Character>,
) -> Result<CharacterCommandResult, CharacterError> {
    let character = repo.load(command.character_id).await?;

    let updated = allocate_attributes(&character, &command.allocation)
        .inspect_err(|failure| warn!(%failure, "attribute allocation rejected"))?;

    let result = persist_character(updated, catalog, repo).await?;
    info!(
        unspent = result.character.unspent_attribute_points,
        "attribute points allocated"
    );
    Ok(result)
}
