//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised at the persistence boundary.
///
/// Rule violations inside the engine are reported through each context's own
/// failure enum; this type only covers loading and storing snapshots.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No character exists with the given identifier.
    #[error("character not found: {0}")]
    CharacterNotFound(Uuid),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
