//! Snapshot repository abstraction.
//!
//! The engine produces complete snapshots and hands them to an external
//! persistence collaborator. The collaborator's echo is authoritative and may
//! differ from what was sent.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// A value that is stored and loaded as a whole.
pub trait Snapshot: Clone + Send + Sync + 'static {
    /// Returns the snapshot identifier.
    fn snapshot_id(&self) -> Uuid;
}

/// Repository trait for loading and saving whole snapshots.
#[async_trait]
pub trait SnapshotRepository<T: Snapshot>: Send + Sync {
    /// Load the latest known snapshot for `id`.
    async fn load(&self, id: Uuid) -> Result<T, DomainError>;

    /// Store `snapshot` and return the authoritative copy.
    async fn save(&self, snapshot: T) -> Result<T, DomainError>;
}
