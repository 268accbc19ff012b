//! Test repositories — mock `SnapshotRepository` implementations for tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use embercrest_core::error::DomainError;
use embercrest_core::repository::{Snapshot, SnapshotRepository};
use uuid::Uuid;

/// A repository backed by a `HashMap`. `save` stores the snapshot and echoes
/// it back unchanged.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    snapshots: Mutex<HashMap<Uuid, T>>,
}

impl<T: Snapshot> InMemoryRepository<T> {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    /// Create a repository seeded with `snapshots`.
    #[must_use]
    pub fn with(snapshots: impl IntoIterator<Item = T>) -> Self {
        let repo = Self::new();
        for snapshot in snapshots {
            repo.insert(snapshot);
        }
        repo
    }

    /// Insert or replace a snapshot without going through `save`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert(&self, snapshot: T) {
        self.snapshots
            .lock()
            .unwrap()
            .insert(snapshot.snapshot_id(), snapshot);
    }

    /// Returns the stored snapshot for `id`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<T> {
        self.snapshots.lock().unwrap().get(&id).cloned()
    }
}

impl<T: Snapshot> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Snapshot> SnapshotRepository<T> for InMemoryRepository<T> {
    async fn load(&self, id: Uuid) -> Result<T, DomainError> {
        self.get(id).ok_or(DomainError::CharacterNotFound(id))
    }

    async fn save(&self, snapshot: T) -> Result<T, DomainError> {
        self.insert(snapshot.clone());
        Ok(snapshot)
    }
}

/// A repository that stores like `InMemoryRepository` and additionally
/// records every snapshot passed to `save`, in call order.
#[derive(Debug)]
pub struct RecordingRepository<T> {
    store: InMemoryRepository<T>,
    saved: Mutex<Vec<T>>,
}

impl<T: Snapshot> RecordingRepository<T> {
    /// Create a recording repository seeded with `snapshots`.
    #[must_use]
    pub fn with(snapshots: impl IntoIterator<Item = T>) -> Self {
        Self {
            store: InMemoryRepository::with(snapshots),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every snapshot that was saved.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved(&self) -> Vec<T> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Snapshot> SnapshotRepository<T> for RecordingRepository<T> {
    async fn load(&self, id: Uuid) -> Result<T, DomainError> {
        self.store.load(id).await
    }

    async fn save(&self, snapshot: T) -> Result<T, DomainError> {
        self.saved.lock().unwrap().push(snapshot.clone());
        self.store.save(snapshot).await
    }
}

/// A repository that rewrites every saved snapshot before storing it,
/// simulating a server that returns an authoritative, corrected copy.
pub struct CorrectingRepository<T> {
    store: InMemoryRepository<T>,
    correction: Box<dyn Fn(T) -> T + Send + Sync>,
}

impl<T: Snapshot> CorrectingRepository<T> {
    /// Create a correcting repository seeded with `snapshots` that applies
    /// `correction` to every save.
    #[must_use]
    pub fn with(
        snapshots: impl IntoIterator<Item = T>,
        correction: impl Fn(T) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            store: InMemoryRepository::with(snapshots),
            correction: Box::new(correction),
        }
    }
}

impl<T> fmt::Debug for CorrectingRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorrectingRepository").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Snapshot> SnapshotRepository<T> for CorrectingRepository<T> {
    async fn load(&self, id: Uuid) -> Result<T, DomainError> {
        self.store.load(id).await
    }

    async fn save(&self, snapshot: T) -> Result<T, DomainError> {
        self.store.save((self.correction)(snapshot)).await
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRepository;

#[async_trait]
impl<T: Snapshot> SnapshotRepository<T> for FailingRepository {
    async fn load(&self, _id: Uuid) -> Result<T, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _snapshot: T) -> Result<T, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
