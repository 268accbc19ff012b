//! Shared test mocks and utilities for the Embercrest engine.

mod repository;
mod rng;
mod tracing;

pub use repository::{
    CorrectingRepository, FailingRepository, InMemoryRepository, RecordingRepository,
};
pub use rng::{MaxRng, MockRng, SequenceRng};
pub use tracing::init_tracing;
