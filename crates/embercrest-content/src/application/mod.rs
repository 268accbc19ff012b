//! Application layer for the game-data catalog.

pub mod query_handlers;
