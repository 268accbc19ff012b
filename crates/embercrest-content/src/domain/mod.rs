//! Domain model for the game-data catalog.

pub mod attributes;
pub mod catalog;
pub mod items;
