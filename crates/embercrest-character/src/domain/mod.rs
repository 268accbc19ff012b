//! Domain model for the Character context.

pub mod allocation;
pub mod character;
pub mod commands;
pub mod race;
pub mod stats;
