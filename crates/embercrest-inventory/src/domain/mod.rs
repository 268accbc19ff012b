//! Domain layer for the Inventory & Economy context.

pub mod commands;
pub mod economy;
pub mod equipment;
