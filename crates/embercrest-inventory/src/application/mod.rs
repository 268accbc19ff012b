//! Application layer for the Inventory & Economy context.

pub mod command_handlers;
