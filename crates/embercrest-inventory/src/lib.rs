//! Embercrest — Inventory & Economy bounded context.
//!
//! Responsible for moving items between inventory and equipment slots,
//! and for the gold and essence economy of upgrading and disenchanting.

pub mod application;
pub mod domain;
