//! Embercrest — Character bounded context.
//!
//! Responsible for the character sheet: base attributes, vitals,
//! equipment and inventory storage, currencies, and the stat
//! aggregator that resolves them into a combat statline.

pub mod application;
pub mod domain;
