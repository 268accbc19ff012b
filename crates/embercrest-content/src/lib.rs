//! Embercrest — Game-data catalog bounded context.
//!
//! Responsible for the read-only item catalog: templates, affix
//! definitions, rolled affix snapshots and item instances.

pub mod application;
pub mod domain;
