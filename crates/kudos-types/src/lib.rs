//! Kudos Types - Shared domain types
//!
//! This crate contains domain types used across Kudos services:
//! - Account identity
//! - Subscription tiers and the compiled-in entitlement catalog
//! - Feature and resource-kind vocabularies
//! - Usage snapshots and dashboard statistics

pub mod account;
pub mod feature;
pub mod tier;
pub mod usage;

pub use account::*;
pub use feature::*;
pub use tier::*;
pub use usage::*;
