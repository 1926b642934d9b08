//! Tribunal Types - Core type definitions for the TRIBUNAL governance ledger.
//!
//! This crate provides the fundamental types used throughout the ledger:
//! - Account identifiers (20-byte, Bech32m encoded)
//! - Credits (u64 amounts with checked arithmetic and basis-point math)
//! - Timestamps and durations

pub mod account_id;
pub mod credits;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use account_id::AccountId;
pub use credits::{Credits, BPS_DENOMINATOR};
pub use error::TypesError;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Seconds per day, used to convert proposal durations to deadlines.
pub const SECONDS_PER_DAY: u64 = 86_400;
