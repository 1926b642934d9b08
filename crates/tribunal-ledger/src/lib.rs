//! Tribunal Ledger - Balance and lock bookkeeping.
//!
//! This crate provides:
//! - Per-account credit balances with two lock categories
//!   (proposal stake and voting stake)
//! - Deposit/withdraw wrappers over the external value-transfer
//!   collaborator

pub mod account;
pub mod error;
pub mod ledger;
pub mod transfer;

pub use account::Account;
pub use error::LedgerError;
pub use ledger::BalanceLedger;
pub use transfer::{NoopTransfer, TransferError, ValueTransfer};
