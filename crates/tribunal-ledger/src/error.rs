use crate::transfer::TransferError;
use thiserror::Error;
use tribunal_types::Credits;

/// Errors that can occur in ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount: a positive amount is required")]
    InvalidAmount,

    #[error("Insufficient available balance: requested {requested}, available {available}")]
    InsufficientAvailableBalance {
        requested: Credits,
        available: Credits,
    },

    #[error("Balance underflow: requested {requested}, balance {balance}")]
    Underflow { requested: Credits, balance: Credits },

    #[error("Lock underflow: requested {requested}, locked {locked}")]
    LockUnderflow { requested: Credits, locked: Credits },

    #[error("Balance overflow")]
    Overflow,

    #[error("External transfer failed: {0}")]
    TransferFailed(String),
}

impl From<TransferError> for LedgerError {
    fn from(e: TransferError) -> Self {
        LedgerError::TransferFailed(e.to_string())
    }
}
