//! External value-transfer collaborator.
//!
//! Moving funds in and out of the ledger is not this crate's concern.
//! The deposit/withdraw wrappers call through this trait and treat a
//! reported failure as grounds to leave (or restore) ledger state
//! untouched.

use thiserror::Error;
use tribunal_types::{AccountId, Credits};

/// Failure reported by the external value-transfer mechanism.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransferError(pub String);

/// Contract with the external value-transfer collaborator.
///
/// Implementations must be side-effect complete on `Ok`: once a call
/// returns success the funds have moved.
pub trait ValueTransfer {
    /// Move funds from the outside world toward `account`.
    fn credit_external(&self, account: &AccountId, amount: Credits) -> Result<(), TransferError>;

    /// Move funds out of the ledger toward `account`.
    fn debit_external(&self, account: &AccountId, amount: Credits) -> Result<(), TransferError>;
}

/// Transfer backend that always succeeds. Used in tests and for
/// deployments where credits never leave the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransfer;

impl ValueTransfer for NoopTransfer {
    fn credit_external(&self, _account: &AccountId, _amount: Credits) -> Result<(), TransferError> {
        Ok(())
    }

    fn debit_external(&self, _account: &AccountId, _amount: Credits) -> Result<(), TransferError> {
        Ok(())
    }
}
