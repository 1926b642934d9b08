//! The balance ledger: the only component permitted to mutate
//! balances and locks.
//!
//! Every mutating operation checks its preconditions before touching
//! state, so a returned error means nothing changed.

use std::collections::BTreeMap;

use tracing::{debug, info};
use tribunal_types::{AccountId, Credits};

use crate::account::Account;
use crate::error::LedgerError;
use crate::transfer::ValueTransfer;

/// Owns all account state.
///
/// Accounts are kept in a `BTreeMap` so iteration (snapshots, audits)
/// is deterministic.
#[derive(Debug, Default, Clone)]
pub struct BalanceLedger {
    accounts: BTreeMap<AccountId, Account>,
}

impl BalanceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a snapshot of account state.
    pub fn from_accounts(accounts: BTreeMap<AccountId, Account>) -> Self {
        Self { accounts }
    }

    /// All accounts, in id order.
    pub fn accounts(&self) -> &BTreeMap<AccountId, Account> {
        &self.accounts
    }

    /// Current state of an account. Unknown accounts read as empty.
    pub fn account(&self, id: &AccountId) -> Account {
        self.accounts.get(id).copied().unwrap_or_default()
    }

    /// Total balance of an account.
    pub fn balance(&self, id: &AccountId) -> Credits {
        self.account(id).balance
    }

    /// Credits not backing any stake or open vote, floored at zero.
    pub fn available(&self, id: &AccountId) -> Credits {
        self.account(id).available()
    }

    /// Active proposal-stake lock.
    pub fn proposal_lock(&self, id: &AccountId) -> Credits {
        self.account(id).proposal_lock
    }

    /// Active voting lock.
    pub fn voting_lock(&self, id: &AccountId) -> Credits {
        self.account(id).voting_lock
    }

    /// Increase an account's balance.
    pub fn credit(&mut self, id: &AccountId, amount: Credits) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let account = self.accounts.entry(*id).or_default();
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        debug!("Credited {} to {}, balance {}", amount, id, account.balance);
        Ok(())
    }

    /// Decrease an account's balance by exactly `amount`.
    pub fn debit(&mut self, id: &AccountId, amount: Credits) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self.balance(id);
        let new_balance = balance
            .checked_sub(amount)
            .ok_or(LedgerError::Underflow {
                requested: amount,
                balance,
            })?;
        let account = self.accounts.entry(*id).or_default();
        account.balance = new_balance;
        debug!("Debited {} from {}, balance {}", amount, id, new_balance);
        Ok(())
    }

    /// Lock part of the available balance behind a proposal stake.
    pub fn lock_for_proposal(&mut self, id: &AccountId, amount: Credits) -> Result<(), LedgerError> {
        let available = self.available(id);
        if amount > available {
            return Err(LedgerError::InsufficientAvailableBalance {
                requested: amount,
                available,
            });
        }
        let account = self.accounts.entry(*id).or_default();
        account.proposal_lock = account
            .proposal_lock
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        debug!(
            "Locked {} for proposal by {}, proposal_lock {}",
            amount, id, account.proposal_lock
        );
        Ok(())
    }

    /// Lock part of the available balance behind a vote.
    pub fn lock_for_voting(&mut self, id: &AccountId, amount: Credits) -> Result<(), LedgerError> {
        let available = self.available(id);
        if amount > available {
            return Err(LedgerError::InsufficientAvailableBalance {
                requested: amount,
                available,
            });
        }
        let account = self.accounts.entry(*id).or_default();
        account.voting_lock = account
            .voting_lock
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        debug!(
            "Locked {} for voting by {}, voting_lock {}",
            amount, id, account.voting_lock
        );
        Ok(())
    }

    /// Release a voting lock in full.
    ///
    /// Strict: releasing more than is locked is a `LockUnderflow`.
    /// Correct settlement callers never trigger it.
    pub fn unlock_from_voting(&mut self, id: &AccountId, amount: Credits) -> Result<(), LedgerError> {
        let locked = self.voting_lock(id);
        let new_lock = locked
            .checked_sub(amount)
            .ok_or(LedgerError::LockUnderflow {
                requested: amount,
                locked,
            })?;
        let account = self.accounts.entry(*id).or_default();
        account.voting_lock = new_lock;
        debug!(
            "Unlocked {} from voting by {}, voting_lock {}",
            amount, id, new_lock
        );
        Ok(())
    }

    /// Release a proposal-stake lock, clamped to the current lock.
    ///
    /// Returns the amount actually released. The clamp guards against
    /// lock drift and is documented as non-error behavior.
    pub fn unlock_from_proposal(&mut self, id: &AccountId, amount: Credits) -> Credits {
        let account = self.accounts.entry(*id).or_default();
        let released = amount.min(account.proposal_lock);
        account.proposal_lock = account.proposal_lock.saturating_sub(released);
        debug!(
            "Unlocked {} from proposal stake by {}, proposal_lock {}",
            released, id, account.proposal_lock
        );
        released
    }

    /// Deposit: confirm the external transfer first, then credit.
    ///
    /// A failed external transfer leaves ledger state unchanged.
    pub fn deposit(
        &mut self,
        transfer: &dyn ValueTransfer,
        id: &AccountId,
        amount: Credits,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        transfer.credit_external(id, amount)?;
        self.credit(id, amount)?;
        info!("Deposit of {} confirmed for {}", amount, id);
        Ok(())
    }

    /// Withdraw: debit the internal ledger first, then move funds out.
    ///
    /// The internal debit happens before the external call so a
    /// re-entrant collaborator can never observe un-debited state; if
    /// the external transfer fails the debit is rolled back.
    pub fn withdraw(
        &mut self,
        transfer: &dyn ValueTransfer,
        id: &AccountId,
        amount: Credits,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let available = self.available(id);
        if amount > available {
            return Err(LedgerError::InsufficientAvailableBalance {
                requested: amount,
                available,
            });
        }
        self.debit(id, amount)?;

        if let Err(e) = transfer.debit_external(id, amount) {
            // Roll back the internal debit. Adding back what was just
            // subtracted cannot overflow.
            let account = self.accounts.entry(*id).or_default();
            account.balance = account.balance.saturating_add(amount);
            info!("Withdrawal of {} by {} rolled back: {}", amount, id, e);
            return Err(e.into());
        }

        info!("Withdrawal of {} confirmed for {}", amount, id);
        Ok(())
    }
}
