use serde::{Deserialize, Serialize};
use tribunal_types::Credits;

/// Per-account ledger state.
///
/// Invariant: `balance >= proposal_lock + voting_lock`. The ledger
/// enforces this on every lock; `available()` is floored at zero as a
/// defensive read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Total credit balance
    pub balance: Credits,
    /// Sum of active proposal stakes held by this account as proposer
    pub proposal_lock: Credits,
    /// Sum of active vote amounts held by this account as voter
    pub voting_lock: Credits,
}

impl Account {
    /// Credits not backing any proposal stake or open vote.
    pub fn available(&self) -> Credits {
        self.balance
            .saturating_sub(self.proposal_lock)
            .saturating_sub(self.voting_lock)
    }

    /// Combined locks across both categories.
    pub fn total_locked(&self) -> Credits {
        self.proposal_lock.saturating_add(self.voting_lock)
    }
}
