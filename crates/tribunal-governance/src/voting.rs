//! The voting ledger.
//!
//! Validates votes against a proposal's options, locks the voter's
//! credits, and keeps the append-only vote records that settlement
//! later replays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use tribunal_ledger::{BalanceLedger, LedgerError};
use tribunal_types::{AccountId, Credits, Timestamp};

use crate::error::GovernanceError;
use crate::proposal::{OptionIndex, ProposalId, ProposalRegistry};

/// One cast vote. Never deleted or amended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub proposal: ProposalId,
    pub option: OptionIndex,
    pub voter: AccountId,
    pub amount: Credits,
}

/// Exclusively owns the vote records, keyed by (proposal, option).
///
/// Records within a key keep insertion order so settlement replays are
/// reproducible.
#[derive(Debug, Default, Clone)]
pub struct VoteBook {
    records: BTreeMap<(ProposalId, OptionIndex), Vec<VoteRecord>>,
}

impl VoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a vote book from a flat record list.
    pub fn from_records(records: Vec<VoteRecord>) -> Self {
        let mut book = Self::new();
        for record in records {
            book.records
                .entry((record.proposal, record.option))
                .or_default()
                .push(record);
        }
        book
    }

    /// Cast a vote, locking `amount` behind the chosen option.
    ///
    /// Preconditions are checked in contract order, each with its own
    /// failure: proposal exists, option exists, deadline not passed,
    /// proposal active, positive amount, sufficient available balance.
    /// Votes are cumulative; a voter may vote repeatedly, on any
    /// options of the same proposal. No vote can be withdrawn.
    pub fn cast(
        &mut self,
        ledger: &mut BalanceLedger,
        registry: &mut ProposalRegistry,
        voter: AccountId,
        proposal_id: ProposalId,
        option: OptionIndex,
        amount: Credits,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = registry.get(proposal_id)?;
        let current_count = proposal
            .option(option)
            .map(|o| o.vote_count)
            .ok_or(GovernanceError::OptionNotFound {
                proposal: proposal_id,
                option,
            })?;
        if now >= proposal.end_time {
            return Err(GovernanceError::ProposalClosed(proposal_id));
        }
        if !proposal.active {
            return Err(GovernanceError::ProposalClosed(proposal_id));
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount.into());
        }

        // Compute the new tally before mutating anything so a tally
        // overflow cannot strand a voting lock.
        let new_count = current_count
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        ledger.lock_for_voting(&voter, amount)?;

        let proposal = registry.get_mut(proposal_id)?;
        proposal.options[option as usize].vote_count = new_count;

        self.records
            .entry((proposal_id, option))
            .or_default()
            .push(VoteRecord {
                proposal: proposal_id,
                option,
                voter,
                amount,
            });

        info!(
            "Vote of {} by {} on proposal #{} option {}",
            amount, voter, proposal_id, option
        );
        Ok(())
    }

    /// Records for one option, in insertion order.
    pub fn records_for_option(&self, proposal: ProposalId, option: OptionIndex) -> &[VoteRecord] {
        self.records
            .get(&(proposal, option))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All records as a flat list, ordered by (proposal, option) then
    /// insertion.
    pub fn all_records(&self) -> Vec<VoteRecord> {
        self.records.values().flatten().cloned().collect()
    }
}
