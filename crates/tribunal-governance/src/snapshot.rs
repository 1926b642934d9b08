//! Persisted state surface.
//!
//! A snapshot captures every table the ledger owns: accounts,
//! proposals (with their options), vote records, settlement outcomes,
//! and the winning-option table. Vote records and outcomes are stored
//! flat; each record carries its own keys, so the nested maps are
//! rebuilt on restore.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tribunal_ledger::Account;
use tribunal_types::AccountId;

use crate::proposal::{OptionIndex, Proposal, ProposalId};
use crate::settlement::SettlementOutcome;
use crate::voting::VoteRecord;

/// Complete serializable state of a [`crate::GovernanceLedger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub accounts: BTreeMap<AccountId, Account>,
    pub proposals: BTreeMap<ProposalId, Proposal>,
    pub next_proposal_id: ProposalId,
    pub vote_records: Vec<VoteRecord>,
    pub outcomes: Vec<SettlementOutcome>,
    pub winning_options: BTreeMap<ProposalId, OptionIndex>,
}
