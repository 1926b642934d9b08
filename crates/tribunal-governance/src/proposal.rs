//! Proposal lifecycle management.
//!
//! Proposals go through states: Active -> Inactive -> Settled.
//! No transition reverses and Settled is terminal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use tribunal_ledger::BalanceLedger;
use tribunal_types::{AccountId, Credits, Timestamp, SECONDS_PER_DAY};

use crate::error::GovernanceError;

/// Sequential, immutable proposal identifier.
pub type ProposalId = u64;

/// Index of an option within its proposal, in creation order.
pub type OptionIndex = u32;

/// One votable option of a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalOption {
    /// Option description
    pub description: String,
    /// Sum of amounts voted for this option
    pub vote_count: Credits,
}

/// A staked proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique proposal ID
    pub id: ProposalId,
    /// Proposer account
    pub proposer: AccountId,
    /// Description
    pub description: String,
    /// Credits the proposer staked at creation
    pub stake_amount: Credits,
    /// Whether the proposal is open (deadline not enforced here)
    pub active: bool,
    /// One-way flag set by exactly one settlement operation
    pub settled: bool,
    /// True iff the proposal carries a stake
    pub wagered: bool,
    /// Absolute voting deadline
    pub end_time: Timestamp,
    /// Options in creation order
    pub options: Vec<ProposalOption>,
}

impl Proposal {
    /// Whether a vote at `now` is acceptable.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.active && now < self.end_time
    }

    /// Sum of vote counts over all options.
    pub fn total_stake(&self) -> Credits {
        self.options.iter().map(|o| o.vote_count).sum()
    }

    /// Look up an option by index.
    pub fn option(&self, index: OptionIndex) -> Option<&ProposalOption> {
        self.options.get(index as usize)
    }
}

/// Arena of proposals keyed by their sequential id.
///
/// Exclusively owns Proposal and ProposalOption records. Constructed
/// once and passed explicitly to the components that need it.
#[derive(Debug, Default, Clone)]
pub struct ProposalRegistry {
    proposals: BTreeMap<ProposalId, Proposal>,
    next_id: ProposalId,
}

impl ProposalRegistry {
    /// Create an empty registry. Ids start at 1.
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild a registry from snapshotted state.
    pub fn from_parts(proposals: BTreeMap<ProposalId, Proposal>, next_id: ProposalId) -> Self {
        Self { proposals, next_id }
    }

    /// Create a proposal, locking the stake from the proposer's
    /// available balance.
    ///
    /// A zero stake is allowed and marks the proposal as unwagered.
    pub fn create(
        &mut self,
        ledger: &mut BalanceLedger,
        proposer: AccountId,
        description: String,
        stake_amount: Credits,
        option_descriptions: Vec<String>,
        duration_days: u64,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if option_descriptions.len() < 2 {
            return Err(GovernanceError::TooFewOptions(option_descriptions.len()));
        }

        if !stake_amount.is_zero() {
            ledger.lock_for_proposal(&proposer, stake_amount)?;
        }

        let id = self.next_id;
        self.next_id += 1;

        let options = option_descriptions
            .into_iter()
            .map(|description| ProposalOption {
                description,
                vote_count: Credits::ZERO,
            })
            .collect();

        let end_time = now.saturating_add(duration_days.saturating_mul(SECONDS_PER_DAY));
        self.proposals.insert(
            id,
            Proposal {
                id,
                proposer,
                description,
                stake_amount,
                active: true,
                settled: false,
                wagered: !stake_amount.is_zero(),
                end_time,
                options,
            },
        );

        info!(
            "Created proposal #{} by {} with stake {}, deadline {}",
            id, proposer, stake_amount, end_time
        );
        Ok(id)
    }

    /// Close a proposal to further voting. Idempotent and
    /// irreversible; there is no re-activation path.
    ///
    /// Returns whether the call changed state.
    pub fn deactivate(&mut self, id: ProposalId) -> Result<bool, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;

        if !proposal.active {
            return Ok(false);
        }
        proposal.active = false;
        info!("Deactivated proposal #{}", id);
        Ok(true)
    }

    /// Whether the proposal is active.
    pub fn status(&self, id: ProposalId) -> Result<bool, GovernanceError> {
        Ok(self.get(id)?.active)
    }

    /// Number of options on the proposal.
    pub fn options_count(&self, id: ProposalId) -> Result<usize, GovernanceError> {
        Ok(self.get(id)?.options.len())
    }

    /// Running vote count of one option.
    pub fn option_vote_count(
        &self,
        id: ProposalId,
        option: OptionIndex,
    ) -> Result<Credits, GovernanceError> {
        let proposal = self.get(id)?;
        proposal
            .option(option)
            .map(|o| o.vote_count)
            .ok_or(GovernanceError::OptionNotFound {
                proposal: id,
                option,
            })
    }

    /// Look up a proposal.
    pub fn get(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> Result<&mut Proposal, GovernanceError> {
        self.proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// All proposals, in id order.
    pub fn proposals(&self) -> &BTreeMap<ProposalId, Proposal> {
        &self.proposals
    }

    /// Next id that will be assigned.
    pub fn next_id(&self) -> ProposalId {
        self.next_id
    }
}
