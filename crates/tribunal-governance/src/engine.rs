//! The `GovernanceLedger` facade.
//!
//! One struct owns every component and exposes the public mutating
//! operations. All calls take `&mut self`, which serializes the
//! transaction log: no operation can interleave with another, and a
//! collaborator invoked mid-operation cannot re-enter. Internal state
//! is mutated before any external collaborator is called, except for
//! deposits (the transfer must confirm first) and the documented
//! withdraw rollback.

use std::sync::Arc;

use tribunal_ledger::{Account, BalanceLedger, NoopTransfer, ValueTransfer};
use tribunal_types::{AccountId, Credits, Timestamp};

use crate::error::GovernanceError;
use crate::events::{DomainEvent, EventSink, NullSink};
use crate::gates::{AccessControl, PauseGate, Permissive};
use crate::proposal::{OptionIndex, Proposal, ProposalId, ProposalRegistry};
use crate::settlement::{SettlementBook, SettlementOutcome};
use crate::snapshot::LedgerSnapshot;
use crate::voting::VoteBook;

/// The assembled governance ledger.
pub struct GovernanceLedger {
    ledger: BalanceLedger,
    proposals: ProposalRegistry,
    votes: VoteBook,
    settlements: SettlementBook,
    transfer: Arc<dyn ValueTransfer + Send + Sync>,
    access: Arc<dyn AccessControl>,
    pause: Arc<dyn PauseGate>,
    events: Arc<dyn EventSink>,
}

impl GovernanceLedger {
    /// Assemble an empty ledger with the given collaborators.
    pub fn new(
        transfer: Arc<dyn ValueTransfer + Send + Sync>,
        access: Arc<dyn AccessControl>,
        pause: Arc<dyn PauseGate>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            ledger: BalanceLedger::new(),
            proposals: ProposalRegistry::new(),
            votes: VoteBook::new(),
            settlements: SettlementBook::new(),
            transfer,
            access,
            pause,
            events,
        }
    }

    /// Ledger with no-op collaborators: transfers always succeed,
    /// everyone is an authority, voting is never paused, events are
    /// dropped.
    pub fn permissive() -> Self {
        Self::new(
            Arc::new(NoopTransfer),
            Arc::new(Permissive),
            Arc::new(Permissive),
            Arc::new(NullSink),
        )
    }

    /// Rebuild a ledger from a snapshot, re-attaching collaborators.
    pub fn from_snapshot(
        snapshot: LedgerSnapshot,
        transfer: Arc<dyn ValueTransfer + Send + Sync>,
        access: Arc<dyn AccessControl>,
        pause: Arc<dyn PauseGate>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            ledger: BalanceLedger::from_accounts(snapshot.accounts),
            proposals: ProposalRegistry::from_parts(
                snapshot.proposals,
                snapshot.next_proposal_id,
            ),
            votes: VoteBook::from_records(snapshot.vote_records),
            settlements: SettlementBook::from_parts(
                snapshot.outcomes,
                snapshot.winning_options,
            ),
            transfer,
            access,
            pause,
            events,
        }
    }

    /// Export every persisted table.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.ledger.accounts().clone(),
            proposals: self.proposals.proposals().clone(),
            next_proposal_id: self.proposals.next_id(),
            vote_records: self.votes.all_records(),
            outcomes: self.settlements.all_outcomes(),
            winning_options: self.settlements.winning_options().clone(),
        }
    }

    /// Deposit credits after the external transfer confirms.
    pub fn deposit(&mut self, account: AccountId, amount: Credits) -> Result<(), GovernanceError> {
        self.ledger.deposit(&*self.transfer, &account, amount)?;
        self.events.emit(DomainEvent::DepositMade { account, amount });
        Ok(())
    }

    /// Withdraw available credits through the external transfer.
    pub fn withdraw(&mut self, account: AccountId, amount: Credits) -> Result<(), GovernanceError> {
        self.ledger.withdraw(&*self.transfer, &account, amount)?;
        self.events
            .emit(DomainEvent::WithdrawalMade { account, amount });
        Ok(())
    }

    /// Create a staked proposal.
    pub fn create_proposal(
        &mut self,
        proposer: AccountId,
        description: String,
        stake_amount: Credits,
        option_descriptions: Vec<String>,
        duration_days: u64,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        let options = option_descriptions.len();
        let id = self.proposals.create(
            &mut self.ledger,
            proposer,
            description,
            stake_amount,
            option_descriptions,
            duration_days,
            now,
        )?;
        let end_time = self.proposals.get(id)?.end_time;
        self.events.emit(DomainEvent::ProposalCreated {
            proposal: id,
            proposer,
            stake_amount,
            options,
            end_time,
        });
        Ok(id)
    }

    /// Close a proposal to further voting.
    pub fn deactivate_proposal(&mut self, id: ProposalId) -> Result<(), GovernanceError> {
        if self.proposals.deactivate(id)? {
            self.events.emit(DomainEvent::ProposalStatusChanged {
                proposal: id,
                active: false,
                settled: false,
            });
        }
        Ok(())
    }

    /// Cast a vote. Rejected while the pause collaborator reports
    /// paused, independent of core logic.
    pub fn vote(
        &mut self,
        voter: AccountId,
        proposal: ProposalId,
        option: OptionIndex,
        amount: Credits,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if self.pause.is_paused() {
            return Err(GovernanceError::Paused);
        }
        self.votes.cast(
            &mut self.ledger,
            &mut self.proposals,
            voter,
            proposal,
            option,
            amount,
            now,
        )?;
        self.events.emit(DomainEvent::VoteCast {
            proposal,
            option,
            voter,
            amount,
        });
        Ok(())
    }

    /// Vote-driven settlement. Authority-gated.
    pub fn settle_rewards(
        &mut self,
        caller: AccountId,
        proposal: ProposalId,
        winning: OptionIndex,
    ) -> Result<Vec<SettlementOutcome>, GovernanceError> {
        self.require_authority(&caller)?;
        let outcomes = self.settlements.settle_rewards(
            &mut self.ledger,
            &mut self.proposals,
            &self.votes,
            proposal,
            winning,
        )?;
        self.emit_settlement(proposal, &outcomes);
        Ok(outcomes)
    }

    /// Quality-neutral settlement. Authority-gated.
    pub fn settle_average_quality(
        &mut self,
        caller: AccountId,
        proposal: ProposalId,
    ) -> Result<SettlementOutcome, GovernanceError> {
        self.require_authority(&caller)?;
        let outcome =
            self.settlements
                .settle_average_quality(&mut self.ledger, &mut self.proposals, proposal)?;
        self.emit_settlement(proposal, std::slice::from_ref(&outcome));
        Ok(outcome)
    }

    /// Above-expectations settlement. Authority-gated.
    pub fn settle_above_expectations(
        &mut self,
        caller: AccountId,
        proposal: ProposalId,
    ) -> Result<SettlementOutcome, GovernanceError> {
        self.require_authority(&caller)?;
        let outcome = self.settlements.settle_above_expectations(
            &mut self.ledger,
            &mut self.proposals,
            proposal,
        )?;
        self.emit_settlement(proposal, std::slice::from_ref(&outcome));
        Ok(outcome)
    }

    /// Penalty settlement. Authority-gated; additionally emits
    /// `PenaltyApplied` for a nonzero punishment.
    pub fn settle_below_expectations(
        &mut self,
        caller: AccountId,
        proposal: ProposalId,
    ) -> Result<SettlementOutcome, GovernanceError> {
        self.require_authority(&caller)?;
        let outcome = self.settlements.settle_below_expectations(
            &mut self.ledger,
            &mut self.proposals,
            proposal,
        )?;
        self.emit_settlement(proposal, std::slice::from_ref(&outcome));
        if outcome.delta < 0 {
            self.events.emit(DomainEvent::PenaltyApplied {
                proposal,
                account: outcome.account,
                amount: Credits::new((-outcome.delta) as u64),
            });
        }
        Ok(outcome)
    }

    fn require_authority(&self, caller: &AccountId) -> Result<(), GovernanceError> {
        if !self.access.is_authority(caller) {
            return Err(GovernanceError::Unauthorized(*caller));
        }
        Ok(())
    }

    fn emit_settlement(&self, proposal: ProposalId, outcomes: &[SettlementOutcome]) {
        for outcome in outcomes {
            self.events.emit(DomainEvent::SettlementRecorded {
                proposal,
                account: outcome.account,
                delta: outcome.delta,
            });
        }
        self.events.emit(DomainEvent::ProposalStatusChanged {
            proposal,
            active: false,
            settled: true,
        });
    }

    // --- Read surface ---

    /// Account state, empty for unknown accounts.
    pub fn account(&self, id: &AccountId) -> Account {
        self.ledger.account(id)
    }

    /// Total balance.
    pub fn balance(&self, id: &AccountId) -> Credits {
        self.ledger.balance(id)
    }

    /// Balance not backing any stake or open vote.
    pub fn available(&self, id: &AccountId) -> Credits {
        self.ledger.available(id)
    }

    /// A proposal record.
    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.proposals.get(id)
    }

    /// Whether a proposal is active.
    pub fn proposal_status(&self, id: ProposalId) -> Result<bool, GovernanceError> {
        self.proposals.status(id)
    }

    /// Number of options on a proposal.
    pub fn options_count(&self, id: ProposalId) -> Result<usize, GovernanceError> {
        self.proposals.options_count(id)
    }

    /// Running vote count of one option.
    pub fn option_vote_count(
        &self,
        id: ProposalId,
        option: OptionIndex,
    ) -> Result<Credits, GovernanceError> {
        self.proposals.option_vote_count(id, option)
    }

    /// Settlement outcomes recorded for a proposal.
    pub fn outcomes(&self, id: ProposalId) -> &[SettlementOutcome] {
        self.settlements.outcomes(id)
    }

    /// Winning option recorded by `settle_rewards`.
    pub fn winning_option(&self, id: ProposalId) -> Option<OptionIndex> {
        self.settlements.winning_option(id)
    }
}
