//! Domain events.
//!
//! Every state transition emits an event through the sink
//! collaborator. Notification delivery is not this crate's concern;
//! the sink is called after internal state is fully updated.

use std::sync::Mutex;

use tribunal_types::{AccountId, Credits, Timestamp};

use crate::proposal::{OptionIndex, ProposalId};

/// Structured payload for one state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    DepositMade {
        account: AccountId,
        amount: Credits,
    },
    WithdrawalMade {
        account: AccountId,
        amount: Credits,
    },
    ProposalCreated {
        proposal: ProposalId,
        proposer: AccountId,
        stake_amount: Credits,
        options: usize,
        end_time: Timestamp,
    },
    ProposalStatusChanged {
        proposal: ProposalId,
        active: bool,
        settled: bool,
    },
    VoteCast {
        proposal: ProposalId,
        option: OptionIndex,
        voter: AccountId,
        amount: Credits,
    },
    SettlementRecorded {
        proposal: ProposalId,
        account: AccountId,
        delta: i128,
    },
    PenaltyApplied {
        proposal: ProposalId,
        account: AccountId,
        amount: Credits,
    },
}

/// Event-sink collaborator.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Sink that records events in order. Test double.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far, in emission order.
    pub fn events(&self) -> Vec<DomainEvent> {
        // A poisoned lock still holds valid event data.
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: DomainEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
