use thiserror::Error;
use tribunal_ledger::LedgerError;
use tribunal_types::AccountId;

use crate::proposal::{OptionIndex, ProposalId};

/// Errors that can occur in governance operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Proposal not found: {0}")]
    ProposalNotFound(ProposalId),

    #[error("Option {option} not found for proposal {proposal}")]
    OptionNotFound {
        proposal: ProposalId,
        option: OptionIndex,
    },

    #[error("A proposal needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("Proposal {0} is closed to voting")]
    ProposalClosed(ProposalId),

    #[error("Proposal {0} is still active; deactivate it before settlement")]
    StillActive(ProposalId),

    #[error("Proposal {0} is already settled")]
    AlreadySettled(ProposalId),

    #[error("Caller {0} is not a settlement authority")]
    Unauthorized(AccountId),

    #[error("Voting is paused")]
    Paused,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
