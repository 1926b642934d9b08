//! Tribunal Governance - staked proposals, credit voting, and
//! terminal settlement.
//!
//! This crate provides:
//! - Proposal lifecycle management (Active -> Inactive -> Settled)
//! - The voting ledger with per-option, append-only vote records
//! - The four mutually exclusive settlement policies
//! - The [`GovernanceLedger`] facade wiring the core to its external
//!   collaborators (value transfer, access control, pause gate,
//!   event sink)

pub mod engine;
pub mod error;
pub mod events;
pub mod gates;
pub mod proposal;
pub mod settlement;
pub mod snapshot;
pub mod voting;

pub use engine::GovernanceLedger;
pub use error::GovernanceError;
pub use events::{DomainEvent, EventSink, NullSink, RecordingSink};
pub use gates::{AccessControl, AuthoritySet, PauseGate, PauseSwitch, Permissive};
pub use proposal::{OptionIndex, Proposal, ProposalId, ProposalOption, ProposalRegistry};
pub use settlement::{SettlementBook, SettlementOutcome};
pub use snapshot::LedgerSnapshot;
pub use voting::{VoteBook, VoteRecord};
