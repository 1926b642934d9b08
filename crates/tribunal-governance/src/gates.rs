//! Access-control and pause collaborators.
//!
//! The core never implements authorization or pausing itself; it asks
//! these collaborators before executing the gated operations.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tribunal_types::AccountId;

/// Authorization collaborator consulted before settlement.
pub trait AccessControl: Send + Sync {
    fn is_authority(&self, caller: &AccountId) -> bool;
}

/// Pause collaborator consulted before voting.
pub trait PauseGate: Send + Sync {
    fn is_paused(&self) -> bool;
}

/// Everyone is an authority and nothing is paused. For tests and
/// single-operator deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Permissive;

impl AccessControl for Permissive {
    fn is_authority(&self, _caller: &AccountId) -> bool {
        true
    }
}

impl PauseGate for Permissive {
    fn is_paused(&self) -> bool {
        false
    }
}

/// Fixed set of authority accounts.
#[derive(Debug, Default, Clone)]
pub struct AuthoritySet {
    authorities: BTreeSet<AccountId>,
}

impl AuthoritySet {
    pub fn new(authorities: impl IntoIterator<Item = AccountId>) -> Self {
        Self {
            authorities: authorities.into_iter().collect(),
        }
    }
}

impl AccessControl for AuthoritySet {
    fn is_authority(&self, caller: &AccountId) -> bool {
        self.authorities.contains(caller)
    }
}

/// Toggleable pause switch.
#[derive(Debug, Default)]
pub struct PauseSwitch {
    paused: AtomicBool,
}

impl PauseSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }
}

impl PauseGate for PauseSwitch {
    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}
