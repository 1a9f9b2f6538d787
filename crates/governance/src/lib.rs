// governance/src/lib.rs

//! Delegated-proof-of-stake governance module
//!
//! This crate implements the governance surface of a DPoS ledger:
//! - Candidate self-nomination via pledged stake (minimum-pledge gated)
//! - Delegated voting weight toward candidates
//! - Weighted-quorum abolition of a malicious validator, with
//!   forfeiture and redistribution of its pledge
//!
//! Execution is strictly sequential and deterministic: every operation
//! is one synchronous read-modify-write against host-supplied state,
//! and all stake math goes through checked arbitrary-precision
//! arithmetic so that every node re-executing the same call derives an
//! identical result.

pub mod abolition;
pub mod candidate;
pub mod dispatch;
pub mod host;
pub mod memory;
pub mod params;
pub mod proposal;
pub mod slashing;
pub mod store;

pub use abolition::{AbolitionMachine, VoteOutcome};
pub use candidate::{CandidateLedger, CandidateRecord, StakeDelta};
pub use dispatch::{GovernanceModule, Query, QueryResponse, Request};
pub use host::{AddressCheck, CoinTransfer, LedgerHost, MetadataStore, TxContext, ValidatorRegistry};
pub use memory::MemoryHost;
pub use params::GovernanceParams;
pub use proposal::AbolitionProposal;
pub use slashing::{distribute_forfeit, ForfeitShare};

use ledger_core::{Address, Amount};

/// Result type for governance operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;

/// Errors that can occur during governance operations.
///
/// Every error aborts the whole call; the enclosing ledger rolls the
/// transaction back, so no partial state change survives a failure.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    #[error("Argument type error: {0}")]
    ArgumentType(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Insufficient pledge: minimum {minimum}, offered {offered}")]
    InsufficientPledge { minimum: Amount, offered: Amount },

    #[error("Not a validator candidate: {0}")]
    NotACandidate(Address),

    #[error("Not a current validator: {0}")]
    NotAValidator(Address),

    #[error("No permission: {0}")]
    NoPermission(Address),

    #[error("Not the proposer: {0}")]
    NotProposer(Address),

    #[error("Duplicate vote from {0}")]
    DuplicateVote(Address),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Validator set too small to redistribute a forfeit")]
    SingleValidatorSet,

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Coin transfer failed: {0}")]
    TransferFailed(String),
}
