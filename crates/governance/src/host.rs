// governance/src/host.rs

//! Collaborator interfaces supplied by the enclosing ledger.
//!
//! The governance module owns no storage and no coin balances; it
//! reads and mutates state exclusively through these traits, and every
//! operation receives the ambient transaction context explicitly.

use crate::candidate::{CandidateRecord, StakeDelta};
use crate::{GovernanceError, GovernanceResult};
use ledger_core::{Address, Amount, Timestamp, Validator};

/// Ambient context of the call being executed: who sent it, the block
/// timestamp it executes under, and the coin amount attached to it.
/// Immutable for the duration of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxContext {
    pub sender: Address,
    pub block_timestamp: Timestamp,
    pub pay_amount: Amount,
}

impl TxContext {
    pub fn new(sender: Address, block_timestamp: Timestamp, pay_amount: Amount) -> Self {
        Self {
            sender,
            block_timestamp,
            pay_amount,
        }
    }
}

/// Key-value metadata store, keyed by string, holding serialized
/// records.
pub trait MetadataStore {
    fn load(&self, key: &str) -> GovernanceResult<Option<String>>;

    fn store(&mut self, key: &str, value: &str) -> GovernanceResult<()>;

    fn delete(&mut self, key: &str) -> GovernanceResult<()>;
}

/// Native coin transfer primitive.
pub trait CoinTransfer {
    fn pay(&mut self, dest: &Address, amount: &Amount) -> GovernanceResult<()>;
}

/// The externally maintained validator set and candidate/delegation
/// ledger. The candidate namespace is owned by the registry; this
/// module only adjusts pledges through deltas.
pub trait ValidatorRegistry {
    /// Ordered snapshot of the current validator set. Immutable for
    /// the duration of one call.
    fn current_validators(&self) -> GovernanceResult<Vec<Validator>>;

    /// Candidate record for an address, if one exists.
    fn candidate(&self, address: &Address) -> GovernanceResult<Option<CandidateRecord>>;

    /// Credit or debit a candidate's pledge.
    fn adjust_candidate(&mut self, address: &Address, delta: &StakeDelta) -> GovernanceResult<()>;

    /// Record delegated voting weight toward a candidate.
    fn set_vote_weight(&mut self, candidate: &Address, amount: &Amount) -> GovernanceResult<()>;
}

/// Address-format validation, owned by the host chain.
pub trait AddressCheck {
    fn is_valid_address(&self, raw: &str) -> bool;
}

/// Everything a governance operation needs from the host.
pub trait LedgerHost: MetadataStore + CoinTransfer + ValidatorRegistry + AddressCheck {}

impl<T: MetadataStore + CoinTransfer + ValidatorRegistry + AddressCheck> LedgerHost for T {}

/// Validates an inbound address parameter and wraps it.
pub fn checked_address<H: AddressCheck + ?Sized>(host: &H, raw: &str) -> GovernanceResult<Address> {
    if !host.is_valid_address(raw) {
        return Err(GovernanceError::InvalidAddress(raw.to_string()));
    }
    Ok(Address::new(raw))
}

/// Linear membership scan over the per-call validator snapshot.
pub fn is_validator(validators: &[Validator], address: &Address) -> bool {
    validators.iter().any(|v| v.address == *address)
}
