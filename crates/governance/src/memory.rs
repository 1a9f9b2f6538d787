// governance/src/memory.rs

//! In-memory reference host.
//!
//! Backs every collaborator trait with plain maps; used by the test
//! suites and by embedders that want to dry-run governance calls
//! outside a real ledger.

use crate::candidate::{CandidateRecord, StakeDelta};
use crate::host::{AddressCheck, CoinTransfer, MetadataStore, ValidatorRegistry};
use crate::{GovernanceError, GovernanceResult};
use ledger_core::{Address, Amount, Validator};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryHost {
    metadata: HashMap<String, String>,
    candidates: HashMap<Address, Amount>,
    validators: Vec<Validator>,
    vote_weights: HashMap<Address, Amount>,
    transfers: Vec<(Address, Amount)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validator to the ordered snapshot.
    pub fn add_validator(&mut self, address: &str, weight: u64) {
        self.validators
            .push(Validator::new(Address::new(address), Amount::from_u64(weight)));
    }

    pub fn remove_validator(&mut self, address: &str) {
        let address = Address::new(address);
        self.validators.retain(|v| v.address != address);
    }

    /// Sets a candidate's pledge outright (test fixture, not a delta).
    pub fn insert_candidate(&mut self, address: &str, pledge: u64) {
        self.candidates
            .insert(Address::new(address), Amount::from_u64(pledge));
    }

    pub fn remove_candidate(&mut self, address: &str) {
        self.candidates.remove(&Address::new(address));
    }

    pub fn candidate_pledge(&self, address: &str) -> Option<Amount> {
        self.candidates.get(&Address::new(address)).cloned()
    }

    pub fn vote_weight(&self, candidate: &str) -> Option<Amount> {
        self.vote_weights.get(&Address::new(candidate)).cloned()
    }

    /// Coin transfers issued so far, in order.
    pub fn transfers(&self) -> &[(Address, Amount)] {
        &self.transfers
    }
}

impl MetadataStore for MemoryHost {
    fn load(&self, key: &str) -> GovernanceResult<Option<String>> {
        Ok(self.metadata.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> GovernanceResult<()> {
        self.metadata.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> GovernanceResult<()> {
        self.metadata.remove(key);
        Ok(())
    }
}

impl CoinTransfer for MemoryHost {
    fn pay(&mut self, dest: &Address, amount: &Amount) -> GovernanceResult<()> {
        self.transfers.push((dest.clone(), amount.clone()));
        Ok(())
    }
}

impl ValidatorRegistry for MemoryHost {
    fn current_validators(&self) -> GovernanceResult<Vec<Validator>> {
        Ok(self.validators.clone())
    }

    fn candidate(&self, address: &Address) -> GovernanceResult<Option<CandidateRecord>> {
        Ok(self.candidates.get(address).map(|pledge| CandidateRecord {
            address: address.clone(),
            pledge: pledge.clone(),
        }))
    }

    fn adjust_candidate(&mut self, address: &Address, delta: &StakeDelta) -> GovernanceResult<()> {
        match delta {
            StakeDelta::Credit(amount) => {
                let pledge = self
                    .candidates
                    .entry(address.clone())
                    .or_insert_with(Amount::zero);
                *pledge = pledge
                    .checked_add(amount)
                    .ok_or_else(|| GovernanceError::Arithmetic("pledge overflow".into()))?;
            }
            StakeDelta::Debit(amount) => {
                let pledge = self.candidates.get_mut(address).ok_or_else(|| {
                    GovernanceError::Store(format!("No candidate record for {address}"))
                })?;
                *pledge = pledge
                    .checked_sub(amount)
                    .ok_or_else(|| GovernanceError::Arithmetic("pledge underflow".into()))?;
            }
        }
        Ok(())
    }

    fn set_vote_weight(&mut self, candidate: &Address, amount: &Amount) -> GovernanceResult<()> {
        self.vote_weights.insert(candidate.clone(), amount.clone());
        Ok(())
    }
}

impl AddressCheck for MemoryHost {
    fn is_valid_address(&self, raw: &str) -> bool {
        !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
