// governance/src/proposal.rs

use crate::{GovernanceError, GovernanceResult};
use ledger_core::{Address, Timestamp};
use serde::{Deserialize, Serialize};

/// Metadata key prefix for abolition proposals.
pub const ABOLISH_KEY_PREFIX: &str = "abolish_";

/// Metadata key for the proposal targeting `malicious`. One active
/// proposal per target.
pub fn abolish_key(malicious: &Address) -> String {
    format!("{ABOLISH_KEY_PREFIX}{malicious}")
}

/// A pending proposal to remove a malicious validator.
///
/// Exists only while pending: resolution, proposer withdrawal and
/// lazily-discovered expiry all delete the record. Field names are the
/// persisted wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbolitionProposal {
    /// The validator this proposal seeks to remove.
    pub malicious: Address,
    /// Free-form proof supplied by the proposer.
    pub reason: String,
    /// Who opened the proposal; the only address allowed to withdraw it.
    pub proposer: Address,
    /// Absolute deadline, in host time units.
    pub voting_expired_time: Timestamp,
    /// Distinct voters in vote order. The proposer votes implicitly at
    /// creation.
    pub ballot: Vec<Address>,
}

impl AbolitionProposal {
    pub fn new(
        malicious: Address,
        reason: String,
        proposer: Address,
        now: Timestamp,
        window: Timestamp,
    ) -> Self {
        Self {
            malicious,
            reason,
            ballot: vec![proposer.clone()],
            proposer,
            voting_expired_time: now.saturating_add(window),
        }
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.ballot.contains(voter)
    }

    /// Appends a vote, rejecting duplicates.
    pub fn record_vote(&mut self, voter: Address) -> GovernanceResult<()> {
        if self.has_voted(&voter) {
            return Err(GovernanceError::DuplicateVote(voter));
        }
        self.ballot.push(voter);
        Ok(())
    }

    /// Whether the voting window has closed, judged against the
    /// externally supplied block timestamp.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.voting_expired_time
    }

    /// Re-arms an expired proposal without resetting its ballot. The
    /// deadline becomes the refreshing call's timestamp.
    pub fn refresh_expiry(&mut self, now: Timestamp) {
        self.voting_expired_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> AbolitionProposal {
        AbolitionProposal::new(
            Address::new("mal"),
            "equivocated at height 42".to_string(),
            Address::new("v1"),
            1_000,
            500,
        )
    }

    #[test]
    fn proposer_is_the_first_ballot_entry() {
        let p = proposal();
        assert_eq!(p.ballot, vec![Address::new("v1")]);
        assert_eq!(p.voting_expired_time, 1_500);
    }

    #[test]
    fn duplicate_votes_are_rejected() {
        let mut p = proposal();
        p.record_vote(Address::new("v2")).unwrap();
        let err = p.record_vote(Address::new("v2")).unwrap_err();
        assert!(matches!(err, GovernanceError::DuplicateVote(_)));
        assert_eq!(p.ballot.len(), 2);
    }

    #[test]
    fn expiry_is_strictly_after_the_deadline() {
        let p = proposal();
        assert!(!p.is_expired(1_500));
        assert!(p.is_expired(1_501));
    }

    #[test]
    fn persisted_field_names_are_stable() {
        let p = proposal();
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("malicious").is_some());
        assert!(json.get("reason").is_some());
        assert!(json.get("proposer").is_some());
        assert!(json.get("voting_expired_time").is_some());
        assert!(json.get("ballot").is_some());
    }

    #[test]
    fn key_is_prefixed_with_the_target_address() {
        assert_eq!(abolish_key(&Address::new("mal")), "abolish_mal");
    }
}
