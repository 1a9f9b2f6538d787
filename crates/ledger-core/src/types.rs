// ledger-core/src/types.rs

use crate::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in host time units (the enclosing ledger supplies it;
/// the reference chain uses microseconds since the Unix epoch)
pub type Timestamp = u64;

/// Account address.
///
/// Opaque to this layer: format validation is performed by the host's
/// address checker, so the newtype only guarantees that equality and
/// hashing are stable for use as a record key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// One entry of the validator snapshot supplied by the registry at the
/// start of a call. The snapshot is ordered and immutable for the
/// duration of that call; index positions matter to forfeit
/// redistribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub address: Address,
    pub weight: Amount,
}

impl Validator {
    pub fn new(address: Address, weight: Amount) -> Self {
        Self { address, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_serializes_as_plain_string() {
        let address = Address::new("buQmvalidator1");
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"buQmvalidator1\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn validator_snapshot_entry_round_trips() {
        let entry = Validator::new(Address::new("v1"), Amount::from_u64(1000));
        let json = serde_json::to_string(&entry).unwrap();
        let back: Validator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
