// governance/src/params.rs

use ledger_core::{Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Default abolition voting window: 15 days in host microseconds.
pub const DEFAULT_ABOLITION_WINDOW: Timestamp = 15 * 24 * 60 * 60 * 1_000_000;

/// Default share of the current validator set required to pass an
/// abolition, in percent.
pub const DEFAULT_PASS_RATE_PERCENT: u64 = 70;

/// Default minimum pledge, in raw units. Embedders override this to
/// match the chain's configuration.
pub const DEFAULT_MINIMUM_PLEDGE: u64 = 1_000_000;

/// Governance configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Minimum pledge for a candidate record to stay eligible.
    pub minimum_pledge: Amount,
    /// Pass rate for abolition proposals, in percent of the current
    /// validator count.
    pub pass_rate_percent: u64,
    /// Voting window for abolition proposals, in host time units.
    pub abolition_window: Timestamp,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            minimum_pledge: Amount::from_u64(DEFAULT_MINIMUM_PLEDGE),
            pass_rate_percent: DEFAULT_PASS_RATE_PERCENT,
            abolition_window: DEFAULT_ABOLITION_WINDOW,
        }
    }
}

impl GovernanceParams {
    /// Votes required for an abolition to pass: round-half-up share of
    /// the current validator count, re-evaluated at every tally.
    ///
    /// Computed in integers as `(count * rate + 50) / 100`, which
    /// equals `floor(count * rate/100 + 0.5)`.
    pub fn quorum_threshold(&self, validator_count: usize) -> u64 {
        (validator_count as u64 * self.pass_rate_percent + 50) / 100
    }
}
