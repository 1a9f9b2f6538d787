// governance/src/dispatch.rs

//! Call and query dispatch.
//!
//! Inbound requests arrive as one JSON string with a `method` field
//! and a `params` object; they decode into closed enums so every
//! operation is matched exhaustively and unknown methods are a typed
//! error rather than a stray string.

use crate::abolition::AbolitionMachine;
use crate::candidate::{CandidateLedger, CandidateRecord};
use crate::host::{LedgerHost, TxContext};
use crate::params::GovernanceParams;
use crate::proposal::{abolish_key, AbolitionProposal};
use crate::{store, GovernanceError, GovernanceResult};
use ledger_core::{Address, Amount, Validator};
use serde::{Deserialize, Serialize};

const CALL_METHODS: &[&str] = &[
    "pledgeCoin",
    "voteForCandidate",
    "takebackCoin",
    "abolishValidator",
    "voteForAbolish",
    "quitAbolish",
];

const QUERY_METHODS: &[&str] = &["getValidators", "getCandidate", "getAbolishProposal"];

/// A state-mutating governance call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum Request {
    /// Apply or top up as candidate, pledging the attached coin amount.
    #[serde(rename = "pledgeCoin")]
    PledgeCoin,
    #[serde(rename = "voteForCandidate")]
    VoteForCandidate {
        address: String,
        #[serde(rename = "coinAmount")]
        coin_amount: String,
    },
    #[serde(rename = "takebackCoin")]
    TakebackCoin { amount: String },
    #[serde(rename = "abolishValidator")]
    AbolishValidator { address: String, proof: String },
    #[serde(rename = "voteForAbolish")]
    VoteForAbolish { address: String },
    #[serde(rename = "quitAbolish")]
    QuitAbolish { address: String },
}

/// A read-only query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum Query {
    #[serde(rename = "getValidators")]
    GetValidators,
    #[serde(rename = "getCandidate")]
    GetCandidate { address: String },
    #[serde(rename = "getAbolishProposal")]
    GetAbolishProposal { address: String },
}

/// Query result; the absent cases serialize as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Validators {
        current_validators: Vec<Validator>,
    },
    Candidate {
        candidate: Option<CandidateRecord>,
    },
    AbolishProposal {
        abolish_proposal: Option<AbolitionProposal>,
    },
}

/// The governance module facade: one entry point for calls, one for
/// queries.
pub struct GovernanceModule {
    candidates: CandidateLedger,
    abolition: AbolitionMachine,
}

impl GovernanceModule {
    pub fn new(params: GovernanceParams) -> Self {
        Self {
            candidates: CandidateLedger::new(params.clone()),
            abolition: AbolitionMachine::new(params),
        }
    }

    /// Executes one string-encoded call under the given transaction
    /// context.
    pub fn execute<H: LedgerHost>(
        &self,
        host: &mut H,
        ctx: &TxContext,
        input: &str,
    ) -> GovernanceResult<()> {
        match decode(input, CALL_METHODS)? {
            Request::PledgeCoin => self.candidates.apply_as_candidate(host, ctx),
            Request::VoteForCandidate {
                address,
                coin_amount,
            } => {
                let amount = parse_amount(&coin_amount)?;
                self.candidates.vote_for_candidate(host, ctx, &address, &amount)
            }
            Request::TakebackCoin { amount } => {
                let amount = parse_amount(&amount)?;
                self.candidates.take_back_coin(host, ctx, &amount)
            }
            Request::AbolishValidator { address, proof } => {
                self.abolition.propose(host, ctx, &address, &proof)
            }
            Request::VoteForAbolish { address } => {
                self.abolition.vote(host, ctx, &address).map(|_| ())
            }
            Request::QuitAbolish { address } => self.abolition.withdraw(host, ctx, &address),
        }
    }

    /// Answers one string-encoded read-only query with a serialized
    /// response.
    pub fn query<H: LedgerHost>(&self, host: &H, input: &str) -> GovernanceResult<String> {
        let response = match decode(input, QUERY_METHODS)? {
            Query::GetValidators => QueryResponse::Validators {
                current_validators: host.current_validators()?,
            },
            Query::GetCandidate { address } => QueryResponse::Candidate {
                candidate: host.candidate(&Address::new(address))?,
            },
            Query::GetAbolishProposal { address } => QueryResponse::AbolishProposal {
                abolish_proposal: store::load_record(host, &abolish_key(&Address::new(address)))?,
            },
        };
        serde_json::to_string(&response)
            .map_err(|e| GovernanceError::Store(format!("Failed to serialize query result: {e}")))
    }
}

/// Decodes an inbound request, distinguishing an unknown method from
/// malformed params.
fn decode<T: serde::de::DeserializeOwned>(input: &str, known: &[&str]) -> GovernanceResult<T> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| GovernanceError::ArgumentType(e.to_string()))?;
    let method = value
        .get("method")
        .and_then(|m| m.as_str())
        .ok_or_else(|| GovernanceError::ArgumentType("missing string field `method`".into()))?;
    if !known.contains(&method) {
        return Err(GovernanceError::UnsupportedOperation(method.to_string()));
    }
    serde_json::from_value(value).map_err(|e| GovernanceError::ArgumentType(e.to_string()))
}

fn parse_amount(raw: &str) -> GovernanceResult<Amount> {
    raw.parse::<Amount>()
        .map_err(|e| GovernanceError::ArgumentType(e.to_string()))
}
