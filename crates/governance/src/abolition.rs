// governance/src/abolition.rs

//! The abolition proposal state machine: propose, vote, tally,
//! resolve, withdraw.
//!
//! A proposal is pending from creation until it passes quorum, its
//! proposer withdraws it, or its expiry is discovered on a later
//! touch; all three delete the record, after which a fresh proposal
//! may be opened against the same target.

use crate::candidate::{eligible_candidate, StakeDelta};
use crate::host::{checked_address, is_validator, LedgerHost, TxContext};
use crate::params::GovernanceParams;
use crate::proposal::{abolish_key, AbolitionProposal};
use crate::slashing::distribute_forfeit;
use crate::{store, GovernanceError, GovernanceResult};
use ledger_core::{Address, Amount, Validator};

/// Outcome of a `voteForAbolish` call. Only `Pending` and `Passed`
/// mutate the ballot; the other two are the non-error "nothing to
/// vote on" cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// No proposal on record; it may have passed or expired already.
    ProposalAbsent,
    /// The voting window had closed; the stale record was removed.
    Expired,
    /// Vote recorded, quorum not yet reached.
    Pending,
    /// Quorum reached: forfeit redistributed, proposal removed.
    Passed,
}

/// Abolition proposal operations
pub struct AbolitionMachine {
    params: GovernanceParams,
}

impl AbolitionMachine {
    pub fn new(params: GovernanceParams) -> Self {
        Self { params }
    }

    /// Opens (or refreshes) a removal proposal against `malicious`.
    ///
    /// Both sender and target must be current validators and the
    /// target must hold an eligible candidate record. Re-proposing a
    /// still-pending target is a no-op success; re-proposing past the
    /// deadline re-arms the expiry without touching the ballot.
    pub fn propose<H: LedgerHost>(
        &self,
        host: &mut H,
        ctx: &TxContext,
        malicious_raw: &str,
        proof: &str,
    ) -> GovernanceResult<()> {
        let malicious = checked_address(host, malicious_raw)?;
        let validators = host.current_validators()?;

        if !is_validator(&validators, &ctx.sender) {
            return Err(GovernanceError::NotAValidator(ctx.sender.clone()));
        }
        if !is_validator(&validators, &malicious) {
            return Err(GovernanceError::NotAValidator(malicious));
        }
        eligible_candidate(host, &malicious)?
            .ok_or_else(|| GovernanceError::NotACandidate(malicious.clone()))?;

        let key = abolish_key(&malicious);
        if let Some(mut proposal) = store::load_record::<AbolitionProposal, _>(host, &key)? {
            if ctx.block_timestamp >= proposal.voting_expired_time {
                tracing::info!(malicious = %malicious, "Refreshing expired abolition proposal");
                proposal.refresh_expiry(ctx.block_timestamp);
                store::store_record(host, &key, &proposal)?;
            } else {
                tracing::info!(malicious = %malicious, "Abolition already proposed");
            }
            return Ok(());
        }

        let proposal = AbolitionProposal::new(
            malicious.clone(),
            proof.to_string(),
            ctx.sender.clone(),
            ctx.block_timestamp,
            self.params.abolition_window,
        );
        store::store_record(host, &key, &proposal)?;
        tracing::info!(proposer = %ctx.sender, malicious = %malicious, "New abolition proposal");
        Ok(())
    }

    /// Casts a vote and tallies it.
    ///
    /// An absent proposal and a discovered expiry are reported as
    /// outcomes, not errors; the latter also deletes the stale record.
    pub fn vote<H: LedgerHost>(
        &self,
        host: &mut H,
        ctx: &TxContext,
        malicious_raw: &str,
    ) -> GovernanceResult<VoteOutcome> {
        let malicious = checked_address(host, malicious_raw)?;
        let key = abolish_key(&malicious);

        let Some(mut proposal) = store::load_record::<AbolitionProposal, _>(host, &key)? else {
            tracing::info!(
                malicious = %malicious,
                "Abolition proposal not on record, voting may have passed or expired"
            );
            return Ok(VoteOutcome::ProposalAbsent);
        };

        // Pulling the pledge is allowed while a proposal is pending, so
        // an emptied record here still resolves (with nothing left to
        // forfeit); only a missing record is an error.
        let candidate = host
            .candidate(&malicious)?
            .ok_or_else(|| GovernanceError::NotACandidate(malicious.clone()))?;

        let validators = host.current_validators()?;
        if !is_validator(&validators, &ctx.sender) {
            return Err(GovernanceError::NoPermission(ctx.sender.clone()));
        }

        if proposal.is_expired(ctx.block_timestamp) {
            tracing::info!(malicious = %malicious, "Voting window closed, clearing abolition proposal");
            store::delete_record(host, &key)?;
            return Ok(VoteOutcome::Expired);
        }

        proposal.record_vote(ctx.sender.clone())?;

        // Non-validator votes count at half weight: the discount is
        // taken once on the aggregate count and floored, not per vote.
        let total = proposal.ballot.len() as u64;
        let non_validator_votes = proposal
            .ballot
            .iter()
            .filter(|&voter| !is_validator(&validators, voter))
            .count() as u64;
        let valid_votes = total - non_validator_votes / 2;
        let quorum = self.params.quorum_threshold(validators.len());
        tracing::debug!(total, non_validator_votes, valid_votes, quorum, "Abolition tally");

        if valid_votes < quorum {
            store::store_record(host, &key, &proposal)?;
            return Ok(VoteOutcome::Pending);
        }

        // Forfeit is captured once here and applied consistently to
        // both the payouts and the final deduction.
        self.resolve(host, &validators, &malicious, &candidate.pledge)?;
        store::delete_record(host, &key)?;
        tracing::info!(
            malicious = %malicious,
            forfeit = %candidate.pledge,
            "Abolition passed, pledge forfeited"
        );
        Ok(VoteOutcome::Passed)
    }

    /// Slashes the malicious validator and redistributes its pledge.
    ///
    /// Shares are credited only to validators that already hold a
    /// candidate record; the registry cannot create sub-minimum
    /// records for the others.
    fn resolve<H: LedgerHost>(
        &self,
        host: &mut H,
        validators: &[Validator],
        malicious: &Address,
        forfeit: &Amount,
    ) -> GovernanceResult<()> {
        let shares = distribute_forfeit(validators, malicious, forfeit)?;
        for share in shares {
            if host.candidate(&share.validator)?.is_some() {
                host.adjust_candidate(&share.validator, &StakeDelta::Credit(share.amount))?;
            }
        }
        host.adjust_candidate(malicious, &StakeDelta::Debit(forfeit.clone()))?;
        Ok(())
    }

    /// Proposer-only withdrawal; deletes the proposal unconditionally.
    pub fn withdraw<H: LedgerHost>(
        &self,
        host: &mut H,
        ctx: &TxContext,
        malicious_raw: &str,
    ) -> GovernanceResult<()> {
        let malicious = checked_address(host, malicious_raw)?;
        let key = abolish_key(&malicious);

        let proposal: AbolitionProposal = store::load_record(host, &key)?
            .ok_or_else(|| GovernanceError::Store(format!("Failed to get {key} from metadata")))?;

        if ctx.sender != proposal.proposer {
            return Err(GovernanceError::NotProposer(ctx.sender.clone()));
        }

        store::delete_record(host, &key)?;
        tracing::info!(proposer = %ctx.sender, malicious = %malicious, "Abolition proposal withdrawn");
        Ok(())
    }
}
