// governance/src/candidate.rs

//! Candidate pledge ledger: self-nomination, top-up, withdrawal and
//! the delegation entry point.

use crate::host::{checked_address, CoinTransfer, LedgerHost, TxContext, ValidatorRegistry};
use crate::params::GovernanceParams;
use crate::{GovernanceError, GovernanceResult};
use ledger_core::{Address, Amount};
use serde::{Deserialize, Serialize};

/// A candidate's pledge record, as held by the validator registry.
///
/// Invariant: a present record has `pledge == 0` (logically removed)
/// or `pledge >= minimum_pledge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub address: Address,
    pub pledge: Amount,
}

/// A signed adjustment to a candidate's pledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakeDelta {
    Credit(Amount),
    Debit(Amount),
}

/// Looks up a candidate record, treating a zero-pledge record as
/// absent: forfeited or fully-withdrawn candidates are not eligible.
pub fn eligible_candidate<H>(host: &H, address: &Address) -> GovernanceResult<Option<CandidateRecord>>
where
    H: ValidatorRegistry + ?Sized,
{
    Ok(host.candidate(address)?.filter(|c| !c.pledge.is_zero()))
}

/// Candidate ledger operations
pub struct CandidateLedger {
    params: GovernanceParams,
}

impl CandidateLedger {
    pub fn new(params: GovernanceParams) -> Self {
        Self { params }
    }

    /// Self-nomination via the coin amount attached to the call.
    ///
    /// First-time applicants (no record, or an emptied record) must
    /// attach at least the minimum pledge; existing candidates may top
    /// up by any amount. The stake itself is already escrowed by the
    /// caller context, so the only side effect is the registry credit.
    pub fn apply_as_candidate<H: LedgerHost>(
        &self,
        host: &mut H,
        ctx: &TxContext,
    ) -> GovernanceResult<()> {
        if eligible_candidate(host, &ctx.sender)?.is_none()
            && ctx.pay_amount < self.params.minimum_pledge
        {
            return Err(GovernanceError::InsufficientPledge {
                minimum: self.params.minimum_pledge.clone(),
                offered: ctx.pay_amount.clone(),
            });
        }

        host.adjust_candidate(&ctx.sender, &StakeDelta::Credit(ctx.pay_amount.clone()))?;
        tracing::info!(candidate = %ctx.sender, pledged = %ctx.pay_amount, "Candidate pledge credited");
        Ok(())
    }

    /// Voluntary pledge withdrawal.
    ///
    /// A partial withdrawal is honored only when it leaves the minimum
    /// pledge intact; otherwise it degrades to a full exit and the
    /// entire current pledge is returned, whatever amount was asked.
    pub fn take_back_coin<H: LedgerHost>(
        &self,
        host: &mut H,
        ctx: &TxContext,
        amount: &Amount,
    ) -> GovernanceResult<()> {
        let record = host
            .candidate(&ctx.sender)?
            .ok_or_else(|| GovernanceError::NotACandidate(ctx.sender.clone()))?;

        let full_exit = match record.pledge.checked_sub(amount) {
            None => true,
            Some(remaining) => remaining < self.params.minimum_pledge,
        };

        let withdrawn = if full_exit {
            record.pledge.clone()
        } else {
            amount.clone()
        };

        host.adjust_candidate(&ctx.sender, &StakeDelta::Debit(withdrawn.clone()))?;
        transfer(host, &ctx.sender, &withdrawn)?;
        tracing::info!(
            candidate = %ctx.sender,
            withdrawn = %withdrawn,
            full_exit,
            "Candidate pledge withdrawn"
        );
        Ok(())
    }

    /// Delegation entry point: validates preconditions and forwards the
    /// weight bookkeeping to the registry.
    pub fn vote_for_candidate<H: LedgerHost>(
        &self,
        host: &mut H,
        ctx: &TxContext,
        candidate_raw: &str,
        amount: &Amount,
    ) -> GovernanceResult<()> {
        let candidate = checked_address(host, candidate_raw)?;
        eligible_candidate(host, &candidate)?
            .ok_or_else(|| GovernanceError::NotACandidate(candidate.clone()))?;

        host.set_vote_weight(&candidate, amount)?;
        tracing::info!(voter = %ctx.sender, candidate = %candidate, amount = %amount, "Vote delegated");
        Ok(())
    }
}

/// Transfer with the zero short-circuit: paying nothing is a no-op
/// success.
fn transfer<H: CoinTransfer + ?Sized>(
    host: &mut H,
    dest: &Address,
    amount: &Amount,
) -> GovernanceResult<()> {
    if amount.is_zero() {
        return Ok(());
    }
    host.pay(dest, amount)?;
    tracing::debug!(dest = %dest, amount = %amount, "Coin transfer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;

    fn params() -> GovernanceParams {
        GovernanceParams {
            minimum_pledge: Amount::from_u64(1_000),
            ..GovernanceParams::default()
        }
    }

    fn ctx(sender: &str, pay: u64) -> TxContext {
        TxContext::new(Address::new(sender), 0, Amount::from_u64(pay))
    }

    #[test]
    fn first_pledge_below_minimum_is_rejected() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();

        let err = ledger
            .apply_as_candidate(&mut host, &ctx("alice", 999))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::InsufficientPledge { .. }));
        assert_eq!(host.candidate_pledge("alice"), None);
    }

    #[test]
    fn pledge_and_top_up() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();

        ledger.apply_as_candidate(&mut host, &ctx("alice", 1_000)).unwrap();
        assert_eq!(host.candidate_pledge("alice"), Some(Amount::from_u64(1_000)));

        // Existing candidates may top up by any amount.
        ledger.apply_as_candidate(&mut host, &ctx("alice", 5)).unwrap();
        assert_eq!(host.candidate_pledge("alice"), Some(Amount::from_u64(1_005)));
    }

    #[test]
    fn emptied_record_is_a_fresh_applicant_again() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();
        host.insert_candidate("alice", 0);

        let err = ledger
            .apply_as_candidate(&mut host, &ctx("alice", 10))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::InsufficientPledge { .. }));
    }

    #[test]
    fn partial_withdrawal_keeps_minimum_intact() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();
        host.insert_candidate("alice", 1_500);

        ledger
            .take_back_coin(&mut host, &ctx("alice", 0), &Amount::from_u64(500))
            .unwrap();
        assert_eq!(host.candidate_pledge("alice"), Some(Amount::from_u64(1_000)));
        assert_eq!(host.transfers(), &[(Address::new("alice"), Amount::from_u64(500))]);
    }

    #[test]
    fn withdrawal_below_minimum_degrades_to_full_exit() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();
        host.insert_candidate("alice", 1_500);

        // 1_500 - 600 = 900 < 1_000: the whole pledge comes back.
        ledger
            .take_back_coin(&mut host, &ctx("alice", 0), &Amount::from_u64(600))
            .unwrap();
        assert_eq!(host.candidate_pledge("alice"), Some(Amount::zero()));
        assert_eq!(host.transfers(), &[(Address::new("alice"), Amount::from_u64(1_500))]);
    }

    #[test]
    fn over_withdrawal_also_degrades_to_full_exit() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();
        host.insert_candidate("alice", 1_500);

        ledger
            .take_back_coin(&mut host, &ctx("alice", 0), &Amount::from_u64(9_999))
            .unwrap();
        assert_eq!(host.candidate_pledge("alice"), Some(Amount::zero()));
        assert_eq!(host.transfers(), &[(Address::new("alice"), Amount::from_u64(1_500))]);
    }

    #[test]
    fn withdrawal_without_a_record_fails() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();

        let err = ledger
            .take_back_coin(&mut host, &ctx("alice", 0), &Amount::from_u64(10))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::NotACandidate(_)));
    }

    #[test]
    fn delegation_requires_an_eligible_candidate() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();

        let err = ledger
            .vote_for_candidate(&mut host, &ctx("bob", 0), "alice", &Amount::from_u64(50))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::NotACandidate(_)));

        host.insert_candidate("alice", 1_000);
        ledger
            .vote_for_candidate(&mut host, &ctx("bob", 0), "alice", &Amount::from_u64(50))
            .unwrap();
        assert_eq!(host.vote_weight("alice"), Some(Amount::from_u64(50)));
    }

    #[test]
    fn delegation_rejects_malformed_addresses() {
        let ledger = CandidateLedger::new(params());
        let mut host = MemoryHost::new();

        let err = ledger
            .vote_for_candidate(&mut host, &ctx("bob", 0), "bad addr!", &Amount::from_u64(50))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidAddress(_)));
    }
}
