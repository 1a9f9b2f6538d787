// governance/src/slashing.rs

//! Forfeit redistribution arithmetic.
//!
//! A passed abolition forfeits the malicious validator's whole pledge
//! and splits it across the remaining validators. The split must be
//! bit-exact on every node: floor division for the per-validator
//! average, with the integer remainder assigned to a single position.

use crate::{GovernanceError, GovernanceResult};
use ledger_core::{Address, Amount, Validator};

/// One validator's share of a forfeited pledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForfeitShare {
    pub validator: Address,
    pub amount: Amount,
}

/// Computes the share plan for redistributing `forfeit` across the
/// validator snapshot.
///
/// The malicious validator receives nothing. Every other validator
/// receives `floor(forfeit / (N - 1))`; the division remainder is added
/// to the validator at index 0, unless the malicious validator occupies
/// index 0, in which case it goes to the validator at the last index.
pub fn distribute_forfeit(
    validators: &[Validator],
    malicious: &Address,
    forfeit: &Amount,
) -> GovernanceResult<Vec<ForfeitShare>> {
    if validators.len() <= 1 {
        return Err(GovernanceError::SingleValidatorSet);
    }

    let divisor = Amount::from_u64((validators.len() - 1) as u64);
    let average = forfeit
        .checked_div(&divisor)
        .ok_or_else(|| GovernanceError::Arithmetic("forfeit division by zero".into()))?;
    let remainder = forfeit
        .checked_rem(&divisor)
        .ok_or_else(|| GovernanceError::Arithmetic("forfeit remainder by zero".into()))?;

    let remainder_index = if validators[0].address == *malicious {
        validators.len() - 1
    } else {
        0
    };

    let mut shares = Vec::with_capacity(validators.len() - 1);
    for (index, validator) in validators.iter().enumerate() {
        if validator.address == *malicious {
            continue;
        }
        let amount = if index == remainder_index {
            average
                .checked_add(&remainder)
                .ok_or_else(|| GovernanceError::Arithmetic("share overflow".into()))?
        } else {
            average.clone()
        };
        shares.push(ForfeitShare {
            validator: validator.address.clone(),
            amount,
        });
    }

    Ok(shares)
}
