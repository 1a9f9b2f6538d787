// ledger-core/src/amount.rs

use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Errors from amount parsing and arithmetic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid decimal amount: {0:?}")]
    InvalidDecimal(String),

    #[error("Amount underflow: {minuend} - {subtrahend}")]
    Underflow { minuend: String, subtrahend: String },

    #[error("Division by zero")]
    DivisionByZero,
}

/// Token amount (arbitrary precision, non-negative).
///
/// The wire form is a decimal string; internally a `BigUint` so that
/// every node derives bit-identical results from the same inputs.
/// All arithmetic is explicit and checked: subtraction reports
/// underflow, division and remainder report a zero divisor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

impl Amount {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    pub fn inner(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        Some(Amount(&self.0 + &other.0))
    }

    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if self.0 < other.0 {
            None
        } else {
            Some(Amount(&self.0 - &other.0))
        }
    }

    pub fn checked_mul(&self, other: &Amount) -> Option<Amount> {
        Some(Amount(&self.0 * &other.0))
    }

    /// Floor division. `None` when the divisor is zero.
    pub fn checked_div(&self, divisor: &Amount) -> Option<Amount> {
        if divisor.is_zero() {
            None
        } else {
            Some(Amount(&self.0 / &divisor.0))
        }
    }

    /// Remainder of floor division. `None` when the divisor is zero.
    pub fn checked_rem(&self, divisor: &Amount) -> Option<Amount> {
        if divisor.is_zero() {
            None
        } else {
            Some(Amount(&self.0 % &divisor.0))
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a plain decimal string. Signs, whitespace and radix
    /// prefixes are rejected so that wire amounts have one canonical
    /// form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::InvalidDecimal(s.to_string()));
        }
        let value = BigUint::from_str(s).map_err(|_| AmountError::InvalidDecimal(s.to_string()))?;
        Ok(Self(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_and_display_round_trip() {
        let amount: Amount = "12345678901234567890123456789".parse().unwrap();
        assert_eq!(amount.to_string(), "12345678901234567890123456789");
    }

    #[test]
    fn rejects_non_decimal_input() {
        assert!("".parse::<Amount>().is_err());
        assert!("-5".parse::<Amount>().is_err());
        assert!("0x10".parse::<Amount>().is_err());
        assert!(" 7".parse::<Amount>().is_err());
        assert!("1.5".parse::<Amount>().is_err());
    }

    #[test]
    fn checked_sub_underflow() {
        let a = Amount::from_u64(5);
        let b = Amount::from_u64(7);
        assert_eq!(b.checked_sub(&a), Some(Amount::from_u64(2)));
        assert_eq!(a.checked_sub(&b), None);
    }

    #[test]
    fn division_by_zero_is_none() {
        let a = Amount::from_u64(100);
        assert_eq!(a.checked_div(&Amount::zero()), None);
        assert_eq!(a.checked_rem(&Amount::zero()), None);
    }

    #[test]
    fn floor_division_and_remainder() {
        let forfeit = Amount::from_u64(101);
        let divisor = Amount::from_u64(4);
        assert_eq!(forfeit.checked_div(&divisor), Some(Amount::from_u64(25)));
        assert_eq!(forfeit.checked_rem(&divisor), Some(Amount::from_u64(1)));
    }

    #[test]
    fn serde_uses_the_decimal_string_wire_form() {
        let amount = Amount::from_u64(5_000);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"5000\"");
        let back: Amount = serde_json::from_str("\"5000\"").unwrap();
        assert_eq!(back, amount);
        assert!(serde_json::from_str::<Amount>("5000").is_err());
        assert!(serde_json::from_str::<Amount>("\"-5\"").is_err());
    }

    #[test]
    fn ordering_matches_numeric_value() {
        let small: Amount = "99".parse().unwrap();
        let large: Amount = "100".parse().unwrap();
        assert!(small < large);
        assert_eq!(small.cmp(&small), std::cmp::Ordering::Equal);
    }

    proptest! {
        #[test]
        fn display_parse_round_trip(v in any::<u128>()) {
            let amount = Amount::new(num_bigint::BigUint::from(v));
            let parsed: Amount = amount.to_string().parse().unwrap();
            prop_assert_eq!(parsed, amount);
        }

        #[test]
        fn add_then_sub_is_identity(a in any::<u64>(), b in any::<u64>()) {
            let a = Amount::from_u64(a);
            let b = Amount::from_u64(b);
            let sum = a.checked_add(&b).unwrap();
            prop_assert_eq!(sum.checked_sub(&b).unwrap(), a);
        }

        #[test]
        fn div_rem_reconstructs(n in any::<u64>(), d in 1u64..) {
            let n = Amount::from_u64(n);
            let d = Amount::from_u64(d);
            let q = n.checked_div(&d).unwrap();
            let r = n.checked_rem(&d).unwrap();
            let back = q.checked_mul(&d).unwrap().checked_add(&r).unwrap();
            prop_assert_eq!(back, n);
            prop_assert!(r < d);
        }
    }
}
