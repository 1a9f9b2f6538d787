// ledger-core/src/lib.rs

//! Foundation types for the deterministic ledger layer
//!
//! This crate provides:
//! - Arbitrary-precision token amounts with checked arithmetic
//! - Address and timestamp types shared across the ledger
//! - The validator snapshot entry consumed by governance operations

pub mod amount;
pub mod types;

pub use amount::{Amount, AmountError};
pub use types::{Address, Timestamp, Validator};
