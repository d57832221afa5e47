//! Core types shared by the remit crates.
//!
//! This crate provides the foundational pieces every other crate builds on:
//! RFC 4648 base32, versioned and checksummed identifiers (account ids,
//! balance ids, seeds), and conversion between decimal amounts and integer
//! base units at a network-declared precision.

pub mod amount;
pub mod base32;
pub mod strkey;

pub use amount::{to_base_units, AmountError, MAX_PRECISION};
pub use strkey::{AccountId, BalanceId, StrKeyError, VersionByte};
