//! Fee schedules and their resolution into base units.
//!
//! A fee schedule is what the fee policy charges one side of a payment: a
//! fixed part plus a percent part, both already expressed as decimal amounts
//! of the fee asset. Resolution scales both parts by the network precision
//! using the same truncating rule as payment amounts.

use remit_types::{to_base_units, AmountError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Declared fee for one side of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub fixed: Decimal,
    pub percent: Decimal,
    pub asset: String,
}

impl FeeSchedule {
    pub fn new(fixed: Decimal, percent: Decimal, asset: &str) -> Self {
        Self {
            fixed,
            percent,
            asset: asset.to_string(),
        }
    }

    /// Fixed + percent, saturating at `Decimal::MAX`.
    pub fn total(&self) -> Decimal {
        self.fixed.saturating_add(self.percent)
    }
}

/// Fee schedule converted to integer base units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedFee {
    pub fixed: u64,
    pub percent: u64,
}

impl ResolvedFee {
    pub fn total(&self) -> Option<u64> {
        self.fixed.checked_add(self.percent)
    }
}

/// Resolve a fee schedule at the given network precision.
pub fn resolve_fee(schedule: &FeeSchedule, precision: u32) -> Result<ResolvedFee, AmountError> {
    Ok(ResolvedFee {
        fixed: to_base_units(schedule.fixed, precision)?,
        percent: to_base_units(schedule.percent, precision)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_resolve_simple() {
        let schedule = FeeSchedule::new(d("1"), d("0.25"), "USD");
        let fee = resolve_fee(&schedule, 6).unwrap();
        assert_eq!(fee.fixed, 1_000_000);
        assert_eq!(fee.percent, 250_000);
        assert_eq!(fee.total(), Some(1_250_000));
    }

    #[test]
    fn test_resolve_truncates() {
        let schedule = FeeSchedule::new(d("0.0000019"), d("0.1234569"), "USD");
        let fee = resolve_fee(&schedule, 6).unwrap();
        assert_eq!(fee.fixed, 1);
        assert_eq!(fee.percent, 123_456);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let schedule = FeeSchedule::new(d("2.5"), d("0.015"), "EUR");
        let first = resolve_fee(&schedule, 6).unwrap();
        let second = resolve_fee(&schedule, 6).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_depends_on_precision() {
        let schedule = FeeSchedule::new(d("1.5"), d("0"), "EUR");
        assert_eq!(resolve_fee(&schedule, 2).unwrap().fixed, 150);
        assert_eq!(resolve_fee(&schedule, 8).unwrap().fixed, 150_000_000);
    }

    #[test]
    fn test_zero_schedule() {
        let schedule = FeeSchedule::new(Decimal::ZERO, Decimal::ZERO, "USD");
        assert!(schedule.total().is_zero());
        assert_eq!(resolve_fee(&schedule, 6).unwrap(), ResolvedFee::default());
    }

    #[test]
    fn test_negative_fee_rejected() {
        let schedule = FeeSchedule::new(d("-1"), d("0"), "USD");
        assert!(matches!(
            resolve_fee(&schedule, 6),
            Err(AmountError::Negative(_))
        ));
    }

    #[test]
    fn test_total() {
        let schedule = FeeSchedule::new(d("1.1"), d("0.9"), "USD");
        assert_eq!(schedule.total(), d("2.0"));
    }

    #[test]
    fn test_schedule_from_json() {
        let json = r#"{"fixed":"0.5","percent":"0.01","asset":"BTC"}"#;
        let schedule: FeeSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule, FeeSchedule::new(d("0.5"), d("0.01"), "BTC"));
    }
}
