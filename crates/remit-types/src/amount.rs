//! Conversion between decimal amounts and integer base units.
//!
//! The network declares a precision `p`; one whole unit of any asset equals
//! `10^p` base units. Converting to base units truncates toward zero, so a
//! value is never rounded up into more base units than it carries.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Largest scale representable by `Decimal`.
pub const MAX_PRECISION: u32 = 28;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must not be negative: {0}")]
    Negative(Decimal),

    #[error("amount {value} does not fit in u64 base units at precision {precision}")]
    Overflow { value: Decimal, precision: u32 },

    #[error("precision {0} exceeds maximum of {max}", max = MAX_PRECISION)]
    PrecisionTooLarge(u32),
}

fn scale_factor(precision: u32) -> Result<Decimal, AmountError> {
    if precision > MAX_PRECISION {
        return Err(AmountError::PrecisionTooLarge(precision));
    }
    Decimal::try_from_i128_with_scale(10i128.pow(precision), 0)
        .map_err(|_| AmountError::PrecisionTooLarge(precision))
}

/// Convert a decimal amount to base units at `precision`, truncating.
pub fn to_base_units(value: Decimal, precision: u32) -> Result<u64, AmountError> {
    if value.is_zero() {
        return scale_factor(precision).map(|_| 0);
    }
    if value.is_sign_negative() {
        return Err(AmountError::Negative(value));
    }

    let overflow = || AmountError::Overflow { value, precision };
    let scaled = value
        .checked_mul(scale_factor(precision)?)
        .ok_or_else(overflow)?;
    scaled.trunc().to_u64().ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_whole_amount() {
        assert_eq!(to_base_units(d("100"), 6), Ok(100_000_000));
    }

    #[test]
    fn test_fractional_amount() {
        assert_eq!(to_base_units(d("1.5"), 6), Ok(1_500_000));
        assert_eq!(to_base_units(d("0.000001"), 6), Ok(1));
    }

    #[test]
    fn test_truncates_excess_digits() {
        // 1.2345679 at precision 6 must not round up to 1234568.
        assert_eq!(to_base_units(d("1.2345679"), 6), Ok(1_234_567));
        assert_eq!(to_base_units(d("0.0000009"), 6), Ok(0));
    }

    #[test]
    fn test_zero_precision() {
        assert_eq!(to_base_units(d("42.99"), 0), Ok(42));
    }

    #[test]
    fn test_zero_and_negative_zero() {
        assert_eq!(to_base_units(Decimal::ZERO, 6), Ok(0));
        assert_eq!(to_base_units(d("-0"), 6), Ok(0));
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(
            to_base_units(d("-1"), 6),
            Err(AmountError::Negative(d("-1")))
        );
    }

    #[test]
    fn test_overflow() {
        // u64::MAX is ~1.8e19; 1e14 * 1e6 fits, 1e14 * 1e6 * 1e3 does not.
        assert!(to_base_units(d("100000000000000"), 6).is_ok());
        assert!(matches!(
            to_base_units(d("100000000000000"), 9),
            Err(AmountError::Overflow { precision: 9, .. })
        ));
    }

    #[test]
    fn test_precision_too_large() {
        assert_eq!(
            to_base_units(d("1"), 29),
            Err(AmountError::PrecisionTooLarge(29))
        );
    }

    #[test]
    fn test_deterministic() {
        let a = to_base_units(d("3.14159265"), 6);
        let b = to_base_units(d("3.14159265"), 6);
        assert_eq!(a, b);
        assert_eq!(a, Ok(3_141_592));
    }
}
