//! Per-session display formatting: amounts and user-visible labels.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Renders a decimal amount for display (without the asset code).
pub trait AmountFormatter: Send + Sync {
    fn format_amount(&self, amount: Decimal) -> String;
}

/// Plain decimal formatter: truncates to `max_fraction_digits`, drops
/// trailing zeros, and groups the integer part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalAmountFormatter {
    pub max_fraction_digits: u32,
    pub grouping_separator: Option<char>,
    pub decimal_separator: char,
}

impl Default for DecimalAmountFormatter {
    fn default() -> Self {
        Self {
            max_fraction_digits: 6,
            grouping_separator: Some(','),
            decimal_separator: '.',
        }
    }
}

impl AmountFormatter for DecimalAmountFormatter {
    fn format_amount(&self, amount: Decimal) -> String {
        let rounded = amount
            .round_dp_with_strategy(self.max_fraction_digits, RoundingStrategy::ToZero)
            .normalize();
        let text = rounded.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&self.group(int_part));
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

impl DecimalAmountFormatter {
    fn group(&self, digits: &str) -> String {
        let sep = match self.grouping_separator {
            Some(sep) => sep,
            None => return digits.to_string(),
        };
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }
}

/// User-visible labels of the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationStrings {
    pub recipients_email: String,
    pub description: String,
    pub amount: String,
    pub fee: String,
    pub total: String,
    pub to_pay: String,
    pub to_receive: String,
    pub pay_recipients_fee: String,
    pub loading: String,
    pub undefined: String,
}

impl Default for ConfirmationStrings {
    fn default() -> Self {
        Self {
            recipients_email: "Recipient's email".to_string(),
            description: "Description".to_string(),
            amount: "Amount".to_string(),
            fee: "Fee".to_string(),
            total: "Total".to_string(),
            to_pay: "To pay".to_string(),
            to_receive: "To receive".to_string(),
            pay_recipients_fee: "Pay recipient's fee".to_string(),
            loading: "Loading...".to_string(),
            undefined: "Undefined".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fmt(s: &str) -> String {
        DecimalAmountFormatter::default().format_amount(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_whole_numbers() {
        assert_eq!(fmt("0"), "0");
        assert_eq!(fmt("100"), "100");
        assert_eq!(fmt("103.000"), "103");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(fmt("1000"), "1,000");
        assert_eq!(fmt("1234567.5"), "1,234,567.5");
        assert_eq!(fmt("999"), "999");
    }

    #[test]
    fn test_truncates_fraction() {
        assert_eq!(fmt("0.1234569"), "0.123456");
        assert_eq!(fmt("2.0000001"), "2");
    }

    #[test]
    fn test_negative() {
        assert_eq!(fmt("-1500.25"), "-1,500.25");
    }

    #[test]
    fn test_custom_separators() {
        let f = DecimalAmountFormatter {
            max_fraction_digits: 2,
            grouping_separator: Some(' '),
            decimal_separator: ',',
        };
        assert_eq!(f.format_amount(Decimal::from_str("12345.678").unwrap()), "12 345,67");
    }

    #[test]
    fn test_strings_partial_override() {
        let s: ConfirmationStrings =
            serde_json::from_str(r#"{ "to_pay": "A pagar", "fee": "Comisión" }"#).unwrap();
        assert_eq!(s.to_pay, "A pagar");
        assert_eq!(s.fee, "Comisión");
        assert_eq!(s.total, "Total");
    }
}
