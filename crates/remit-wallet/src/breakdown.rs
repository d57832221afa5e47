//! To-pay / to-receive breakdown of a payment.
//!
//! The breakdown is a pure function of the intent and the confirmation
//! state; it is rebuilt from scratch on every state change.

use crate::model::{ConfirmationState, PaymentIntent};
use rust_decimal::Decimal;

/// One row of a breakdown section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakdownRow {
    Amount { amount: Decimal, asset: String },
    Fee {
        amount: Decimal,
        asset: String,
        /// Fee is shown but absorbed by the other side.
        disabled: bool,
    },
    Total { amount: Decimal, asset: String },
    /// "Pay recipient's fee" switch.
    PayRecipientFee(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakdownSection {
    pub rows: Vec<BreakdownRow>,
}

impl BreakdownSection {
    pub fn amount(&self) -> Option<Decimal> {
        self.rows.iter().find_map(|row| match row {
            BreakdownRow::Amount { amount, .. } => Some(*amount),
            _ => None,
        })
    }

    pub fn fee(&self) -> Option<Decimal> {
        self.rows.iter().find_map(|row| match row {
            BreakdownRow::Fee { amount, .. } => Some(*amount),
            _ => None,
        })
    }

    pub fn total(&self) -> Option<Decimal> {
        self.rows.iter().find_map(|row| match row {
            BreakdownRow::Total { amount, .. } => Some(*amount),
            _ => None,
        })
    }

    /// Total row if present, otherwise the bare amount.
    pub fn effective_total(&self) -> Option<Decimal> {
        self.total().or_else(|| self.amount())
    }

    pub fn pay_recipient_fee(&self) -> Option<bool> {
        self.rows.iter().find_map(|row| match row {
            BreakdownRow::PayRecipientFee(v) => Some(*v),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentBreakdown {
    pub to_pay: BreakdownSection,
    pub to_receive: BreakdownSection,
}

/// Build the breakdown for `intent` under `state`.
pub fn build_breakdown(intent: &PaymentIntent, state: &ConfirmationState) -> PaymentBreakdown {
    PaymentBreakdown {
        to_pay: build_to_pay(intent, state),
        to_receive: build_to_receive(intent, state),
    }
}

fn build_to_pay(intent: &PaymentIntent, state: &ConfirmationState) -> BreakdownSection {
    let mut rows = vec![BreakdownRow::Amount {
        amount: intent.amount,
        asset: intent.asset.clone(),
    }];

    let mut fee = intent.sender_fee.total();
    if state.source_pays_recipient_fee {
        fee = fee.saturating_add(intent.recipient_fee.total());
    }

    if fee > Decimal::ZERO {
        let fee_asset = &intent.sender_fee.asset;
        rows.push(BreakdownRow::Fee {
            amount: fee,
            asset: fee_asset.clone(),
            disabled: false,
        });
        rows.push(BreakdownRow::Total {
            amount: intent.amount.saturating_add(fee),
            asset: fee_asset.clone(),
        });
    }

    BreakdownSection { rows }
}

fn build_to_receive(intent: &PaymentIntent, state: &ConfirmationState) -> BreakdownSection {
    let mut rows = vec![BreakdownRow::Amount {
        amount: intent.amount,
        asset: intent.asset.clone(),
    }];

    let fee = intent.recipient_fee.total();
    if fee > Decimal::ZERO {
        // Labelled with the sender's fee asset, matching what the sender sees.
        let label_asset = &intent.sender_fee.asset;

        let mut total = intent.amount;
        if !state.source_pays_recipient_fee {
            total = total.saturating_sub(fee);
        }
        total = total.max(Decimal::ZERO);

        rows.push(BreakdownRow::Fee {
            amount: fee,
            asset: label_asset.clone(),
            disabled: state.source_pays_recipient_fee,
        });
        rows.push(BreakdownRow::Total {
            amount: total,
            asset: label_asset.clone(),
        });
        rows.push(BreakdownRow::PayRecipientFee(state.source_pays_recipient_fee));
    }

    BreakdownSection { rows }
}
