//! Payment confirmation data model.

use remit_tx::FeeSchedule;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pending payment, fixed for the lifetime of one confirmation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// 'B...' balance the payment is drawn from.
    pub sender_balance_id: String,
    /// 'G...' account receiving the payment.
    pub recipient_account_id: String,
    pub amount: Decimal,
    pub asset: String,
    /// Free text, or a JSON object carrying `email` / `subject`.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reference: String,
    pub sender_fee: FeeSchedule,
    pub recipient_fee: FeeSchedule,
}

impl PaymentIntent {
    /// The structured subject embedded in `description`, if it is one.
    pub fn recipient_subject(&self) -> Option<RecipientSubject> {
        RecipientSubject::parse(&self.description)
    }
}

/// JSON payload a payment request can embed in its description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientSubject {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl RecipientSubject {
    pub fn parse(description: &str) -> Option<Self> {
        if description.is_empty() {
            return None;
        }
        serde_json::from_str(description).ok()
    }
}

/// Mutable confirmation state, owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationState {
    /// Display identity of the recipient; `None` while still loading.
    pub requestor_email: Option<String>,
    /// Sender absorbs the recipient's fee.
    pub source_pays_recipient_fee: bool,
}

impl Default for ConfirmationState {
    fn default() -> Self {
        Self {
            requestor_email: None,
            source_pays_recipient_fee: true,
        }
    }
}

impl ConfirmationState {
    /// Set the requestor identity unless one is already set.
    ///
    /// Returns whether the value was taken.
    pub fn offer_requestor_email(&mut self, email: String) -> bool {
        if self.requestor_email.is_some() {
            return false;
        }
        self.requestor_email = Some(email);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_pays_recipient_fee() {
        let state = ConfirmationState::default();
        assert!(state.source_pays_recipient_fee);
        assert!(state.requestor_email.is_none());
    }

    #[test]
    fn test_first_writer_wins() {
        let mut state = ConfirmationState::default();
        assert!(state.offer_requestor_email("first@example.com".into()));
        assert!(!state.offer_requestor_email("second@example.com".into()));
        assert_eq!(state.requestor_email.as_deref(), Some("first@example.com"));
    }

    #[test]
    fn test_parse_subject_object() {
        let s = RecipientSubject::parse(r#"{"email":"a@b.c","subject":"rent"}"#).unwrap();
        assert_eq!(s.email.as_deref(), Some("a@b.c"));
        assert_eq!(s.subject.as_deref(), Some("rent"));
    }

    #[test]
    fn test_parse_subject_partial_and_extra_keys() {
        let s = RecipientSubject::parse(r#"{"subject":"rent","invoice":12}"#).unwrap();
        assert!(s.email.is_none());
        assert_eq!(s.subject.as_deref(), Some("rent"));
    }

    #[test]
    fn test_plain_text_is_not_a_subject() {
        assert!(RecipientSubject::parse("dinner on friday").is_none());
        assert!(RecipientSubject::parse("").is_none());
        assert!(RecipientSubject::parse("\"quoted\"").is_none());
    }

    #[test]
    fn test_intent_from_json() {
        let json = r#"{
            "sender_balance_id": "B...",
            "recipient_account_id": "G...",
            "amount": "100",
            "asset": "USD",
            "sender_fee": { "fixed": "1", "percent": "0", "asset": "USD" },
            "recipient_fee": { "fixed": "2", "percent": "0", "asset": "USD" }
        }"#;
        let intent: PaymentIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.amount, Decimal::from(100));
        assert_eq!(intent.description, "");
        assert!(intent.recipient_subject().is_none());
    }
}
