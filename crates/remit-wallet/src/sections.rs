//! Display sections of the confirmation screen.
//!
//! Sections are display-agnostic: every cell carries a hint, a typed value
//! and an identifier the UI routes edits back with. They are never
//! persisted and are recomputed in full on every state change.

use crate::breakdown::{build_breakdown, BreakdownRow, BreakdownSection};
use crate::format::{AmountFormatter, ConfirmationStrings};
use crate::model::{ConfirmationState, PaymentIntent};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellIdentifier {
    Recipient,
    Description,
    Amount,
    Fee,
    Total,
    PayRecipientFee,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellType {
    Text(String),
    BoolSwitch(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellModel {
    pub hint: String,
    pub cell_type: CellType,
    pub identifier: CellIdentifier,
    pub is_disabled: bool,
}

impl CellModel {
    fn text(hint: &str, value: String, identifier: CellIdentifier) -> Self {
        Self {
            hint: hint.to_string(),
            cell_type: CellType::Text(value),
            identifier,
            is_disabled: false,
        }
    }

    /// Text value, if this is a text cell.
    pub fn text_value(&self) -> Option<&str> {
        match &self.cell_type {
            CellType::Text(s) => Some(s),
            CellType::BoolSwitch(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionModel {
    pub title: String,
    pub cells: Vec<CellModel>,
}

impl SectionModel {
    pub fn cell(&self, identifier: CellIdentifier) -> Option<&CellModel> {
        self.cells.iter().find(|c| c.identifier == identifier)
    }
}

/// Recipient, to-pay and to-receive sections for `intent` under `state`.
pub fn render_sections(
    intent: &PaymentIntent,
    state: &ConfirmationState,
    formatter: &dyn AmountFormatter,
    strings: &ConfirmationStrings,
) -> Vec<SectionModel> {
    SectionRenderer { formatter, strings }.render(intent, state)
}

/// Renders the recipient, to-pay and to-receive sections.
pub struct SectionRenderer<'a> {
    pub formatter: &'a dyn AmountFormatter,
    pub strings: &'a ConfirmationStrings,
}

impl SectionRenderer<'_> {
    pub fn render(&self, intent: &PaymentIntent, state: &ConfirmationState) -> Vec<SectionModel> {
        let breakdown = build_breakdown(intent, state);
        vec![
            self.recipient_section(intent, state),
            self.breakdown_section(&self.strings.to_pay, &breakdown.to_pay),
            self.breakdown_section(&self.strings.to_receive, &breakdown.to_receive),
        ]
    }

    fn recipient_section(&self, intent: &PaymentIntent, state: &ConfirmationState) -> SectionModel {
        let recipient = state
            .requestor_email
            .clone()
            .unwrap_or_else(|| self.strings.loading.clone());
        let mut cells = vec![CellModel::text(
            &self.strings.recipients_email,
            recipient,
            CellIdentifier::Recipient,
        )];

        let subject = intent.recipient_subject().and_then(|s| s.subject);
        if let Some(subject) = subject.filter(|s| !s.is_empty()) {
            cells.push(CellModel::text(
                &self.strings.description,
                subject,
                CellIdentifier::Description,
            ));
        }

        SectionModel {
            title: String::new(),
            cells,
        }
    }

    fn breakdown_section(&self, title: &str, section: &BreakdownSection) -> SectionModel {
        let cells = section.rows.iter().map(|row| self.cell(row)).collect();
        SectionModel {
            title: title.to_string(),
            cells,
        }
    }

    fn amount_text(&self, amount: Decimal, asset: &str) -> String {
        format!("{} {}", self.formatter.format_amount(amount), asset)
    }

    fn cell(&self, row: &BreakdownRow) -> CellModel {
        match row {
            BreakdownRow::Amount { amount, asset } => CellModel::text(
                &self.strings.amount,
                self.amount_text(*amount, asset),
                CellIdentifier::Amount,
            ),
            BreakdownRow::Fee {
                amount,
                asset,
                disabled,
            } => CellModel {
                is_disabled: *disabled,
                ..CellModel::text(
                    &self.strings.fee,
                    self.amount_text(*amount, asset),
                    CellIdentifier::Fee,
                )
            },
            BreakdownRow::Total { amount, asset } => CellModel::text(
                &self.strings.total,
                self.amount_text(*amount, asset),
                CellIdentifier::Total,
            ),
            BreakdownRow::PayRecipientFee(value) => CellModel {
                hint: self.strings.pay_recipients_fee.clone(),
                cell_type: CellType::BoolSwitch(*value),
                identifier: CellIdentifier::PayRecipientFee,
                is_disabled: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DecimalAmountFormatter;
    use remit_tx::FeeSchedule;

    fn intent(description: &str) -> PaymentIntent {
        PaymentIntent {
            sender_balance_id: String::new(),
            recipient_account_id: String::new(),
            amount: Decimal::from(100),
            asset: "USD".to_string(),
            description: description.to_string(),
            reference: String::new(),
            sender_fee: FeeSchedule::new(Decimal::ONE, Decimal::ZERO, "USD"),
            recipient_fee: FeeSchedule::new(Decimal::TWO, Decimal::ZERO, "USD"),
        }
    }

    fn render(intent: &PaymentIntent, state: &ConfirmationState) -> Vec<SectionModel> {
        render_sections(
            intent,
            state,
            &DecimalAmountFormatter::default(),
            &ConfirmationStrings::default(),
        )
    }

    fn texts(section: &SectionModel) -> Vec<String> {
        section
            .cells
            .iter()
            .map(|c| match &c.cell_type {
                CellType::Text(s) => s.clone(),
                CellType::BoolSwitch(v) => format!("switch:{}", v),
            })
            .collect()
    }

    #[test]
    fn test_three_sections_in_order() {
        let sections = render(&intent(""), &ConfirmationState::default());
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["", "To pay", "To receive"]);
    }

    #[test]
    fn test_end_to_end_rows() {
        let sections = render(&intent(""), &ConfirmationState::default());
        assert_eq!(texts(&sections[1]), vec!["100 USD", "3 USD", "103 USD"]);
        assert_eq!(
            texts(&sections[2]),
            vec!["100 USD", "2 USD", "100 USD", "switch:true"]
        );

        let fee = sections[2].cell(CellIdentifier::Fee).unwrap();
        assert!(fee.is_disabled);
        assert!(!sections[1].cell(CellIdentifier::Fee).unwrap().is_disabled);
    }

    #[test]
    fn test_recipient_loading_placeholder() {
        let sections = render(&intent(""), &ConfirmationState::default());
        let recipient = sections[0].cell(CellIdentifier::Recipient).unwrap();
        assert_eq!(recipient.hint, "Recipient's email");
        assert_eq!(recipient.text_value(), Some("Loading..."));
    }

    #[test]
    fn test_recipient_email_and_description() {
        let state = ConfirmationState {
            requestor_email: Some("bob@example.com".into()),
            source_pays_recipient_fee: true,
        };
        let sections = render(
            &intent(r#"{"email":"bob@example.com","subject":"Invoice #7"}"#),
            &state,
        );
        assert_eq!(texts(&sections[0]), vec!["bob@example.com", "Invoice #7"]);
        assert_eq!(
            sections[0].cell(CellIdentifier::Description).unwrap().hint,
            "Description"
        );
    }

    #[test]
    fn test_empty_subject_has_no_description_row() {
        let sections = render(&intent(r#"{"subject":""}"#), &ConfirmationState::default());
        assert_eq!(sections[0].cells.len(), 1);

        let sections = render(&intent("plain text"), &ConfirmationState::default());
        assert_eq!(sections[0].cells.len(), 1);
    }
}
