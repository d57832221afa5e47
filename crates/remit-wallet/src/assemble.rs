//! Turns a confirmed intent into an unsigned payment transaction.

use crate::error::AssemblyError;
use crate::model::{ConfirmationState, PaymentIntent};
use remit_tx::{
    resolve_fee, NetworkInfo, OperationBody, PaymentFeeData, PaymentOp, TransactionBuilder,
    TransactionEnvelope,
};
use remit_types::{to_base_units, AccountId, BalanceId};
use std::time::SystemTime;

/// Assembles payments sent by `source_account`.
#[derive(Debug, Clone)]
pub struct TransactionAssembler {
    source_account: AccountId,
}

impl TransactionAssembler {
    pub fn new(source_account: AccountId) -> Self {
        Self { source_account }
    }

    /// Build the single-payment transaction for `intent`.
    ///
    /// Every step can fail independently; nothing is returned on failure.
    pub fn assemble(
        &self,
        intent: &PaymentIntent,
        state: &ConfirmationState,
        network_info: &NetworkInfo,
        send_time: SystemTime,
    ) -> Result<TransactionEnvelope, AssemblyError> {
        let precision = network_info.precision;
        let source_fee = resolve_fee(&intent.sender_fee, precision)?;
        let destination_fee = resolve_fee(&intent.recipient_fee, precision)?;
        let amount = to_base_units(intent.amount, precision)?;

        let source_balance_id: BalanceId = intent
            .sender_balance_id
            .parse()
            .map_err(AssemblyError::InvalidBalanceId)?;
        let destination: AccountId = intent
            .recipient_account_id
            .parse()
            .map_err(AssemblyError::InvalidAccountId)?;

        let payment = PaymentOp {
            source_balance_id,
            destination,
            amount,
            fee_data: PaymentFeeData {
                source_fee,
                destination_fee,
                source_pays_for_dest: state.source_pays_recipient_fee,
            },
            subject: intent.description.clone(),
            reference: intent.reference.clone(),
        };

        let envelope = TransactionBuilder::new(
            network_info.network_params.clone(),
            self.source_account,
            network_info.tx_builder_params(send_time),
        )
        .add_operation(OperationBody::Payment(payment), Some(self.source_account))
        .build()?;

        Ok(envelope)
    }
}
