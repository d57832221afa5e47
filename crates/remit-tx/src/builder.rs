//! Transaction builder.
//!
//! Collects operations for a source account and wraps them, together with
//! the builder parameters (time bounds, salt, memo), into an unsigned
//! envelope bound to the network id.

use crate::network::{NetworkParams, TxBuilderParams};
use crate::types::*;
use crate::TxError;
use remit_types::AccountId;

/// Builder for transactions.
pub struct TransactionBuilder {
    network_params: NetworkParams,
    source_account: AccountId,
    params: TxBuilderParams,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new(
        network_params: NetworkParams,
        source_account: AccountId,
        params: TxBuilderParams,
    ) -> Self {
        Self {
            network_params,
            source_account,
            params,
            operations: Vec::new(),
        }
    }

    /// Add an operation, optionally with its own source account.
    pub fn add_operation(mut self, body: OperationBody, source: Option<AccountId>) -> Self {
        self.operations.push(Operation {
            source_account: source,
            body,
        });
        self
    }

    /// Build the unsigned envelope.
    pub fn build(self) -> Result<TransactionEnvelope, TxError> {
        if self.operations.is_empty() {
            return Err(TxError::NoOperations);
        }
        if self.operations.len() > MAX_OPERATIONS {
            return Err(TxError::TooManyOperations {
                max: MAX_OPERATIONS,
                got: self.operations.len(),
            });
        }

        let bounds = self.params.time_bounds;
        if bounds.max_time != 0 && bounds.min_time > bounds.max_time {
            return Err(TxError::InvalidTimeBounds {
                min: bounds.min_time,
                max: bounds.max_time,
            });
        }

        let tx = Transaction {
            source_account: self.source_account,
            salt: self.params.salt,
            time_bounds: bounds,
            memo: self.params.memo,
            operations: self.operations,
        };

        Ok(TransactionEnvelope::new(self.network_params.network_id(), tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::ResolvedFee;
    use remit_types::BalanceId;

    fn params(min_time: u64, max_time: u64) -> TxBuilderParams {
        TxBuilderParams {
            time_bounds: TimeBounds { min_time, max_time },
            salt: 42,
            memo: None,
        }
    }

    fn payment() -> OperationBody {
        OperationBody::Payment(PaymentOp {
            source_balance_id: BalanceId::from_bytes([2u8; 32]),
            destination: AccountId::from_bytes([3u8; 32]),
            amount: 5,
            fee_data: PaymentFeeData {
                source_fee: ResolvedFee::default(),
                destination_fee: ResolvedFee::default(),
                source_pays_for_dest: false,
            },
            subject: String::new(),
            reference: String::new(),
        })
    }

    fn builder(p: TxBuilderParams) -> TransactionBuilder {
        TransactionBuilder::new(
            NetworkParams::new("Test", 0),
            AccountId::from_bytes([1u8; 32]),
            p,
        )
    }

    #[test]
    fn test_build_single_operation() {
        let source = AccountId::from_bytes([1u8; 32]);
        let env = builder(params(0, 100))
            .add_operation(payment(), Some(source))
            .build()
            .unwrap();

        assert_eq!(env.network_id, NetworkParams::new("Test", 0).network_id());
        assert_eq!(env.tx.salt, 42);
        assert_eq!(env.tx.source_account, source);
        assert_eq!(env.tx.operations.len(), 1);
        assert_eq!(env.tx.operations[0].source_account, Some(source));
        assert!(env.signatures.is_empty());
    }

    #[test]
    fn test_no_operations() {
        assert!(matches!(
            builder(params(0, 100)).build(),
            Err(TxError::NoOperations)
        ));
    }

    #[test]
    fn test_too_many_operations() {
        let mut b = builder(params(0, 100));
        for _ in 0..=MAX_OPERATIONS {
            b = b.add_operation(payment(), None);
        }
        assert!(matches!(
            b.build(),
            Err(TxError::TooManyOperations { got: 101, .. })
        ));
    }

    #[test]
    fn test_invalid_time_bounds() {
        let result = builder(params(200, 100)).add_operation(payment(), None).build();
        assert!(matches!(
            result,
            Err(TxError::InvalidTimeBounds { min: 200, max: 100 })
        ));
    }

    #[test]
    fn test_unbounded_max_time_allowed() {
        let result = builder(params(200, 0)).add_operation(payment(), None).build();
        assert!(result.is_ok());
    }
}
