//! Transaction submission and cache invalidation.

use crate::error::SubmissionError;
use remit_rpc::{SubmitReceipt, TransactionSender};
use remit_tx::TransactionEnvelope;
use std::sync::Arc;

/// A cache that can be asked to refresh itself in the background.
pub trait CacheReload: Send + Sync {
    /// Fire-and-forget; must not block.
    fn reload(&self);
}

impl<F: Fn() + Send + Sync> CacheReload for F {
    fn reload(&self) {
        self()
    }
}

/// Sends transactions and invalidates history and balances on success.
#[derive(Clone)]
pub struct TransactionSubmitter {
    sender: Arc<dyn TransactionSender>,
    history: Arc<dyn CacheReload>,
    balances: Arc<dyn CacheReload>,
}

impl TransactionSubmitter {
    pub fn new(
        sender: Arc<dyn TransactionSender>,
        history: Arc<dyn CacheReload>,
        balances: Arc<dyn CacheReload>,
    ) -> Self {
        Self {
            sender,
            history,
            balances,
        }
    }

    /// Send `envelope` once. No retry.
    pub async fn submit(
        &self,
        envelope: TransactionEnvelope,
    ) -> Result<SubmitReceipt, SubmissionError> {
        match self.sender.send_transaction(envelope).await {
            Ok(receipt) => {
                log::info!("transaction {} accepted", receipt.hash);
                self.history.reload();
                self.balances.reload();
                Ok(receipt)
            }
            Err(e) => {
                log::error!("transaction submission failed: {}", e);
                Err(SubmissionError(e))
            }
        }
    }
}
