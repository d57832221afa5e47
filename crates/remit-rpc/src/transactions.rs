//! Transaction submission.

use crate::client::RpcClient;
use crate::error::RpcError;
use async_trait::async_trait;
use base64::Engine;
use remit_tx::{TransactionEnvelope, TransactionSigner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Acknowledgement of an accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Transaction hash, hex.
    pub hash: String,
}

/// Signs and sends transactions.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    async fn send_transaction(&self, envelope: TransactionEnvelope) -> Result<SubmitReceipt, RpcError>;
}

#[derive(Serialize)]
struct SubmitRequest {
    tx: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    data: SubmitResource,
}

#[derive(Deserialize)]
struct SubmitResource {
    #[serde(default)]
    id: Option<String>,
}

/// Sender backed by `POST /v3/transactions`; signs with `signer` first.
pub struct HttpTransactionSender {
    client: Arc<RpcClient>,
    signer: Arc<dyn TransactionSigner>,
}

impl HttpTransactionSender {
    pub const ENDPOINT: &'static str = "/v3/transactions";

    pub fn new(client: Arc<RpcClient>, signer: Arc<dyn TransactionSigner>) -> Self {
        Self { client, signer }
    }
}

/// Base64 of the JSON envelope, as the API expects it.
pub fn encode_envelope(envelope: &TransactionEnvelope) -> Result<String, RpcError> {
    let json = envelope.to_json()?;
    Ok(base64::engine::general_purpose::STANDARD.encode(json))
}

#[async_trait]
impl TransactionSender for HttpTransactionSender {
    async fn send_transaction(
        &self,
        mut envelope: TransactionEnvelope,
    ) -> Result<SubmitReceipt, RpcError> {
        envelope.sign(self.signer.as_ref())?;
        let local_hash = envelope.hash_hex()?;

        let request = SubmitRequest {
            tx: encode_envelope(&envelope)?,
        };
        log::debug!("submitting transaction {}", local_hash);

        let resp: SubmitResponse = self.client.post(Self::ENDPOINT, &request).await?;
        Ok(SubmitReceipt {
            hash: resp.data.id.unwrap_or(local_hash),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remit_tx::{TimeBounds, Transaction};
    use remit_types::AccountId;

    #[test]
    fn test_encode_envelope_is_base64_json() {
        let env = TransactionEnvelope::new(
            [0u8; 32],
            Transaction {
                source_account: AccountId::from_bytes([1u8; 32]),
                salt: 3,
                time_bounds: TimeBounds::default(),
                memo: None,
                operations: Vec::new(),
            },
        );
        let encoded = encode_envelope(&env).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(value["tx"]["salt"], 3);
    }

    #[test]
    fn test_parse_submit_response() {
        let resp: SubmitResponse =
            serde_json::from_str(r#"{ "data": { "id": "abcd", "type": "transactions" } }"#).unwrap();
        assert_eq!(resp.data.id.as_deref(), Some("abcd"));
    }
}
