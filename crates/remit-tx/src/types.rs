//! Typed payment operations and transaction envelopes.
//!
//! Transactions are serialized as JSON for hashing and transport. Field
//! order is the struct declaration order, so the signature base of a
//! transaction is stable across runs.

use crate::fee::ResolvedFee;
use crate::TxError;
use remit_types::{AccountId, BalanceId};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Envelope type tag mixed into the signature base.
pub const ENVELOPE_TYPE_TX: u32 = 2;

/// Maximum number of operations in one transaction.
pub const MAX_OPERATIONS: usize = 100;

fn serialize_hex<S: Serializer, T: AsRef<[u8]>>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

// ─── Payment ────────────────────────────────────────────────────────────────

/// Fee data attached to a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentFeeData {
    pub source_fee: ResolvedFee,
    pub destination_fee: ResolvedFee,
    /// Sender also pays the destination fee.
    pub source_pays_for_dest: bool,
}

/// Payment from one balance to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOp {
    pub source_balance_id: BalanceId,
    /// Receiving account.
    pub destination: AccountId,
    /// Amount in base units.
    pub amount: u64,
    pub fee_data: PaymentFeeData,
    pub subject: String,
    pub reference: String,
}

// ─── Operations / Transaction ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationBody {
    Payment(PaymentOp),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    /// Overrides the transaction source account for this operation.
    pub source_account: Option<AccountId>,
    pub body: OperationBody,
}

/// Validity window in unix seconds (`max_time == 0` means unbounded).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub source_account: AccountId,
    pub salt: u64,
    pub time_bounds: TimeBounds,
    pub memo: Option<String>,
    pub operations: Vec<Operation>,
}

/// Signature together with the last 4 bytes of the signer's public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecoratedSignature {
    #[serde(serialize_with = "serialize_hex")]
    pub hint: [u8; 4],
    #[serde(serialize_with = "serialize_hex")]
    pub signature: Vec<u8>,
}

/// Transaction bound to a network, plus the signatures collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionEnvelope {
    #[serde(skip)]
    pub network_id: [u8; 32],
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn new(network_id: [u8; 32], tx: Transaction) -> Self {
        Self {
            network_id,
            tx,
            signatures: Vec::new(),
        }
    }

    /// Bytes covered by signatures: network id, envelope type, transaction.
    pub fn signature_base(&self) -> Result<Vec<u8>, TxError> {
        let tx_bytes = serde_json::to_vec(&self.tx)?;
        let mut base = Vec::with_capacity(32 + 4 + tx_bytes.len());
        base.extend_from_slice(&self.network_id);
        base.extend_from_slice(&ENVELOPE_TYPE_TX.to_be_bytes());
        base.extend_from_slice(&tx_bytes);
        Ok(base)
    }

    /// Transaction hash (SHA-256 of the signature base).
    pub fn hash(&self) -> Result<[u8; 32], TxError> {
        Ok(Sha256::digest(self.signature_base()?).into())
    }

    pub fn hash_hex(&self) -> Result<String, TxError> {
        self.hash().map(hex::encode)
    }

    /// JSON wire form (transaction + signatures).
    pub fn to_json(&self) -> Result<String, TxError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The single payment carried by this envelope, if any.
    pub fn payment(&self) -> Option<&PaymentOp> {
        self.tx.operations.iter().map(|op| &op.body).find_map(|body| match body {
            OperationBody::Payment(p) => Some(p),
        })
    }
}
