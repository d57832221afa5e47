//! remit transaction construction.
//!
//! Provides fee schedule resolution into base units, typed payment operations
//! and transaction envelopes, a builder for assembling a transaction from
//! network parameters, and ed25519 signing of the resulting envelope.

pub mod types;
pub mod builder;
pub mod fee;
pub mod network;
pub mod sign;

pub use types::{
    DecoratedSignature, Operation, OperationBody, PaymentFeeData, PaymentOp,
    TimeBounds, Transaction, TransactionEnvelope,
};
pub use builder::TransactionBuilder;
pub use fee::{resolve_fee, FeeSchedule, ResolvedFee};
pub use network::{NetworkInfo, NetworkParams, TxBuilderParams};
pub use sign::{KeyPairSigner, TransactionSigner};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("transaction has no operations")]
    NoOperations,

    #[error("too many operations: max {max}, got {got}")]
    TooManyOperations { max: usize, got: usize },

    #[error("invalid time bounds: min {min} > max {max}")]
    InvalidTimeBounds { min: u64, max: u64 },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid seed: {0}")]
    InvalidSeed(#[from] remit_types::StrKeyError),
}
