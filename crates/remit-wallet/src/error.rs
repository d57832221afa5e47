//! Payment confirmation error types.

use remit_rpc::RpcError;
use remit_tx::TxError;
use remit_types::{AmountError, StrKeyError};
use thiserror::Error;

/// Failure turning an intent into a transaction. Terminal for the attempt.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("invalid sender balance id: {0}")]
    InvalidBalanceId(#[source] StrKeyError),

    #[error("invalid recipient account id: {0}")]
    InvalidAccountId(#[source] StrKeyError),

    #[error("amount conversion failed: {0}")]
    Amount(#[from] AmountError),

    #[error("transaction build failed: {0}")]
    Build(#[from] TxError),
}

/// Transport or validation failure while sending a transaction.
#[derive(Debug, Error)]
#[error("submission failed: {0}")]
pub struct SubmissionError(#[from] pub RpcError);

/// Identity directory failure. Never fatal; degrades to a placeholder.
#[derive(Debug, Error)]
#[error("identity lookup failed: {0}")]
pub struct IdentityResolutionError(#[from] pub RpcError);

#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error("network info unavailable: {0}")]
    NetworkInfo(#[source] RpcError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("payment already submitted")]
    AlreadySubmitted,

    #[error("confirmation engine stopped")]
    EngineStopped,
}
