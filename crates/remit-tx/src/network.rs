//! Network parameters needed to build a transaction.

use crate::types::TimeBounds;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifies the network a transaction is valid on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub passphrase: String,
    /// Server clock minus local clock, in seconds.
    #[serde(default)]
    pub time_offset: i64,
}

impl NetworkParams {
    pub fn new(passphrase: &str, time_offset: i64) -> Self {
        Self {
            passphrase: passphrase.to_string(),
            time_offset,
        }
    }

    /// SHA-256 of the network passphrase.
    pub fn network_id(&self) -> [u8; 32] {
        Sha256::digest(self.passphrase.as_bytes()).into()
    }
}

/// Per-transaction builder parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxBuilderParams {
    pub time_bounds: TimeBounds,
    pub salt: u64,
    pub memo: Option<String>,
}

/// Network information fetched once per confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub precision: u32,
    pub network_params: NetworkParams,
    pub tx_expiration_period: u64,
}

impl NetworkInfo {
    /// Builder parameters for a transaction sent at `send_time`.
    ///
    /// The transaction expires `tx_expiration_period` seconds after the send
    /// time as seen by the server clock.
    pub fn tx_builder_params(&self, send_time: SystemTime) -> TxBuilderParams {
        let local = send_time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let server = if self.network_params.time_offset >= 0 {
            local.saturating_add(self.network_params.time_offset as u64)
        } else {
            local.saturating_sub(self.network_params.time_offset.unsigned_abs())
        };

        TxBuilderParams {
            time_bounds: TimeBounds {
                min_time: 0,
                max_time: server.saturating_add(self.tx_expiration_period),
            },
            salt: rand::random(),
            memo: None,
        }
    }
}
