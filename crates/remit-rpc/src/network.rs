//! Network info endpoint.

use crate::client::RpcClient;
use crate::error::RpcError;
use async_trait::async_trait;
use remit_tx::{NetworkInfo, NetworkParams};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[async_trait]
pub trait NetworkInfoFetcher: Send + Sync {
    async fn fetch_network_info(&self) -> Result<NetworkInfo, RpcError>;
}

#[derive(Deserialize)]
struct InfoResponse {
    data: InfoResource,
}

#[derive(Deserialize)]
struct InfoResource {
    attributes: InfoAttributes,
}

#[derive(Deserialize)]
struct InfoAttributes {
    network_passphrase: String,
    /// Server unix time in seconds.
    current_time: i64,
    tx_expiration_period: u64,
    precision: u32,
}

/// Network info backed by `GET /`.
pub struct HttpNetworkInfoFetcher {
    client: Arc<RpcClient>,
}

impl HttpNetworkInfoFetcher {
    pub const ENDPOINT: &'static str = "/";

    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NetworkInfoFetcher for HttpNetworkInfoFetcher {
    async fn fetch_network_info(&self) -> Result<NetworkInfo, RpcError> {
        let resp: InfoResponse = self.client.get(Self::ENDPOINT, &[]).await?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Ok(into_network_info(resp.data.attributes, now))
    }
}

fn into_network_info(attrs: InfoAttributes, local_now: i64) -> NetworkInfo {
    NetworkInfo {
        precision: attrs.precision,
        network_params: NetworkParams::new(
            &attrs.network_passphrase,
            attrs.current_time - local_now,
        ),
        tx_expiration_period: attrs.tx_expiration_period,
    }
}
