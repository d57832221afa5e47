//! remit API client library.
//!
//! Provides an async HTTP client for the wallet API plus the three
//! collaborators a payment confirmation needs: the identity directory, the
//! network info endpoint, and the transaction submission endpoint. Each
//! collaborator is a trait so the confirmation core can run against any
//! backend.
//!
//! # Example
//!
//! ```ignore
//! use remit_rpc::{HttpNetworkInfoFetcher, NetworkInfoFetcher, RpcClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Arc::new(RpcClient::new("https://api.example.com").unwrap());
//!     let info = HttpNetworkInfoFetcher::new(client).fetch_network_info().await.unwrap();
//!     println!("precision: {}", info.precision);
//! }
//! ```

pub mod error;
pub mod client;
pub mod identity;
pub mod network;
pub mod transactions;

pub use client::{RpcClient, RpcConfig};
pub use error::RpcError;
pub use identity::{HttpIdentityDirectory, Identity, IdentityDirectory};
pub use network::{HttpNetworkInfoFetcher, NetworkInfoFetcher};
pub use transactions::{HttpTransactionSender, SubmitReceipt, TransactionSender};
