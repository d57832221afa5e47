//! Identity directory: account id → user identity (email).

use crate::client::RpcClient;
use crate::error::RpcError;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// A user identity as known to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: String,
    pub email: String,
}

/// Looks up identities by account id.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// `Ok(None)` when the directory has no identity for `account_id`.
    async fn lookup_by_account_id(&self, account_id: &str) -> Result<Option<Identity>, RpcError>;
}

#[derive(Deserialize)]
struct IdentityList {
    data: Vec<IdentityResource>,
}

#[derive(Deserialize)]
struct IdentityResource {
    attributes: IdentityAttributes,
}

#[derive(Deserialize)]
struct IdentityAttributes {
    #[serde(default)]
    address: Option<String>,
    email: String,
}

/// Identity directory backed by `GET /identities?filter[address]=...`.
pub struct HttpIdentityDirectory {
    client: Arc<RpcClient>,
}

impl HttpIdentityDirectory {
    pub const ENDPOINT: &'static str = "/identities";

    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn lookup_by_account_id(&self, account_id: &str) -> Result<Option<Identity>, RpcError> {
        let list: IdentityList = self
            .client
            .get(Self::ENDPOINT, &[("filter[address]", account_id)])
            .await?;
        Ok(first_identity(list, account_id))
    }
}

fn first_identity(list: IdentityList, account_id: &str) -> Option<Identity> {
    list.data.into_iter().next().map(|res| Identity {
        account_id: res
            .attributes
            .address
            .unwrap_or_else(|| account_id.to_string()),
        email: res.attributes.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity_list() {
        let json = r#"{
            "data": [
                { "id": "1", "type": "identities",
                  "attributes": { "address": "GABC", "email": "alice@example.com" } },
                { "id": "2", "type": "identities",
                  "attributes": { "address": "GABC", "email": "other@example.com" } }
            ]
        }"#;
        let list: IdentityList = serde_json::from_str(json).unwrap();
        let identity = first_identity(list, "GABC").unwrap();
        assert_eq!(identity.email, "alice@example.com");
        assert_eq!(identity.account_id, "GABC");
    }

    #[test]
    fn test_empty_list_is_none() {
        let list: IdentityList = serde_json::from_str(r#"{ "data": [] }"#).unwrap();
        assert!(first_identity(list, "GABC").is_none());
    }

    #[test]
    fn test_missing_address_uses_query() {
        let json = r#"{ "data": [ { "attributes": { "email": "bob@example.com" } } ] }"#;
        let list: IdentityList = serde_json::from_str(json).unwrap();
        assert_eq!(first_identity(list, "GXYZ").unwrap().account_id, "GXYZ");
    }
}
