//! Recipient identity resolution.

use crate::error::IdentityResolutionError;
use crate::model::RecipientSubject;
use remit_rpc::IdentityDirectory;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIdentity {
    Email(String),
    /// Lookup failed or the directory has no usable identity.
    Unknown,
}

/// Resolves a recipient account id to a display identity.
#[derive(Clone)]
pub struct RecipientIdentityResolver {
    directory: Arc<dyn IdentityDirectory>,
}

impl RecipientIdentityResolver {
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { directory }
    }

    /// Directory lookup, surfacing transport errors.
    pub async fn lookup(
        &self,
        account_id: &str,
    ) -> Result<ResolvedIdentity, IdentityResolutionError> {
        let identity = self.directory.lookup_by_account_id(account_id).await?;
        Ok(match identity {
            Some(identity) if !identity.email.is_empty() => ResolvedIdentity::Email(identity.email),
            _ => ResolvedIdentity::Unknown,
        })
    }

    /// Like [`lookup`](Self::lookup), but failures degrade to `Unknown`.
    pub async fn resolve(&self, account_id: &str) -> ResolvedIdentity {
        match self.lookup(account_id).await {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("identity lookup for {} failed: {}", account_id, e);
                ResolvedIdentity::Unknown
            }
        }
    }
}

/// Email embedded in a JSON payment description, if any.
pub fn embedded_email(description: &str) -> Option<String> {
    RecipientSubject::parse(description)
        .and_then(|s| s.email)
        .filter(|e| !e.is_empty())
}
