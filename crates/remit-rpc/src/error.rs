//! RPC error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP error calling {endpoint} ({url}): {source}")]
    Http {
        endpoint: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transaction error: {0}")]
    Tx(#[from] remit_tx::TxError),

    #[error("{0}")]
    Other(String),
}

impl RpcError {
    /// Whether a retry could plausibly succeed (timeouts, connection
    /// failures, 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            RpcError::Http { source, .. } => source.is_timeout() || source.is_connect(),
            RpcError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RpcError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transience() {
        let server = RpcError::HttpStatus {
            endpoint: "/".into(),
            status: 503,
            body: String::new(),
        };
        let client = RpcError::HttpStatus {
            endpoint: "/".into(),
            status: 400,
            body: String::new(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert_eq!(client.status(), Some(400));
    }

    #[test]
    fn test_other_not_transient() {
        let err = RpcError::Other("missing data".into());
        assert!(!err.is_transient());
        assert_eq!(err.status(), None);
    }
}
