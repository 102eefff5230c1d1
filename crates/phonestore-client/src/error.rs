use phonestore_core::{CoreError, Notice};
use thiserror::Error;

/// Errors returned by the storefront REST client and its controllers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered `{"success": false}`.
    #[error("API error: {message}")]
    Api { message: String },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    /// HTTP 401/403; the session token is missing, expired, or lacks rights.
    #[error("unauthorized request to {url}")]
    Unauthorized { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Local validation failed before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Local validation errors keep their own severity; everything coming back
/// from the network is an error notice carrying the backend message when
/// there is one.
impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Core(core) => Notice::from(core),
            ClientError::Api { message } => Notice::error("Request failed", message.clone()),
            ClientError::Unauthorized { .. } => {
                Notice::error("Login required", "please log in again")
            }
            other => Notice::error("Request failed", other.to_string()),
        }
    }
}
