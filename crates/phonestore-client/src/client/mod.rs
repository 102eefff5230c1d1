//! HTTP client for the storefront REST API.
//!
//! Wraps `reqwest` with envelope unwrapping, bearer-token handling, and typed
//! status errors. Requests are never retried: a failure is returned to the
//! caller, which reports it and stops.

mod account;
mod catalog;
mod news;

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use phonestore_core::AppConfig;

use crate::error::ClientError;
use crate::types::ApiEnvelope;

/// Characters left unescaped in a single path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for the storefront REST API.
///
/// Use [`StorefrontClient::new`] with loaded configuration or
/// [`StorefrontClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `api_url` does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint paths append below `/api`.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL from path segments and query parameters.
    ///
    /// Each segment is percent-encoded on its own, so slugs and ids can never
    /// introduce extra path components.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        let encoded: Vec<String> = segments
            .iter()
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect();
        let path = format!("{}{}", url.path(), encoded.join("/"));
        url.set_path(&path);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a request, maps non-2xx statuses to typed errors, and parses the
    /// body as JSON.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] for 401/403.
    /// - [`ClientError::NotFound`] for 404.
    /// - [`ClientError::Api`] for other non-2xx statuses whose body carries a
    ///   `message`.
    /// - [`ClientError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    async fn send_json(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<serde_json::Value, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "request failed");
            return Err(Self::status_error(status, url, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn status_error(status: StatusCode, url: &Url, body: &str) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized {
                url: url.to_string(),
            },
            StatusCode::NOT_FOUND => ClientError::NotFound {
                url: url.to_string(),
            },
            _ => match Self::error_message(body) {
                Some(message) => ClientError::Api { message },
                None => ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                },
            },
        }
    }

    /// The backend's `message` field from an error body, if any.
    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_owned)
    }

    /// Unwraps the `{success, data, message}` envelope.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if `success` is false or `data` is absent.
    /// - [`ClientError::Deserialize`] if the body does not match `T`.
    fn unwrap_envelope<T: DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, ClientError> {
        let envelope: ApiEnvelope<T> =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;
        if !envelope.success {
            return Err(ClientError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        envelope.data.ok_or_else(|| ClientError::Api {
            message: format!("{context}: response has no data"),
        })
    }

    /// Checks `success` on an envelope whose `data` is not needed.
    fn check_success(body: &serde_json::Value) -> Result<(), ClientError> {
        if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let message = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ClientError::Api { message });
        }
        Ok(())
    }

    /// GET an enveloped endpoint without auth.
    async fn get_data<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T, ClientError> {
        let url = self.build_url(segments, query);
        let body = self.send_json(self.client.get(url.clone()), &url).await?;
        Self::unwrap_envelope(body, context)
    }
}
