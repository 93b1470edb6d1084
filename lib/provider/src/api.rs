//! JSON client for identity provider REST APIs.
//!
//! Providers in this family take the access token as an `access_token` query
//! parameter rather than an `Authorization` header. Every failure on the
//! request path logs a dump of the outgoing request with the token redacted.

use crate::error::ProviderError;
use portcullis_core::{AccessToken, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Request, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Query parameter carrying the access token.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Replacement for secret query values in logged URLs.
const REDACTED: &str = "REDACTED";

/// Authenticated GET client decoding JSON responses.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    http: Client,
}

impl ApiClient {
    /// Creates a client with a default `reqwest::Client`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// Timeouts and proxies configured on `http` apply to every call.
    #[must_use]
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Issues `GET url?access_token=...` and decodes the body as `T`.
    ///
    /// # Errors
    ///
    /// - `RequestBuild` if the request cannot be constructed
    /// - `Transport` if sending fails or the status is not 2xx
    /// - `Decode` if the body is not JSON of the expected shape
    #[instrument(skip_all, fields(path = url.path()))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        mut url: Url,
        token: &AccessToken,
    ) -> Result<T, ProviderError> {
        url.query_pairs_mut()
            .append_pair(ACCESS_TOKEN_PARAM, token.secret());

        let request = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .build()
            .map_err(|e| ProviderError::RequestBuild {
                reason: e.without_url().to_string(),
            })?;
        let dump = RequestDump::capture(&request);

        let response = self.http.execute(request).await.map_err(|e| {
            dump.log("failed making request");
            ProviderError::Transport {
                status: None,
                reason: e.without_url().to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            dump.log("provider rejected request");
            return Err(ProviderError::Transport {
                status: Some(status.as_u16()),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| {
            dump.log("failed reading response body");
            ProviderError::Transport {
                status: Some(status.as_u16()),
                reason: e.without_url().to_string(),
            }
        })?;

        let decoded = serde_json::from_slice(&body).map_err(|e| {
            dump.log("failed decoding response");
            ProviderError::Decode {
                reason: e.to_string(),
            }
        })?;

        debug!(status = status.as_u16(), "request succeeded");
        Ok(decoded)
    }
}

/// Snapshot of an outgoing request, safe to log.
#[derive(Debug)]
struct RequestDump {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl RequestDump {
    fn capture(request: &Request) -> Self {
        Self {
            method: request.method().clone(),
            url: redact_url(request.url()),
            headers: request.headers().clone(),
        }
    }

    fn log(&self, message: &str) {
        warn!(
            method = %self.method,
            url = %self.url,
            headers = ?self.headers,
            "{message}"
        );
    }
}

/// Returns `url` with the value of any `access_token` parameter replaced.
#[must_use]
pub fn redact_url(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == ACCESS_TOKEN_PARAM {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted
}
