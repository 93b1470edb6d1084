//! Per-check session state.
//!
//! A `SessionState` carries the bearer credential obtained by the proxy's
//! OAuth2 code exchange. Providers treat it as an opaque capability: it is
//! read for outgoing API calls and never stored or logged.

use serde::Deserialize;

/// OAuth2 access token. Redacted in `Debug` output.
pub use oauth2::AccessToken;

/// The credential set a provider receives for one authorization check.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionState {
    access_token: AccessToken,
}

impl SessionState {
    /// Creates session state from a raw access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token.into()),
        }
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

impl From<AccessToken> for SessionState {
    fn from(access_token: AccessToken) -> Self {
        Self { access_token }
    }
}
