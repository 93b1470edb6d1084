//! The capability every identity provider backend implements.

use crate::data::ProviderData;
use crate::error::ProviderError;
use async_trait::async_trait;
use portcullis_core::{Result, SessionState};

/// An identity provider the proxy can authorize sessions against.
///
/// Implementations hold no per-check state, so one instance can serve
/// concurrent checks behind an `Arc<dyn Provider>`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the resolved provider configuration.
    fn data(&self) -> &ProviderData;

    /// Returns the provider's display name.
    fn provider_name(&self) -> &str {
        self.data().provider_name()
    }

    /// Resolves the authorized email address for `session`.
    ///
    /// Returns `Ok(None)` when the account is authenticated but not
    /// authorized, or when it has no usable email address.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` report when the provider API cannot be
    /// reached, answers with an unexpected payload, or violates its contract.
    async fn get_email_address(
        &self,
        session: &SessionState,
    ) -> Result<Option<String>, ProviderError>;
}
