//! Error types for identity providers.
//!
//! A denial is never an error: providers return `Ok(None)` for an account
//! that authenticated but is not authorized. The variants below are
//! malfunctions of the adapter, the transport, or the provider's API.

use std::fmt;

/// Errors from identity provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The outgoing request could not be built (bad endpoint URL).
    RequestBuild { reason: String },
    /// The request failed in transit or the provider answered non-2xx.
    Transport {
        status: Option<u16>,
        reason: String,
    },
    /// The response body did not match the expected JSON shape.
    Decode { reason: String },
    /// The provider's user record carried no account identifier.
    MissingAccountId,
    /// The account is not a member of the configured group.
    NotInGroup { team: String, group: String },
}

impl ProviderError {
    /// Returns the HTTP status for transport failures caused by a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestBuild { reason } => {
                write!(f, "failed building request: {reason}")
            }
            Self::Transport {
                status: Some(status),
                reason,
            } => {
                write!(f, "request failed with status {status}: {reason}")
            }
            Self::Transport {
                status: None,
                reason,
            } => {
                write!(f, "request failed: {reason}")
            }
            Self::Decode { reason } => {
                write!(f, "failed decoding response: {reason}")
            }
            Self::MissingAccountId => {
                write!(f, "could not find account_id for authenticated user")
            }
            Self::NotInGroup { team, group } => {
                write!(f, "user not found in group {team}/{group}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}
