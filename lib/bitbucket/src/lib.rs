//! Bitbucket identity provider for portcullis.
//!
//! Resolves the primary email of a Bitbucket account and optionally
//! restricts access to members of a team, and of a group within that team.
//!
//! # Authorization chain
//!
//! Each check runs these steps in order and stops at the first failure:
//! 1. Fetch the account's email addresses
//! 2. If a team is configured, require membership (denial is `Ok(None)`)
//! 3. If a group is also configured, require membership (a miss is
//!    `ProviderError::NotInGroup`)
//! 4. Return the primary email, if any
//!
//! # Example
//!
//! ```
//! use portcullis_bitbucket::BitbucketProvider;
//! use portcullis_provider::{Provider, ProviderData};
//!
//! let provider = BitbucketProvider::new(ProviderData::default())
//!     .with_team("bioinformatics")
//!     .with_group("developers");
//!
//! assert_eq!(provider.provider_name(), "Bitbucket");
//! assert_eq!(provider.data().scope(), "account team");
//! ```

pub mod endpoints;
pub mod membership;
pub mod provider;
mod types;

pub use endpoints::Endpoints;
pub use membership::MembershipVerifier;
pub use provider::{BitbucketOptions, BitbucketProvider};
