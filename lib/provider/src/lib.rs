//! Identity provider abstraction for portcullis.
//!
//! This crate provides:
//! - Provider configuration (`ProviderData`) and default merging (`ProviderDefaults`)
//! - The `Provider` capability implemented by each identity backend
//! - The provider error taxonomy (`ProviderError`)
//! - A JSON client for provider REST APIs (`ApiClient`)
//!
//! # Authorization outcomes
//!
//! `Provider::get_email_address` distinguishes three outcomes:
//! - `Ok(Some(email))`: the account is authorized and has a primary email
//! - `Ok(None)`: the account authenticated but is not authorized, or has no
//!   primary email
//! - `Err(report)`: the provider or the adapter malfunctioned
//!
//! # Example
//!
//! ```
//! use portcullis_provider::{ProviderData, ProviderDefaults};
//!
//! const DEFAULTS: ProviderDefaults = ProviderDefaults {
//!     provider_name: "Example",
//!     login_url: "https://id.example.com/authorize",
//!     redeem_url: "https://id.example.com/token",
//!     validate_url: "https://api.example.com/user",
//!     scope: "profile",
//! };
//!
//! let data = ProviderData::default()
//!     .with_scope("profile email")
//!     .merged_with(&DEFAULTS);
//!
//! assert_eq!(data.provider_name(), "Example");
//! assert_eq!(data.login_url(), "https://id.example.com/authorize");
//! assert_eq!(data.scope(), "profile email");
//! ```

pub mod api;
pub mod data;
pub mod error;
pub mod provider;

pub use api::ApiClient;
pub use data::{ProviderData, ProviderDefaults};
pub use error::ProviderError;
pub use provider::Provider;
