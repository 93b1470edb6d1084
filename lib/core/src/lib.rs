//! Core types shared by portcullis identity providers.
//!
//! This crate provides the error handling foundation and the per-check
//! session state handed to every provider.

pub mod error;
pub mod session;

pub use error::Result;
pub use session::{AccessToken, SessionState};
