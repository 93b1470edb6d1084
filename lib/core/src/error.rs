//! Error handling foundation for portcullis.
//!
//! Providers report failures as `rootcause::Report<C>` where `C` is their
//! own error enum. Callers that need to branch on the failure kind read it
//! back with `Report::current_context`.

use rootcause::Report;

/// Result carrying a rootcause report with a typed context.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
