//! Provider configuration and default merging.
//!
//! Operators may leave any endpoint unset (empty). Each provider publishes a
//! `ProviderDefaults` table and resolves its configuration with
//! [`ProviderData::merged_with`], which never overwrites a supplied value.

use serde::{Deserialize, Serialize};

/// Endpoint and scope configuration for one provider instance.
///
/// Every field may be omitted when loading from the environment; an empty
/// string means "use the provider default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderData {
    /// Display name of the provider. Always set by the provider itself.
    provider_name: String,
    /// OAuth2 authorization endpoint.
    login_url: String,
    /// OAuth2 token endpoint.
    redeem_url: String,
    /// Profile endpoint, for providers that have one.
    profile_url: String,
    /// Endpoint used to validate a token and look up the account.
    validate_url: String,
    /// OAuth2 scope string, space separated.
    scope: String,
}

/// Documented defaults a provider falls back to for unset fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub provider_name: &'static str,
    pub login_url: &'static str,
    pub redeem_url: &'static str,
    pub validate_url: &'static str,
    pub scope: &'static str,
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

impl ProviderData {
    /// Fills every empty field from `defaults`.
    ///
    /// Non-empty fields are kept verbatim. The provider name is always taken
    /// from `defaults`. `profile_url` has no default and passes through.
    #[must_use]
    pub fn merged_with(self, defaults: &ProviderDefaults) -> Self {
        Self {
            provider_name: defaults.provider_name.to_string(),
            login_url: or_default(self.login_url, defaults.login_url),
            redeem_url: or_default(self.redeem_url, defaults.redeem_url),
            profile_url: self.profile_url,
            validate_url: or_default(self.validate_url, defaults.validate_url),
            scope: or_default(self.scope, defaults.scope),
        }
    }

    /// Sets the authorization endpoint.
    #[must_use]
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    /// Sets the token endpoint.
    #[must_use]
    pub fn with_redeem_url(mut self, url: impl Into<String>) -> Self {
        self.redeem_url = url.into();
        self
    }

    /// Sets the profile endpoint.
    #[must_use]
    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = url.into();
        self
    }

    /// Sets the validation endpoint.
    #[must_use]
    pub fn with_validate_url(mut self, url: impl Into<String>) -> Self {
        self.validate_url = url.into();
        self
    }

    /// Sets the OAuth2 scope string.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Returns the provider display name.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Returns the OAuth2 authorization endpoint.
    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Returns the OAuth2 token endpoint.
    #[must_use]
    pub fn redeem_url(&self) -> &str {
        &self.redeem_url
    }

    /// Returns the profile endpoint.
    #[must_use]
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    /// Returns the validation endpoint.
    #[must_use]
    pub fn validate_url(&self) -> &str {
        &self.validate_url
    }

    /// Returns the OAuth2 scope string.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: ProviderDefaults = ProviderDefaults {
        provider_name: "Example",
        login_url: "https://id.example.com/authorize",
        redeem_url: "https://id.example.com/token",
        validate_url: "https://api.example.com/user",
        scope: "profile",
    };

    #[test]
    fn empty_fields_take_defaults() {
        let data = ProviderData::default().merged_with(&DEFAULTS);

        assert_eq!(data.provider_name(), "Example");
        assert_eq!(data.login_url(), "https://id.example.com/authorize");
        assert_eq!(data.redeem_url(), "https://id.example.com/token");
        assert_eq!(data.validate_url(), "https://api.example.com/user");
        assert_eq!(data.profile_url(), "");
        assert_eq!(data.scope(), "profile");
    }

    #[test]
    fn supplied_fields_are_kept_verbatim() {
        let data = ProviderData::default()
            .with_login_url("https://other.example.com/oauth/auth")
            .with_profile_url("https://other.example.com/me")
            .with_scope("read write")
            .merged_with(&DEFAULTS);

        assert_eq!(data.login_url(), "https://other.example.com/oauth/auth");
        assert_eq!(data.redeem_url(), "https://id.example.com/token");
        assert_eq!(data.profile_url(), "https://other.example.com/me");
        assert_eq!(data.scope(), "read write");
    }

    #[test]
    fn merge_is_idempotent() {
        let once = ProviderData::default()
            .with_validate_url("https://api.example.com/v2/user")
            .merged_with(&DEFAULTS);
        let twice = once.clone().merged_with(&DEFAULTS);

        assert_eq!(once, twice);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let json = r#"{ "login_url": "https://id.example.com/custom" }"#;

        let data: ProviderData = serde_json::from_str(json).expect("deserialize");

        assert_eq!(data.login_url(), "https://id.example.com/custom");
        assert_eq!(data.redeem_url(), "");
        assert_eq!(data.scope(), "");
    }
}
