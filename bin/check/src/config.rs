//! Check configuration.
//!
//! Loaded via the `config` crate from `PORTCULLIS__`-prefixed environment
//! variables, with `__` separating nested keys:
//!
//! ```text
//! PORTCULLIS__ACCESS_TOKEN=...
//! PORTCULLIS__PROVIDER__VALIDATE_URL=https://api.bitbucket.org/2.0/user/emails
//! PORTCULLIS__BITBUCKET__TEAM=bioinformatics
//! PORTCULLIS__BITBUCKET__GROUP=developers
//! ```

use portcullis_bitbucket::BitbucketOptions;
use portcullis_core::{AccessToken, SessionState};
use portcullis_provider::ProviderData;
use serde::Deserialize;

/// Environment prefix for every setting.
const ENV_PREFIX: &str = "PORTCULLIS";

/// Configuration for one authorization check.
#[derive(Debug, Deserialize)]
pub struct CheckConfig {
    /// Access token to check. Redacted in debug output.
    pub access_token: AccessToken,

    /// Endpoint overrides; unset fields use the provider defaults.
    #[serde(default)]
    pub provider: ProviderData,

    /// Team and group restrictions.
    #[serde(default)]
    pub bitbucket: BitbucketOptions,
}

impl CheckConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Returns the session state carrying the configured token.
    #[must_use]
    pub fn session(&self) -> SessionState {
        SessionState::from(self.access_token.clone())
    }

    fn from_source(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.prefix_separator("__").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CheckConfig, config::ConfigError> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CheckConfig::from_source(config::Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    #[test]
    fn loads_nested_settings() {
        let config = load(&[
            ("PORTCULLIS__ACCESS_TOKEN", "imaginary_access_token"),
            (
                "PORTCULLIS__PROVIDER__VALIDATE_URL",
                "https://example.com/api/v3/user",
            ),
            ("PORTCULLIS__BITBUCKET__TEAM", "bioinformatics"),
            ("PORTCULLIS__BITBUCKET__GROUP", "developers"),
        ])
        .expect("load config");

        assert_eq!(
            config.session().access_token().secret(),
            "imaginary_access_token"
        );
        assert_eq!(
            config.provider.validate_url(),
            "https://example.com/api/v3/user"
        );
        assert_eq!(config.bitbucket.team, "bioinformatics");
        assert_eq!(config.bitbucket.group, "developers");
    }

    #[test]
    fn restrictions_default_to_disabled() {
        let config = load(&[("PORTCULLIS__ACCESS_TOKEN", "imaginary_access_token")])
            .expect("load config");

        assert_eq!(config.provider, ProviderData::default());
        assert_eq!(config.bitbucket, BitbucketOptions::default());
    }

    #[test]
    fn missing_token_is_error() {
        assert!(load(&[("PORTCULLIS__BITBUCKET__TEAM", "bioinformatics")]).is_err());
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = load(&[("PORTCULLIS__ACCESS_TOKEN", "imaginary_access_token")])
            .expect("load config");

        assert!(!format!("{config:?}").contains("imaginary_access_token"));
    }
}
