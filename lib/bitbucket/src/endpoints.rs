//! Bitbucket endpoint defaults and API URL derivation.
//!
//! The validation URL doubles as the API base: every other API endpoint
//! keeps its scheme, host and port and swaps in a Bitbucket path.

use portcullis_core::Result;
use portcullis_provider::{ProviderData, ProviderDefaults, ProviderError};
use reqwest::Url;

/// Bitbucket's documented production endpoints.
pub const DEFAULTS: ProviderDefaults = ProviderDefaults {
    provider_name: "Bitbucket",
    login_url: "https://bitbucket.org/site/oauth2/authorize",
    redeem_url: "https://bitbucket.org/site/oauth2/access_token",
    validate_url: "https://api.bitbucket.org/2.0/user/emails",
    scope: "account team",
};

const TEAMS_PATH: &str = "/2.0/teams";
const USER_PATH: &str = "/2.0/user";

/// Group rosters are only served by the 1.0 API.
const GROUPS_SEGMENTS: [&str; 2] = ["1.0", "groups"];

/// Fills unset fields of `data` with Bitbucket defaults.
#[must_use]
pub fn resolve(data: ProviderData) -> ProviderData {
    data.merged_with(&DEFAULTS)
}

/// API URLs for one authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    emails: Url,
}

impl Endpoints {
    /// Parses the validation URL.
    ///
    /// # Errors
    ///
    /// Returns `RequestBuild` if `validate_url` is not an absolute
    /// hierarchical URL.
    pub fn new(validate_url: &str) -> Result<Self, ProviderError> {
        let emails = Url::parse(validate_url).map_err(|e| ProviderError::RequestBuild {
            reason: format!("invalid validate URL '{validate_url}': {e}"),
        })?;
        if emails.cannot_be_a_base() {
            return Err(ProviderError::RequestBuild {
                reason: format!("validate URL '{validate_url}' cannot be a base"),
            }
            .into());
        }
        Ok(Self { emails })
    }

    /// `GET` target listing the account's email addresses.
    #[must_use]
    pub fn emails(&self) -> Url {
        self.emails.clone()
    }

    /// `GET` target listing teams the account is a member of.
    #[must_use]
    pub fn teams(&self) -> Url {
        let mut url = self.with_path(TEAMS_PATH);
        url.query_pairs_mut().append_pair("role", "member");
        url
    }

    /// `GET` target describing the authenticated account.
    #[must_use]
    pub fn user(&self) -> Url {
        self.with_path(USER_PATH)
    }

    /// `GET` target listing the members of `team/group`.
    ///
    /// `team` and `group` are percent-encoded as single path segments.
    #[must_use]
    pub fn group_members(&self, team: &str, group: &str) -> Url {
        let mut url = self.with_path("/");
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .clear()
                .extend(GROUPS_SEGMENTS)
                .extend([team, group, "members"]);
        }
        url
    }

    fn with_path(&self, path: &str) -> Url {
        let mut url = self.emails.clone();
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}
