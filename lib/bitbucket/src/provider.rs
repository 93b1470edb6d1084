//! The Bitbucket provider and its authorization chain.

use crate::endpoints::{self, Endpoints};
use crate::membership::MembershipVerifier;
use crate::types::{EmailRecord, Paginated};
use async_trait::async_trait;
use portcullis_core::{Result, SessionState};
use portcullis_provider::{ApiClient, Provider, ProviderData, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Operator restrictions on who may authenticate through Bitbucket.
///
/// Empty strings disable a restriction. `group` only applies when `team`
/// is also set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitbucketOptions {
    /// Team the account must belong to.
    pub team: String,
    /// Group within `team` the account must belong to.
    pub group: String,
}

/// Bitbucket identity provider.
#[derive(Debug, Clone)]
pub struct BitbucketProvider {
    data: ProviderData,
    client: ApiClient,
    team: String,
    group: String,
}

impl BitbucketProvider {
    /// Creates a provider, filling unset endpoints with Bitbucket defaults.
    #[must_use]
    pub fn new(data: ProviderData) -> Self {
        Self::with_client(data, ApiClient::new())
    }

    /// Creates a provider that issues API calls through `client`.
    #[must_use]
    pub fn with_client(data: ProviderData, client: ApiClient) -> Self {
        Self {
            data: endpoints::resolve(data),
            client,
            team: String::new(),
            group: String::new(),
        }
    }

    /// Applies team and group restrictions from configuration.
    #[must_use]
    pub fn with_options(mut self, options: BitbucketOptions) -> Self {
        self.team = options.team;
        self.group = options.group;
        self
    }

    /// Restricts access to members of `team`.
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.set_team(team);
        self
    }

    /// Restricts access to members of `group` within the configured team.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.set_group(group);
        self
    }

    /// Sets the team restriction. Empty disables it.
    pub fn set_team(&mut self, team: impl Into<String>) {
        self.team = team.into();
    }

    /// Sets the group restriction. Empty disables it.
    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }

    /// Returns the configured team, empty when unrestricted.
    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    /// Returns the configured group, empty when unrestricted.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }
}

#[async_trait]
impl Provider for BitbucketProvider {
    fn data(&self) -> &ProviderData {
        &self.data
    }

    #[instrument(skip_all, fields(team = %self.team, group = %self.group))]
    async fn get_email_address(
        &self,
        session: &SessionState,
    ) -> Result<Option<String>, ProviderError> {
        let endpoints = Endpoints::new(self.data.validate_url())?;
        let token = session.access_token();

        let emails: Paginated<EmailRecord> =
            self.client.get_json(endpoints.emails(), token).await?;

        if !self.team.is_empty() {
            let verifier = MembershipVerifier::new(&self.client, &endpoints, token);
            if !verifier.in_team(&self.team).await? {
                return Ok(None);
            }
            if !self.group.is_empty() {
                verifier.check_group(&self.team, &self.group).await?;
            }
        }

        let email = primary_email(emails.into_values());
        if email.is_none() {
            debug!("no primary email for account");
        }
        Ok(email)
    }
}

/// An empty primary address counts as no email.
fn primary_email(emails: Vec<EmailRecord>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary)
        .map(|e| e.email)
        .filter(|email| !email.is_empty())
}
