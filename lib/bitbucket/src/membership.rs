//! Team and group membership checks.
//!
//! A team miss is a normal negative answer (`Ok(false)`). A group miss is a
//! hard `NotInGroup` error: callers rely on telling the two apart.

use crate::endpoints::Endpoints;
use crate::types::{GroupMember, Paginated, TeamRecord, UserIdentity};
use portcullis_core::{AccessToken, Result};
use portcullis_provider::{ApiClient, ProviderError};
use tracing::{debug, info, instrument, warn};

/// Answers membership questions for the account behind one access token.
#[derive(Debug, Clone, Copy)]
pub struct MembershipVerifier<'a> {
    client: &'a ApiClient,
    endpoints: &'a Endpoints,
    token: &'a AccessToken,
}

impl<'a> MembershipVerifier<'a> {
    /// Creates a verifier for the account owning `token`.
    #[must_use]
    pub fn new(client: &'a ApiClient, endpoints: &'a Endpoints, token: &'a AccessToken) -> Self {
        Self {
            client,
            endpoints,
            token,
        }
    }

    /// Returns whether the account is a member of `team`.
    ///
    /// Team names are compared exactly, case included.
    ///
    /// # Errors
    ///
    /// Returns the client's error if the team list cannot be fetched.
    #[instrument(skip(self))]
    pub async fn in_team(&self, team: &str) -> Result<bool, ProviderError> {
        info!("filtering against team membership");

        let teams: Paginated<TeamRecord> = self
            .client
            .get_json(self.endpoints.teams(), self.token)
            .await?;
        let teams = teams.into_values();
        debug!(?teams, "fetched team memberships");

        let found = teams.iter().any(|t| t.name == team);
        if !found {
            info!("team membership test failed, access denied");
        }
        Ok(found)
    }

    /// Requires the account to be a member of `group` within `team`.
    ///
    /// Resolves the account id first; the roster is never fetched if that
    /// fails.
    ///
    /// # Errors
    ///
    /// - `MissingAccountId` if the user record has no account id
    /// - `NotInGroup` if the account id is not on the roster
    /// - the client's error if either lookup fails
    #[instrument(skip(self))]
    pub async fn check_group(&self, team: &str, group: &str) -> Result<(), ProviderError> {
        info!("checking group membership");

        let account_id = self.account_id().await?;
        let roster = self.group_roster(team, group).await?;

        if roster
            .iter()
            .any(|m| m.account_id.as_deref() == Some(account_id.as_str()))
        {
            debug!("found user in group member list");
            return Ok(());
        }

        warn!(%account_id, "user not found in group member list");
        Err(ProviderError::NotInGroup {
            team: team.to_string(),
            group: group.to_string(),
        }
        .into())
    }

    async fn account_id(&self) -> Result<String, ProviderError> {
        let user: UserIdentity = self
            .client
            .get_json(self.endpoints.user(), self.token)
            .await?;
        info!(
            username = %user.username,
            account_id = ?user.account_id,
            "resolved authenticated user"
        );

        user.account_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::MissingAccountId.into())
    }

    async fn group_roster(&self, team: &str, group: &str) -> Result<Vec<GroupMember>, ProviderError> {
        let roster: Vec<GroupMember> = self
            .client
            .get_json(self.endpoints.group_members(team, group), self.token)
            .await?;
        debug!(members = ?roster, "fetched group members");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token() -> AccessToken {
        AccessToken::new("imaginary_access_token".to_string())
    }

    fn endpoints_for(server: &MockServer) -> Endpoints {
        Endpoints::new(&format!("{}/2.0/user/emails", server.uri())).expect("valid URL")
    }

    #[tokio::test]
    async fn team_match_is_exact() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.0/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [{ "username": "bioinformatics-lab" }]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = ApiClient::new();
        let endpoints = endpoints_for(&server);
        let token = token();
        let verifier = MembershipVerifier::new(&client, &endpoints, &token);

        assert!(!verifier.in_team("bioinformatics").await.expect("lookup"));
        assert!(verifier.in_team("bioinformatics-lab").await.expect("lookup"));
    }

    #[tokio::test]
    async fn team_lookup_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.0/teams"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new();
        let endpoints = endpoints_for(&server);
        let token = token();
        let report = MembershipVerifier::new(&client, &endpoints, &token)
            .in_team("bioinformatics")
            .await
            .expect_err("500 is an error");

        assert_eq!(report.current_context().status(), Some(500));
    }

    #[tokio::test]
    async fn empty_account_id_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.0/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "mbland", "account_id": ""
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/1.0/groups/bioinformatics/developers/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new();
        let endpoints = endpoints_for(&server);
        let token = token();
        let report = MembershipVerifier::new(&client, &endpoints, &token)
            .check_group("bioinformatics", "developers")
            .await
            .expect_err("empty account id is an error");

        assert_eq!(report.current_context(), &ProviderError::MissingAccountId);
    }

    #[tokio::test]
    async fn roster_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2.0/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "mbland", "account_id": "557058:abc"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/1.0/groups/bioinformatics/developers/members"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::new();
        let endpoints = endpoints_for(&server);
        let token = token();
        let report = MembershipVerifier::new(&client, &endpoints, &token)
            .check_group("bioinformatics", "developers")
            .await
            .expect_err("404 is an error");

        assert_eq!(report.current_context().status(), Some(404));
    }
}
