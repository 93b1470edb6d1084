//! Bitbucket API response records.

use serde::Deserialize;

/// A page of results from a 2.0 list endpoint.
///
/// Only the first page is consulted. A missing or null `values` is empty.
#[derive(Debug, Deserialize)]
pub(crate) struct Paginated<T> {
    #[serde(default)]
    values: Option<Vec<T>>,
}

impl<T> Paginated<T> {
    pub fn into_values(self) -> Vec<T> {
        self.values.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmailRecord {
    #[serde(default)]
    pub email: String,
    #[serde(rename = "is_primary", default)]
    pub primary: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamRecord {
    #[serde(rename = "username", default)]
    pub name: String,
}

/// The authenticated account, from `GET /2.0/user`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserIdentity {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub account_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupMember {
    #[serde(default)]
    pub account_id: Option<String>,
}
