use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server configuration reported by `GET /config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockstore_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockstore_namespace_example: Option<String>,
    #[serde(
        rename = "blockstore_namespace_ValidityRegex",
        skip_serializing_if = "Option::is_none"
    )]
    pub blockstore_namespace_validity_regex: Option<String>,
}

/// Access key pair, optionally supplied to setup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessKeyCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// First-time setup request: creates the initial admin user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Setup {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<AccessKeyCredentials>,
}

impl Setup {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: None,
        }
    }
}

/// Newly created credentials, including the secret
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CredentialsWithSecret {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub creation_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Properties of the object in the underlying store
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnderlyingObjectProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

/// Error payload returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// A named reference (tag or branch) and the commit it points to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
    pub id: String,
    pub commit_id: String,
}

/// Pagination information for list results
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    pub has_more: bool,
    /// Token for the `after` parameter of the next page
    pub next_offset: String,
    /// Number of values found in the results
    pub results: i32,
    pub max_per_page: i32,
}

/// One page of references
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefList {
    pub pagination: Pagination,
    pub results: Vec<Ref>,
}

/// Tag creation request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagCreation {
    pub id: String,
    /// Reference (branch, tag or commit) the tag should point to
    #[serde(rename = "ref")]
    pub reference: String,
}
