//! Static descriptions of the API operations.
//!
//! An [`Operation`] fixes everything about a call that does not depend on the
//! caller: method, path template, parameter locations, media types and the
//! authentication schemes the server accepts for it.

use crate::auth::AuthScheme;
use crate::negotiate::APPLICATION_JSON;
use reqwest::Method;

/// Where a parameter travels in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
    Form,
}

/// Declared parameter of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub location: ParamLocation,
    pub required: bool,
}

impl ParamSpec {
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            location: ParamLocation::Path,
            required: true,
        }
    }

    pub const fn query(name: &'static str, required: bool) -> Self {
        Self {
            name,
            location: ParamLocation::Query,
            required,
        }
    }
}

/// Whether an operation takes a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySpec {
    None,
    Optional,
    Required,
}

/// Immutable definition of one API call
#[derive(Debug, Clone)]
pub struct Operation {
    /// Operation id, used in logs and error messages
    pub id: &'static str,
    pub method: Method,
    /// Path relative to the API base, with `{name}` placeholders
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    /// Media types the operation can respond with, in declared order
    pub accepts: &'static [&'static str],
    /// Media types the operation can consume, in declared order
    pub content_types: &'static [&'static str],
    pub body: BodySpec,
    /// Name of the body parameter, for error messages
    pub body_name: &'static str,
    pub auth: &'static [AuthScheme],
}

impl Operation {
    /// Whether a request body can be attached at all
    pub fn takes_body(&self) -> bool {
        !self.content_types.is_empty() && self.body != BodySpec::None
    }
}

const JSON: &[&str] = &[APPLICATION_JSON];
const ALL_AUTH: &[AuthScheme] = &[
    AuthScheme::BasicAuth,
    AuthScheme::CookieAuth,
    AuthScheme::JwtToken,
];
const REPOSITORY: ParamSpec = ParamSpec::path("repository");
const TAG: ParamSpec = ParamSpec::path("tag");

/// `GET /config`
pub static GET_CONFIG: Operation = Operation {
    id: "getConfig",
    method: Method::GET,
    path: "/config",
    params: &[],
    accepts: JSON,
    content_types: &[],
    body: BodySpec::None,
    body_name: "",
    auth: ALL_AUTH,
};

/// `POST /setup_lakefs`
pub static SETUP: Operation = Operation {
    id: "setup",
    method: Method::POST,
    path: "/setup_lakefs",
    params: &[],
    accepts: JSON,
    content_types: JSON,
    body: BodySpec::Required,
    body_name: "setup",
    auth: &[],
};

/// `POST /repositories/{repository}/tags`
pub static CREATE_TAG: Operation = Operation {
    id: "createTag",
    method: Method::POST,
    path: "/repositories/{repository}/tags",
    params: &[REPOSITORY],
    accepts: JSON,
    content_types: JSON,
    body: BodySpec::Required,
    body_name: "tagCreation",
    auth: ALL_AUTH,
};

/// `DELETE /repositories/{repository}/tags/{tag}`
pub static DELETE_TAG: Operation = Operation {
    id: "deleteTag",
    method: Method::DELETE,
    path: "/repositories/{repository}/tags/{tag}",
    params: &[REPOSITORY, TAG],
    accepts: JSON,
    content_types: &[],
    body: BodySpec::None,
    body_name: "",
    auth: ALL_AUTH,
};

/// `GET /repositories/{repository}/tags/{tag}`
pub static GET_TAG: Operation = Operation {
    id: "getTag",
    method: Method::GET,
    path: "/repositories/{repository}/tags/{tag}",
    params: &[REPOSITORY, TAG],
    accepts: JSON,
    content_types: &[],
    body: BodySpec::None,
    body_name: "",
    auth: ALL_AUTH,
};

/// `GET /repositories/{repository}/tags`
pub static LIST_TAGS: Operation = Operation {
    id: "listTags",
    method: Method::GET,
    path: "/repositories/{repository}/tags",
    params: &[
        REPOSITORY,
        ParamSpec::query("after", false),
        ParamSpec::query("amount", false),
    ],
    accepts: JSON,
    content_types: &[],
    body: BodySpec::None,
    body_name: "",
    auth: ALL_AUTH,
};
