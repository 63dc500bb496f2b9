use crate::error::{LakeFsError, LakeFsResult};
use base64::{engine::general_purpose, Engine};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE};
use std::fmt;

/// Name of the session cookie lakeFS issues on login.
pub const SESSION_COOKIE: &str = "internal_key";

/// Credential attachment methods an operation may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    /// HTTP basic with an access key id and secret
    BasicAuth,
    /// Session cookie
    CookieAuth,
    /// JWT bearer token
    JwtToken,
}

impl AuthScheme {
    /// Scheme name as used in the API definition
    pub fn name(&self) -> &'static str {
        match self {
            Self::BasicAuth => "basic_auth",
            Self::CookieAuth => "cookie_auth",
            Self::JwtToken => "jwt_token",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Authentication trait for the lakeFS API
///
/// Called once per scheme the operation allows. Implementations attach the
/// credential they hold for that scheme and leave the headers untouched
/// otherwise.
#[async_trait::async_trait]
pub trait Authentication: Send + Sync {
    /// Apply authentication for `scheme` to the request headers
    async fn apply_auth(&self, scheme: AuthScheme, headers: &mut HeaderMap) -> LakeFsResult<()>;
}

fn header_value(value: String) -> LakeFsResult<HeaderValue> {
    value
        .parse()
        .map_err(|e| LakeFsError::auth_error(format!("Invalid auth header: {}", e)))
}

/// Add a `name=value` pair to the request's single `Cookie` header.
pub(crate) fn merge_cookie(headers: &mut HeaderMap, name: &str, value: &str) -> LakeFsResult<()> {
    let pair = format!("{}={}", name, value);
    let merged = match headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
        Some(existing) if !existing.is_empty() => format!("{}; {}", existing, pair),
        _ => pair,
    };
    let merged = merged
        .parse()
        .map_err(|e| LakeFsError::invalid_param(format!("Invalid cookie '{}': {}", name, e)))?;
    headers.insert(COOKIE, merged);
    Ok(())
}

/// Basic authentication using access key id and secret
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait::async_trait]
impl Authentication for BasicAuth {
    async fn apply_auth(&self, scheme: AuthScheme, headers: &mut HeaderMap) -> LakeFsResult<()> {
        if scheme != AuthScheme::BasicAuth {
            return Ok(());
        }
        let credentials = format!("{}:{}", self.username, self.password);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        headers.insert(AUTHORIZATION, header_value(format!("Basic {}", encoded))?);

        Ok(())
    }
}

/// Bearer token authentication
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth").field("token", &"<redacted>").finish()
    }
}

#[async_trait::async_trait]
impl Authentication for BearerAuth {
    async fn apply_auth(&self, scheme: AuthScheme, headers: &mut HeaderMap) -> LakeFsResult<()> {
        if scheme != AuthScheme::JwtToken {
            return Ok(());
        }
        headers.insert(AUTHORIZATION, header_value(format!("Bearer {}", self.token))?);

        Ok(())
    }
}

/// Session cookie authentication
#[derive(Clone)]
pub struct CookieAuth {
    session: String,
}

impl CookieAuth {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
        }
    }
}

impl fmt::Debug for CookieAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieAuth").field("session", &"<redacted>").finish()
    }
}

#[async_trait::async_trait]
impl Authentication for CookieAuth {
    async fn apply_auth(&self, scheme: AuthScheme, headers: &mut HeaderMap) -> LakeFsResult<()> {
        if scheme != AuthScheme::CookieAuth {
            return Ok(());
        }
        merge_cookie(headers, SESSION_COOKIE, &self.session)
            .map_err(|e| LakeFsError::auth_error(e.to_string()))
    }
}

/// No authentication
#[derive(Debug, Clone)]
pub struct NoAuth;

#[async_trait::async_trait]
impl Authentication for NoAuth {
    async fn apply_auth(&self, _scheme: AuthScheme, _headers: &mut HeaderMap) -> LakeFsResult<()> {
        Ok(())
    }
}

/// Credential store holding any combination of the supported credentials.
///
/// Every credential the store holds is attached when the operation allows its
/// scheme, so one request may carry several. Basic and bearer credentials
/// share the `Authorization` header; the scheme applied last wins.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    basic: Option<BasicAuth>,
    cookie: Option<CookieAuth>,
    token: Option<BearerAuth>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basic(mut self, access_key_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.basic = Some(BasicAuth::new(access_key_id, secret));
        self
    }

    pub fn with_session_cookie(mut self, session: impl Into<String>) -> Self {
        self.cookie = Some(CookieAuth::new(session));
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(BearerAuth::new(token));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.basic.is_none() && self.cookie.is_none() && self.token.is_none()
    }
}

#[async_trait::async_trait]
impl Authentication for Credentials {
    async fn apply_auth(&self, scheme: AuthScheme, headers: &mut HeaderMap) -> LakeFsResult<()> {
        match scheme {
            AuthScheme::BasicAuth => match &self.basic {
                Some(basic) => basic.apply_auth(scheme, headers).await,
                None => Ok(()),
            },
            AuthScheme::CookieAuth => match &self.cookie {
                Some(cookie) => cookie.apply_auth(scheme, headers).await,
                None => Ok(()),
            },
            AuthScheme::JwtToken => match &self.token {
                Some(token) => token.apply_auth(scheme, headers).await,
                None => Ok(()),
            },
        }
    }
}
