use reqwest::header::HeaderMap;
use thiserror::Error;

/// Broad category of a [`LakeFsError`], for callers that branch on the kind
/// of failure rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied missing or invalid arguments. No request was sent.
    Usage,
    /// The request body could not be encoded.
    Serialization,
    /// The transport failed (connection, TLS, timeout, ...).
    Transport,
    /// The server answered with a non-2xx status.
    Server,
    /// A 2xx response body did not match the declared type.
    Deserialization,
    /// An asynchronous call was canceled before it completed.
    Canceled,
}

/// lakeFS client error types
#[derive(Error, Debug)]
pub enum LakeFsError {
    #[error("Missing the required parameter '{name}' when calling {operation}")]
    MissingParameter {
        operation: &'static str,
        name: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request body serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error: {status} - {}", api_summary(.message, .body))]
    Api {
        status: u16,
        headers: HeaderMap,
        body: String,
        message: Option<String>,
    },

    #[error("Response body deserialization failed: {source}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Call was canceled")]
    Canceled,
}

fn api_summary<'a>(message: &'a Option<String>, body: &'a str) -> &'a str {
    message.as_deref().unwrap_or(body)
}

/// Result type for lakeFS operations
pub type LakeFsResult<T> = Result<T, LakeFsError>;

impl LakeFsError {
    /// Create an API error from a completed non-2xx response
    pub fn api_error(
        status: u16,
        headers: HeaderMap,
        body: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self::Api {
            status,
            headers,
            body: body.into(),
            message,
        }
    }

    /// Create a missing required parameter error
    pub fn missing_param(operation: &'static str, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            operation,
            name: name.into(),
        }
    }

    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter { .. }
            | Self::InvalidParameter(_)
            | Self::Url(_)
            | Self::Auth(_) => ErrorKind::Usage,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Http(_) | Self::Io(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Server,
            Self::Deserialization { .. } => ErrorKind::Deserialization,
            Self::Canceled => ErrorKind::Canceled,
        }
    }

    /// HTTP status of a server error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body attached to a server or deserialization error
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Response headers attached to a server error
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::Api { headers, .. } => Some(headers),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_param_message_names_parameter_and_operation() {
        let err = LakeFsError::missing_param("setup", "setup");
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(
            err.to_string(),
            "Missing the required parameter 'setup' when calling setup"
        );
    }

    #[test]
    fn api_error_prefers_parsed_message() {
        let err = LakeFsError::api_error(
            409,
            HeaderMap::new(),
            r#"{"message":"setup was already called"}"#,
            Some("setup was already called".to_string()),
        );
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "API error: 409 - setup was already called");
        assert_eq!(err.body(), Some(r#"{"message":"setup was already called"}"#));
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = LakeFsError::api_error(502, HeaderMap::new(), "bad gateway", None);
        assert_eq!(err.to_string(), "API error: 502 - bad gateway");
    }

    #[test]
    fn deserialization_keeps_body() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = LakeFsError::Deserialization {
            source,
            body: "nope".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Deserialization);
        assert_eq!(err.body(), Some("nope"));
        assert_eq!(err.status(), None);
    }
}
