use crate::auth::Credentials;

/// Base path of a lakeFS server running locally with default settings
pub const DEFAULT_BASE_PATH: &str = "http://localhost/api/v1";

/// Client configuration
#[derive(Debug, Clone)]
pub struct Configuration {
    /// API root, including the `/api/v1` prefix
    pub base_path: String,
    pub user_agent: String,
    pub credentials: Credentials,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            credentials: Credentials::default(),
        }
    }
}

impl Configuration {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_server() {
        let config = Configuration::default();
        assert_eq!(config.base_path, DEFAULT_BASE_PATH);
        assert!(config.user_agent.starts_with("lakefs_client/"));
        assert!(config.credentials.is_empty());
    }

    #[test]
    fn setters_override_defaults() {
        let config = Configuration::new("https://lakefs.example.com/api/v1")
            .with_user_agent("ingest/2.0")
            .with_credentials(Credentials::new().with_token("jwt"));
        assert_eq!(config.base_path, "https://lakefs.example.com/api/v1");
        assert_eq!(config.user_agent, "ingest/2.0");
        assert!(!config.credentials.is_empty());
    }
}
