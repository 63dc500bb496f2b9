use crate::{
    client::{CallHandle, LakeFsClient},
    error::LakeFsResult,
    models::{Config, CredentialsWithSecret, Setup},
    operation::{GET_CONFIG, SETUP},
    request::Params,
    response::ApiResponse,
};
use log::{debug, info};

/// Config API operations
pub struct ConfigApi<'a> {
    client: &'a LakeFsClient,
}

impl<'a> ConfigApi<'a> {
    pub fn new(client: &'a LakeFsClient) -> Self {
        Self { client }
    }

    /// Get the server configuration
    ///
    /// Fails with a server error carrying status 401 when the credentials
    /// are rejected.
    pub async fn get_config(&self) -> LakeFsResult<Config> {
        self.get_config_with_info().await.map(ApiResponse::into_data)
    }

    /// Get the server configuration with status code and headers
    pub async fn get_config_with_info(&self) -> LakeFsResult<ApiResponse<Config>> {
        info!("Getting server config");
        self.client.invoke_with_info(&GET_CONFIG, Params::new()).await
    }

    /// Get the server configuration in the background
    pub fn get_config_async<F>(&self, on_complete: F) -> CallHandle
    where
        F: FnOnce(LakeFsResult<ApiResponse<Config>>) + Send + 'static,
    {
        self.client.invoke_async(&GET_CONFIG, Params::new(), on_complete)
    }

    /// Set up a fresh installation and create the initial admin user
    ///
    /// # Arguments
    /// * `setup` - Admin user name and optional access key pair
    pub async fn setup(&self, setup: &Setup) -> LakeFsResult<CredentialsWithSecret> {
        self.setup_with_info(setup).await.map(ApiResponse::into_data)
    }

    /// Set up a fresh installation, returning status code and headers too
    ///
    /// A server that was already set up answers 409.
    pub async fn setup_with_info(&self, setup: &Setup) -> LakeFsResult<ApiResponse<CredentialsWithSecret>> {
        info!("Setting up lakeFS for user: {}", setup.username);
        let params = Params::new().json_body(setup)?;
        debug!("HTTP POST /setup_lakefs username={}", setup.username);

        self.client.invoke_with_info(&SETUP, params).await
    }

    /// Set up a fresh installation in the background
    ///
    /// A body that fails to encode is reported through `on_complete` like
    /// any other error.
    pub fn setup_async<F>(&self, setup: &Setup, on_complete: F) -> CallHandle
    where
        F: FnOnce(LakeFsResult<ApiResponse<CredentialsWithSecret>>) + Send + 'static,
    {
        info!("Setting up lakeFS in the background for user: {}", setup.username);
        match Params::new().json_body(setup) {
            Ok(params) => self.client.invoke_async(&SETUP, params, on_complete),
            Err(err) => CallHandle::completed(Err(err), on_complete),
        }
    }
}
