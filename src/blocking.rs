//! Blocking wrapper around [`LakeFsClient`].
//!
//! Each call blocks the calling thread until the response arrives. Do not use
//! from inside an async context: driving the inner runtime from a runtime
//! worker panics.

use crate::{
    auth::Authentication,
    client::LakeFsClient,
    configuration::Configuration,
    error::LakeFsResult,
    models::{Config, CredentialsWithSecret, Ref, RefList, Setup, TagCreation},
    operation::Operation,
    request::Params,
    response::ApiResponse,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

/// lakeFS client whose calls block the caller
pub struct BlockingClient {
    inner: LakeFsClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// Create a new blocking client with authentication
    pub fn new(
        base_url: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> LakeFsResult<Self> {
        Self::from_client(LakeFsClient::new(base_url, auth)?)
    }

    /// Create a blocking client from a [`Configuration`]
    pub fn from_config(config: Configuration) -> LakeFsResult<Self> {
        Self::from_client(LakeFsClient::from_config(config)?)
    }

    /// Wrap an existing async client
    pub fn from_client(inner: LakeFsClient) -> LakeFsResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// The async client this one drives
    pub fn inner(&self) -> &LakeFsClient {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn invoke_with_info<T>(&self, op: &Operation, params: Params) -> LakeFsResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.block_on(self.inner.invoke_with_info(op, params))
    }

    pub fn invoke<T>(&self, op: &Operation, params: Params) -> LakeFsResult<T>
    where
        T: DeserializeOwned,
    {
        self.block_on(self.inner.invoke(op, params))
    }

    pub fn invoke_empty(&self, op: &Operation, params: Params) -> LakeFsResult<ApiResponse<()>> {
        self.block_on(self.inner.invoke_empty(op, params))
    }

    pub fn get_config(&self) -> LakeFsResult<Config> {
        self.block_on(self.inner.config().get_config())
    }

    pub fn setup(&self, setup: &Setup) -> LakeFsResult<CredentialsWithSecret> {
        self.block_on(self.inner.config().setup(setup))
    }

    pub fn create_tag(&self, repository: &str, tag: &TagCreation) -> LakeFsResult<Ref> {
        self.block_on(self.inner.tags().create_tag(repository, tag))
    }

    pub fn delete_tag(&self, repository: &str, tag: &str) -> LakeFsResult<()> {
        self.block_on(self.inner.tags().delete_tag(repository, tag))
    }

    pub fn get_tag(&self, repository: &str, tag: &str) -> LakeFsResult<Ref> {
        self.block_on(self.inner.tags().get_tag(repository, tag))
    }

    pub fn list_tags(
        &self,
        repository: &str,
        after: Option<&str>,
        amount: Option<i32>,
    ) -> LakeFsResult<RefList> {
        self.block_on(self.inner.tags().list_tags(repository, after, amount))
    }
}
