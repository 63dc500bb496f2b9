use crate::{
    apis::{ConfigApi, TagsApi},
    auth::Authentication,
    configuration::Configuration,
    error::{LakeFsError, LakeFsResult},
    models::ErrorBody,
    negotiate::is_json_mime,
    operation::Operation,
    request::{build, Params, RequestBody, RequestDescriptor},
    response::ApiResponse,
};
use bytes::Bytes;
use log::{debug, info, warn};
use reqwest::{
    header::{HeaderMap, CONTENT_TYPE},
    Client, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use tokio::{sync::oneshot, task::JoinHandle};
use url::Url;

/// Main lakeFS client
///
/// Cloning is cheap: clones share the underlying connection pool and
/// credentials.
#[derive(Clone)]
pub struct LakeFsClient {
    client: Client,
    base_url: Url,
    auth: Arc<dyn Authentication>,
}

impl LakeFsClient {
    /// Create a new lakeFS client with authentication
    pub fn new(
        base_url: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> LakeFsResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Self::with_client(client, base_url, auth)
    }

    /// Create a new lakeFS client with custom reqwest client
    pub fn with_client(
        client: Client,
        base_url: impl AsRef<str>,
        auth: impl Authentication + 'static,
    ) -> LakeFsResult<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        Ok(Self {
            client,
            base_url,
            auth: Arc::new(auth),
        })
    }

    /// Create a client from a [`Configuration`]
    pub fn from_config(config: Configuration) -> LakeFsResult<Self> {
        let client = Client::builder().user_agent(config.user_agent).build()?;
        Self::with_client(client, config.base_path, config.credentials)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get Config API
    pub fn config(&self) -> ConfigApi<'_> {
        ConfigApi::new(self)
    }

    /// Get Tags API
    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(self)
    }

    /// Resolve an operation path against the base URL, keeping any path
    /// prefix the base URL carries (`/api/v1`).
    fn endpoint(&self, path: &str) -> LakeFsResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }

    /// Turn a built request into a reqwest request with authentication
    pub async fn request(&self, descriptor: RequestDescriptor) -> LakeFsResult<RequestBuilder> {
        let url = self.endpoint(&descriptor.path)?;
        debug!("HTTP {} {}", descriptor.method, url);

        let mut headers = descriptor.headers;
        for scheme in descriptor.auth {
            self.auth.apply_auth(*scheme, &mut headers).await?;
        }

        let mut request = self.client.request(descriptor.method, url).headers(headers);

        if !descriptor.query.is_empty() {
            debug!("Query: {:?}", descriptor.query);
            request = request.query(&descriptor.query);
        }

        match descriptor.body {
            Some(RequestBody::Json(body)) => {
                debug!("Request body: {}", body);
                request = request.json(&body);
            }
            Some(RequestBody::Form(fields)) => {
                debug!("Form fields: {:?}", fields.iter().map(|(k, _)| k).collect::<Vec<_>>());
                request = request.form(&fields);
            }
            None => {}
        }

        Ok(request)
    }

    async fn send(&self, op: &Operation, params: Params) -> LakeFsResult<Response> {
        info!("Calling {}", op.id);
        let descriptor = build(op, params)?;
        let request = self.request(descriptor).await?;
        Ok(request.send().await?)
    }

    /// Invoke an operation and decode the response body along with status
    /// and headers
    pub async fn invoke_with_info<T>(
        &self,
        op: &Operation,
        params: Params,
    ) -> LakeFsResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.send(op, params).await?;
        self.handle_response(op, response).await
    }

    /// Invoke an operation and decode the response body
    pub async fn invoke<T>(&self, op: &Operation, params: Params) -> LakeFsResult<T>
    where
        T: DeserializeOwned,
    {
        self.invoke_with_info(op, params)
            .await
            .map(ApiResponse::into_data)
    }

    /// Invoke an operation that declares no response type
    pub async fn invoke_empty(&self, op: &Operation, params: Params) -> LakeFsResult<ApiResponse<()>> {
        let response = self.send(op, params).await?;
        let (status, headers, _) = self.read_response(op, response).await?;
        Ok(ApiResponse::new(status, headers, ()))
    }

    /// Invoke an operation and return the raw response body
    pub async fn invoke_bytes(&self, op: &Operation, params: Params) -> LakeFsResult<ApiResponse<Bytes>> {
        let response = self.send(op, params).await?;
        let (status, headers, body) = self.read_response(op, response).await?;
        Ok(ApiResponse::new(status, headers, body))
    }

    /// Invoke an operation in the background and hand the outcome to
    /// `on_complete`.
    ///
    /// `on_complete` runs exactly once on a runtime worker: with the decoded
    /// response, with an error, or with [`LakeFsError::Canceled`] when
    /// [`CallHandle::cancel`] wins the race against the response. Must be
    /// called from within a tokio runtime.
    pub fn invoke_async<T, F>(&self, op: &'static Operation, params: Params, on_complete: F) -> CallHandle
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(LakeFsResult<ApiResponse<T>>) + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let client = self.clone();

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                // A dropped handle closes the channel without canceling.
                Ok(()) = cancel_rx => {
                    warn!("{} canceled before completion", op.id);
                    Err(LakeFsError::Canceled)
                }
                result = client.invoke_with_info::<T>(op, params) => result,
            };
            on_complete(outcome);
        });

        CallHandle {
            cancel: Mutex::new(Some(cancel_tx)),
            task,
        }
    }

    /// Handle response and deserialize JSON
    async fn handle_response<T>(&self, op: &Operation, response: Response) -> LakeFsResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let (status, headers, body) = self.read_response(op, response).await?;

        if let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            if !is_json_mime(content_type) {
                warn!("{} responded with {}, decoding as JSON anyway", op.id, content_type);
            }
        }

        match serde_json::from_slice::<T>(&body) {
            Ok(data) => Ok(ApiResponse::new(status, headers, data)),
            Err(source) => {
                warn!("{} returned a body that does not match the declared type: {}", op.id, source);
                Err(LakeFsError::Deserialization {
                    source,
                    body: String::from_utf8_lossy(&body).into_owned(),
                })
            }
        }
    }

    /// Read the full body, turning non-2xx statuses into errors
    async fn read_response(
        &self,
        op: &Operation,
        response: Response,
    ) -> LakeFsResult<(StatusCode, HeaderMap, Bytes)> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!("{} responded {} ({} bytes)", op.id, status, body.len());

        if status.is_success() {
            Ok((status, headers, body))
        } else {
            Err(self.handle_error_response(op, status, headers, body))
        }
    }

    /// Handle error responses
    fn handle_error_response(
        &self,
        op: &Operation,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    ) -> LakeFsError {
        // lakeFS reports failures as {"message": "..."}
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|error| error.message);
        let body = String::from_utf8_lossy(&body).into_owned();
        warn!("{} failed with HTTP {}: {}", op.id, status, message.as_deref().unwrap_or(&body));

        LakeFsError::api_error(status.as_u16(), headers, body, message)
    }
}

/// Handle to a call started with [`LakeFsClient::invoke_async`]
#[derive(Debug)]
pub struct CallHandle {
    cancel: Mutex<Option<oneshot::Sender<()>>>,
    task: JoinHandle<()>,
}

impl CallHandle {
    /// Deliver an outcome known before any request is made, keeping the
    /// callback on a runtime worker like every other completion.
    pub(crate) fn completed<T, F>(outcome: LakeFsResult<ApiResponse<T>>, on_complete: F) -> Self
    where
        T: Send + 'static,
        F: FnOnce(LakeFsResult<ApiResponse<T>>) + Send + 'static,
    {
        let (cancel_tx, _) = oneshot::channel::<()>();
        let task = tokio::spawn(async move { on_complete(outcome) });

        Self {
            cancel: Mutex::new(Some(cancel_tx)),
            task,
        }
    }

    /// Cancel the call. The completion callback receives
    /// [`LakeFsError::Canceled`] unless the call already completed, in which
    /// case this does nothing.
    pub fn cancel(&self) {
        let sender = match self.cancel.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }

    /// Whether the completion callback has returned
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait until the completion callback has returned
    pub async fn finished(self) {
        if let Err(err) = self.task.await {
            warn!("completion task failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoAuth;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = LakeFsClient::new("http://localhost:8000/api/v1", NoAuth).unwrap();
        assert_eq!(
            client.endpoint("/config").unwrap().as_str(),
            "http://localhost:8000/api/v1/config"
        );

        let client = LakeFsClient::new("http://localhost:8000/api/v1/", NoAuth).unwrap();
        assert_eq!(
            client.endpoint("/setup_lakefs").unwrap().as_str(),
            "http://localhost:8000/api/v1/setup_lakefs"
        );
    }

    #[test]
    fn invalid_base_url_is_usage_error() {
        let err = LakeFsClient::new("not a url", NoAuth).err().unwrap();
        assert!(matches!(err, LakeFsError::Url(_)));
    }

    #[test]
    fn from_config_uses_base_path() {
        let client = LakeFsClient::from_config(Configuration::new("https://lakefs.example.com/api/v1"))
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://lakefs.example.com/api/v1");
    }
}
