//! Fetch client and the request execution pipeline.

use http::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{FetchError, NormalizedError, Result, TransportError};
use crate::request::{self, ErrorMode, RequestDescriptor};
use crate::response;
use crate::transport::{ReqwestTransport, Transport};

/// Fetch-style HTTP helper with uniform error normalization.
///
/// The client keeps no per-call state: every call runs the same stateless
/// pipeline, and concurrent calls share nothing mutable.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    config: Arc<FetchConfig>,
}

impl FetchClient {
    /// Create a client with the built-in reqwest transport.
    pub fn new(config: FetchConfig) -> Self {
        let transport = Arc::new(ReqwestTransport::new(&config));
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Create a client that dispatches through a custom transport.
    pub fn with_transport(config: FetchConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Issue a GET request.
    pub async fn get(&self, descriptor: impl Into<RequestDescriptor>) -> Result<Value> {
        self.execute(Method::GET, descriptor.into()).await
    }

    /// Issue a POST request.
    pub async fn post(&self, descriptor: impl Into<RequestDescriptor>) -> Result<Value> {
        self.execute(Method::POST, descriptor.into()).await
    }

    /// Issue a PUT request.
    pub async fn put(&self, descriptor: impl Into<RequestDescriptor>) -> Result<Value> {
        self.execute(Method::PUT, descriptor.into()).await
    }

    /// Issue a PATCH request.
    pub async fn patch(&self, descriptor: impl Into<RequestDescriptor>) -> Result<Value> {
        self.execute(Method::PATCH, descriptor.into()).await
    }

    /// Issue a HEAD request.
    pub async fn head(&self, descriptor: impl Into<RequestDescriptor>) -> Result<Value> {
        self.execute(Method::HEAD, descriptor.into()).await
    }

    /// Issue an OPTIONS request.
    pub async fn options(&self, descriptor: impl Into<RequestDescriptor>) -> Result<Value> {
        self.execute(Method::OPTIONS, descriptor.into()).await
    }

    /// Issue a DELETE request.
    pub async fn delete(&self, descriptor: impl Into<RequestDescriptor>) -> Result<Value> {
        self.execute(Method::DELETE, descriptor.into()).await
    }

    /// Issue a request with an arbitrary method.
    pub async fn request(
        &self,
        method: Method,
        descriptor: impl Into<RequestDescriptor>,
    ) -> Result<Value> {
        self.execute(method, descriptor.into()).await
    }

    /// Run the full pipeline for one call, applying the error mode.
    async fn execute(&self, method: Method, descriptor: RequestDescriptor) -> Result<Value> {
        match self.dispatch(method, &descriptor).await {
            Err(FetchError::Request(failure)) if descriptor.on_error == ErrorMode::Log => {
                error!(
                    status = failure.status,
                    status_text = %failure.status_text,
                    body = ?failure.body,
                    "fetch error"
                );
                Ok(Value::Null)
            }
            outcome => outcome,
        }
    }

    /// Build, dispatch, and interpret one request.
    async fn dispatch(&self, method: Method, descriptor: &RequestDescriptor) -> Result<Value> {
        let (uri, config) = request::build(descriptor, method);
        let url = self
            .resolve(&uri)
            .map_err(|e| FetchError::Request(NormalizedError::from_transport(e)))?;

        debug!(method = %config.method, url = %url, "dispatching request");

        let raw = match self.transport.dispatch(url, config).await {
            Ok(raw) => raw,
            Err(e) => return Err(FetchError::Request(NormalizedError::from_transport(e))),
        };

        if raw.is_ok() {
            let text = raw
                .read_text()
                .await
                .map_err(|e| FetchError::Request(NormalizedError::from_transport(e)))?;
            Ok(response::interpret(&text)?)
        } else {
            Err(FetchError::Request(NormalizedError::from_response(raw).await))
        }
    }

    /// Join the configured base URL with a descriptor uri.
    fn resolve(&self, uri: &str) -> std::result::Result<Url, TransportError> {
        match &self.config.base_url {
            Some(base) => {
                let base = Url::parse(base).map_err(|e| TransportError::new(e.to_string()))?;
                base.join(uri).map_err(|e| TransportError::new(e.to_string()))
            }
            None => Url::parse(uri).map_err(|e| TransportError::new(e.to_string())),
        }
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}
