//! Transport seam between the request pipeline and the network.

use async_trait::async_trait;
use http::StatusCode;
use url::Url;

use crate::config::FetchConfig;
use crate::error::TransportError;
use crate::request::TransportConfig;

/// A completed HTTP exchange as the pipeline sees it.
///
/// Only the status line and the body text are consumed; response headers
/// are never inspected.
#[async_trait]
pub trait RawResponse: Send {
    /// Status code of the response.
    fn status(&self) -> StatusCode;

    /// Reason phrase reported alongside the status.
    fn status_text(&self) -> String;

    /// Whether the status is in the 2xx range.
    fn is_ok(&self) -> bool {
        self.status().is_success()
    }

    /// Read the full body as text, consuming the response.
    async fn read_text(self: Box<Self>) -> Result<String, TransportError>;
}

/// Network-call primitive the pipeline dispatches through.
///
/// Implementations that wrap another transport are the seam for concerns the
/// pipeline does not own, such as header injection or request capture.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the HTTP exchange described by `config` against `url`.
    async fn dispatch(
        &self,
        url: Url,
        config: TransportConfig,
    ) -> Result<Box<dyn RawResponse>, TransportError>;
}

/// Default transport backed by a pooled reqwest client.
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &FetchConfig) -> Self {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("failed to build HTTP client");

        Self { inner }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(
        &self,
        url: Url,
        config: TransportConfig,
    ) -> Result<Box<dyn RawResponse>, TransportError> {
        // Request mode is advisory; a native client has no same-origin policy.
        tracing::trace!(mode = config.mode.as_str(), "dispatching through reqwest");

        let mut request = self.inner.request(config.method, url).headers(config.headers);
        if let Some(body) = config.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        Ok(Box::new(ReqwestResponse { inner: response }))
    }
}

struct ReqwestResponse {
    inner: reqwest::Response,
}

#[async_trait]
impl RawResponse for ReqwestResponse {
    fn status(&self) -> StatusCode {
        self.inner.status()
    }

    fn status_text(&self) -> String {
        self.inner
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    }

    async fn read_text(self: Box<Self>) -> Result<String, TransportError> {
        self.inner.text().await.map_err(TransportError::from)
    }
}
