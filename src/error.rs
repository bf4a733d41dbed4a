//! Error types and failure normalization.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::transport::RawResponse;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors surfaced by [`FetchClient`](crate::FetchClient).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed, either before a response arrived or with a
    /// non-2xx status. The normalized record tells the two apart.
    #[error("{0}")]
    Request(NormalizedError),

    /// A successful (2xx) response carried a non-empty body that was not
    /// valid JSON. Surfaces as the raw parse error, never as a
    /// [`NormalizedError`].
    #[error("invalid JSON in successful response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The normalized failure record, if this is a request failure.
    pub fn normalized(&self) -> Option<&NormalizedError> {
        match self {
            Self::Request(err) => Some(err),
            Self::Decode(_) => None,
        }
    }
}

/// Uniform record for a failed request.
///
/// `status == 0` with an empty `status_text` means the request never
/// produced a response (DNS failure, refused connection, unusable URL).
/// Any other status is a real HTTP response outside the 2xx range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedError {
    /// HTTP status code, or 0 when no response was received.
    pub status: u16,
    /// Reason phrase of the response, empty for transport failures.
    pub status_text: String,
    /// Best-effort decoded failure body.
    pub body: ErrorBody,
}

/// Body of a normalized failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Failure payload that decoded as JSON.
    Json(Value),
    /// Raw body text, or the stringified transport failure.
    Text(String),
}

impl NormalizedError {
    /// Normalize a received non-2xx response. Never fails: a body that
    /// cannot be read is treated as empty text.
    pub(crate) async fn from_response(response: Box<dyn RawResponse>) -> Self {
        let status = response.status();
        let status_text = response.status_text();
        let text = response.read_text().await.unwrap_or_default();
        let body = match serde_json::from_str(&text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        };
        Self {
            status: status.as_u16(),
            status_text,
            body,
        }
    }

    /// Normalize a failure that produced no response at all.
    pub(crate) fn from_transport(error: TransportError) -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            body: ErrorBody::Text(error.to_string()),
        }
    }

    /// True when the request never produced a response.
    pub fn is_transport(&self) -> bool {
        self.status == 0
    }

    /// True when the server answered with a non-2xx status.
    pub fn is_http(&self) -> bool {
        !self.is_transport()
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_transport() {
            match &self.body {
                ErrorBody::Text(message) => write!(f, "request failed: {message}"),
                ErrorBody::Json(value) => write!(f, "request failed: {value}"),
            }
        } else {
            write!(f, "{} {}", self.status, self.status_text)
        }
    }
}

/// Failure raised by the transport before any response was produced.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Wrap a failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_shape() {
        let err = NormalizedError::from_transport(TransportError::new("connection refused"));
        assert_eq!(err.status, 0);
        assert_eq!(err.status_text, "");
        assert_eq!(err.body, ErrorBody::Text("connection refused".to_string()));
        assert!(err.is_transport());
        assert!(!err.is_http());
    }

    #[test]
    fn test_http_failure_classification() {
        let err = NormalizedError {
            status: 404,
            status_text: "Not Found".to_string(),
            body: ErrorBody::Text(String::new()),
        };
        assert!(err.is_http());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_display() {
        let transport = NormalizedError::from_transport(TransportError::new("dns error"));
        assert_eq!(transport.to_string(), "request failed: dns error");

        let http = NormalizedError {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: ErrorBody::Text("boom".to_string()),
        };
        assert_eq!(http.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn test_normalized_accessor() {
        let err = FetchError::Request(NormalizedError::from_transport(TransportError::new("x")));
        assert!(err.normalized().is_some());

        let decode = FetchError::Decode(serde_json::from_str::<Value>("not json").unwrap_err());
        assert!(decode.normalized().is_none());
    }
}
