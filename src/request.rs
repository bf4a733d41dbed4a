//! Request descriptors and the assembled transport configuration.

use http::{HeaderMap, HeaderValue, Method, header};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::encode;

/// How a failed request is surfaced to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Fail the returned future with the normalized error.
    #[default]
    Propagate,
    /// Log the normalized error and resolve with `Value::Null`.
    Log,
}

/// Caller-supplied description of a single request.
///
/// A descriptor is read-only input to the pipeline: encoding produces fresh
/// outputs, so one descriptor can back any number of calls.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Target path or URL.
    pub uri: String,
    /// Optional key-value payload, routed to the query string or the body
    /// depending on the method.
    pub data: Option<Value>,
    /// Encode the body as form-urlencoded instead of JSON.
    pub urlencoded: bool,
    /// Failure delivery mode for this call.
    pub on_error: ErrorMode,
}

impl RequestDescriptor {
    /// Create a descriptor for the given uri.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            data: None,
            urlencoded: false,
            on_error: ErrorMode::default(),
        }
    }

    /// Attach a payload. A payload that fails to serialize is logged and
    /// dropped.
    pub fn data<T: Serialize>(mut self, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => self.data = Some(value),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize request payload");
            }
        }
        self
    }

    /// Encode the payload as a form-urlencoded body instead of JSON.
    pub fn urlencoded(mut self) -> Self {
        self.urlencoded = true;
        self
    }

    /// Log failures instead of surfacing them to the caller.
    pub fn log_errors(mut self) -> Self {
        self.on_error = ErrorMode::Log;
        self
    }
}

impl From<&str> for RequestDescriptor {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for RequestDescriptor {
    fn from(uri: String) -> Self {
        Self::new(uri)
    }
}

/// Browser-style request mode forwarded to the transport.
///
/// Advisory for native transports, which have no same-origin policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMode {
    /// Cross-origin requests allowed.
    #[default]
    Cors,
    /// Same-origin requests only.
    SameOrigin,
    /// Cross-origin without readable response.
    NoCors,
}

impl RequestMode {
    /// The fetch-style name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cors => "cors",
            Self::SameOrigin => "same-origin",
            Self::NoCors => "no-cors",
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully assembled input to the transport. Owned by exactly one in-flight
/// call.
#[derive(Debug)]
pub struct TransportConfig {
    /// HTTP method.
    pub method: Method,
    /// Request mode.
    pub mode: RequestMode,
    /// Headers; exactly one Content-Type, nothing else.
    pub headers: HeaderMap,
    /// Serialized body, if the method and payload produced one.
    pub body: Option<String>,
}

/// Combine the encoded payload with the fixed transport fields.
///
/// Returns the final uri (query string included for query-routed methods)
/// alongside the config. No headers beyond Content-Type are set here; header
/// injection belongs to a wrapping [`Transport`](crate::Transport).
pub(crate) fn build(descriptor: &RequestDescriptor, method: Method) -> (String, TransportConfig) {
    let payload = encode::encode(descriptor, &method);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(payload.content_type),
    );

    let config = TransportConfig {
        method,
        mode: RequestMode::Cors,
        headers,
        body: payload.body,
    };
    (payload.uri, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_from_uri() {
        let descriptor = RequestDescriptor::from("/users");
        assert_eq!(descriptor.uri, "/users");
        assert!(descriptor.data.is_none());
        assert!(!descriptor.urlencoded);
        assert_eq!(descriptor.on_error, ErrorMode::Propagate);
    }

    #[test]
    fn test_descriptor_setters() {
        let descriptor = RequestDescriptor::new("/users")
            .data(&json!({"name": "ada"}))
            .urlencoded()
            .log_errors();

        assert_eq!(descriptor.data, Some(json!({"name": "ada"})));
        assert!(descriptor.urlencoded);
        assert_eq!(descriptor.on_error, ErrorMode::Log);
    }

    #[test]
    fn test_build_sets_single_content_type() {
        let descriptor = RequestDescriptor::new("/users").data(&json!({"a": 1}));
        let (uri, config) = build(&descriptor, Method::POST);

        assert_eq!(uri, "/users");
        assert_eq!(config.method, Method::POST);
        assert_eq!(config.mode, RequestMode::Cors);
        assert_eq!(config.headers.len(), 1);
        assert_eq!(
            config.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(config.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_build_leaves_descriptor_untouched() {
        let descriptor = RequestDescriptor::new("/users").data(&json!({"a": "1"}));
        let before = descriptor.clone();

        let _ = build(&descriptor, Method::GET);

        assert_eq!(descriptor.uri, before.uri);
        assert_eq!(descriptor.data, before.data);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(RequestMode::Cors.to_string(), "cors");
        assert_eq!(RequestMode::SameOrigin.as_str(), "same-origin");
        assert_eq!(RequestMode::NoCors.as_str(), "no-cors");
    }
}
