//! Payload encoding: query-string routing and body serialization.

use http::Method;
use serde_json::Value;

use crate::request::RequestDescriptor;

pub(crate) const JSON: &str = "application/json";
pub(crate) const FORM: &str = "application/x-www-form-urlencoded";

/// Outcome of routing a descriptor's payload for one method.
#[derive(Debug, PartialEq)]
pub(crate) struct EncodedPayload {
    pub uri: String,
    pub body: Option<String>,
    pub content_type: &'static str,
}

/// Methods whose payload travels in the URL rather than the body.
fn routes_to_query(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
}

/// Encode a descriptor's payload for the given method.
///
/// The descriptor is never written to; the returned uri is a fresh string
/// even when nothing was appended.
pub(crate) fn encode(descriptor: &RequestDescriptor, method: &Method) -> EncodedPayload {
    let content_type = if descriptor.urlencoded { FORM } else { JSON };
    let mut uri = descriptor.uri.clone();
    let mut body = None;

    if let Some(data) = &descriptor.data {
        if routes_to_query(method) {
            uri = append_query(uri, data);
        } else if descriptor.urlencoded {
            body = form_body(data);
        } else {
            body = Some(data.to_string());
        }
    }

    EncodedPayload {
        uri,
        body,
        content_type,
    }
}

/// Append the payload as an URL-encoded query string, preserving key order.
fn append_query(uri: String, data: &Value) -> String {
    let Some(object) = data.as_object() else {
        tracing::error!("query payload must be a JSON object");
        return uri;
    };
    if object.is_empty() {
        return uri;
    }

    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in object {
        query.append_pair(key, &render(value));
    }

    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{uri}{separator}{}", query.finish())
}

/// Serialize the payload as a form-urlencoded body.
fn form_body(data: &Value) -> Option<String> {
    let Some(object) = data.as_object() else {
        tracing::error!("form-urlencoded payload must be a JSON object");
        return None;
    };

    let pairs: Vec<(&str, String)> = object
        .iter()
        .map(|(key, value)| (key.as_str(), render(value)))
        .collect();

    match serde_urlencoded::to_string(&pairs) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode form payload");
            None
        }
    }
}

/// Render a JSON value the way URL search parameters expect: strings bare,
/// everything else in its JSON form.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
