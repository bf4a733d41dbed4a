//! Response body interpretation.

use serde_json::{Map, Value};

/// Decode a response body that arrived as text.
///
/// The body is read as text and parsed in a second step so that an empty
/// body maps to an empty object instead of a parse failure. A non-empty
/// body that is not valid JSON is an error the caller sees.
pub(crate) fn interpret(text: &str) -> Result<Value, serde_json::Error> {
    if text.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(text)
}
