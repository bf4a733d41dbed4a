//! # fetchkit
//!
//! A small fetch-style HTTP request helper: one stateless pipeline that
//! encodes payloads by method, dispatches through a pluggable transport,
//! decodes bodies as text-then-JSON, and normalizes failures into a uniform
//! record.
//!
//! ## Features
//!
//! - **Method-aware encoding**: GET/HEAD/OPTIONS payloads become query
//!   strings; every other method gets a JSON or form-urlencoded body
//! - **Two-step decoding**: bodies are read as text and parsed in a second
//!   step, so an empty 2xx body is an empty object rather than an error
//! - **Uniform failures**: one [`NormalizedError`] shape for both "server
//!   answered non-2xx" and "no response ever arrived" (`status == 0`)
//! - **Pluggable transport**: the network primitive sits behind a trait,
//!   with a reqwest-backed default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fetchkit::{FetchClient, FetchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FetchConfig::builder()
//!         .base_url("https://api.example.com")
//!         .build();
//!     let client = FetchClient::new(config);
//!
//!     let user = client.get("/users/7").await?;
//!     println!("name: {}", user["name"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Payloads and failure handling
//!
//! ```rust,no_run
//! use fetchkit::{FetchClient, FetchError, RequestDescriptor};
//! use serde_json::json;
//!
//! # async fn run(client: FetchClient) {
//! let descriptor = RequestDescriptor::new("/orders")
//!     .data(&json!({"item": "widget", "quantity": 5}));
//!
//! match client.post(descriptor).await {
//!     Ok(order) => println!("created {}", order["id"]),
//!     Err(FetchError::Request(failure)) if failure.is_transport() => {
//!         println!("request never completed: {failure}");
//!     }
//!     Err(FetchError::Request(failure)) => {
//!         println!("server said {} {}", failure.status, failure.status_text);
//!     }
//!     Err(FetchError::Decode(e)) => println!("unparseable success body: {e}"),
//! }
//! # }
//! ```

mod client;
mod config;
mod encode;
mod error;
mod request;
mod response;
mod transport;

pub use client::FetchClient;
pub use config::{FetchConfig, FetchConfigBuilder};
pub use error::{ErrorBody, FetchError, NormalizedError, Result, TransportError};
pub use request::{ErrorMode, RequestDescriptor, RequestMode, TransportConfig};
pub use transport::{RawResponse, ReqwestTransport, Transport};

// Re-export common types
pub use http::{Method, StatusCode};
pub use serde_json::Value;

/// Prelude for common imports.
///
/// ```
/// use fetchkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::FetchClient;
    pub use crate::config::{FetchConfig, FetchConfigBuilder};
    pub use crate::error::{ErrorBody, FetchError, NormalizedError, Result};
    pub use crate::request::{ErrorMode, RequestDescriptor};
    pub use crate::transport::{RawResponse, Transport};
    pub use http::{Method, StatusCode};
}
