//! HTTP/1.0 client over raw non-blocking connections.
//!
//! This module builds request heads by hand, drains them onto a connection and
//! parses the response straight back off the same connection. It deliberately
//! stays small: one request per connection, bodies framed only by
//! `Content-Length`, no redirects, no chunked transfer encoding, no pooling.
//!
//! # Features
//!
//! - GET, POST and PUT with query parameters, headers and a body
//! - `Content-Length` injected for non-empty request bodies
//! - Status line, header and body parsing with optional JSON decoding
//! - Plain TCP or TLS transport through [`TcpConnector`](crate::network::tcp::TcpConnector)
//! - Any [`Connect`](crate::network::Connect) implementation can stand in for the socket layer
//!
//! # Usage
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::{Client, ResponseBody};
//!
//! # async fn run() -> Result<(), rawhttp::network::application::http::Error> {
//! let client = Client::new("httpbin.org", 80, false);
//! let response = client
//!     .get("/get")
//!     .query("a", "1")
//!     .header("Accept", "application/json")
//!     .send()
//!     .await?;
//!
//! assert_eq!(response.code(), 200);
//! if let ResponseBody::Decoded(value) = response.body() {
//!     println!("{}", value["args"]["a"]);
//! }
//! # Ok(())
//! # }
//! ```

/// [`Client`] facade, its [`Config`] and the [`RequestBuilder`].
pub mod client;
/// Errors raised while running an exchange.
pub mod error;
/// Ordered, case-insensitive header storage.
pub mod headers;
mod io;
/// Request model, head serialization and the [`RequestWriter`].
pub mod request;
/// Response model and the [`ResponseReader`].
pub mod response;

pub use client::{Client, Config, RequestBuilder};
pub use error::Error;
pub use headers::HeaderMap;
pub use request::{Method, Request, RequestWriter, encode_head, encode_target, with_content_length};
pub use response::{HttpResponse, ResponseBody, ResponseReader, StatusLine};
