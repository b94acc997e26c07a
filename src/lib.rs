//! # rawhttp - HTTP/1.0 over raw sockets
//!
//! A small HTTP client that writes request heads by hand and parses responses
//! straight off a non-blocking connection. Every request uses its own connection,
//! which is closed once the response has been read.
//!
//! ## Features
//!
//! ### Protocol
//! - **Request writer**: `METHOD path?query HTTP/1.0`, `Host`, caller headers and
//!   an automatic `Content-Length` for non-empty bodies
//! - **Response reader**: status line, header block and a `Content-Length` framed
//!   body, decoded as JSON when the server says `application/json`
//!
//! ### Transport
//! - Platform name resolution, first address wins
//! - Plain TCP or TLS (rustls with the web PKI roots)
//! - Pluggable: anything implementing [`network::Connect`] can carry requests
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rawhttp = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,no_run
//! use rawhttp::network::application::http::{Client, Config};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), rawhttp::network::application::http::Error> {
//! let config = Config::new("example.com", 443)
//!     .with_ssl(true)
//!     .with_timeout(Duration::from_secs(10));
//! let client = Client::from_config(config);
//!
//! let response = client
//!     .post("/api/items")
//!     .header("Content-Type", "application/json")
//!     .body(r#"{"name":"lamp"}"#)
//!     .send()
//!     .await?;
//! println!("{} {}", response.code(), response.status().reason);
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom transport
//!
//! ```rust,no_run
//! use rawhttp::network::error::Error;
//! use rawhttp::network::{Close, Connect, Connection, Read, Write};
//! # struct Loopback;
//! # impl Read for Loopback {
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Error> { Ok(0) }
//! # }
//! # impl Write for Loopback {
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Error> { Ok(()) }
//! # }
//! # impl Close for Loopback {
//! #     fn close(self) -> Result<(), Error> { Ok(()) }
//! # }
//! impl Connection for Loopback {}
//!
//! struct LoopbackNetwork;
//!
//! impl Connect for LoopbackNetwork {
//!     type Connection = Loopback;
//!
//!     async fn connect(&self, _host: &str, _port: u16, _ssl: bool) -> Result<Loopback, Error> {
//!         Ok(Loopback)
//!     }
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `tls` (default): TLS support through `rustls` and `webpki-roots`

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Transport traits, the TCP/TLS connector and the protocols built on them.
///
/// The HTTP client itself lives in [`network::application::http`].
pub mod network;
