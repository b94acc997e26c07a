//! # Application Layer Protocols
//!
//! Protocol clients built on top of the [`Connection`](crate::network::Connection)
//! traits. Each client drives a non-blocking connection cooperatively and owns no
//! state beyond its configuration, so a fresh connection is used for every exchange.

/// HTTP/1.0 client.
///
/// Provides request serialization, response parsing and the [`http::Client`]
/// facade with GET, POST and PUT entry points.
pub mod http;
