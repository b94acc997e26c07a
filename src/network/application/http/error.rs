//! Error type for HTTP exchanges

use std::time::Duration;

use crate::network::error::Error as TransportError;

/// Errors that abort an HTTP exchange.
///
/// Nothing is recovered locally: any of these ends the request and is handed to
/// the caller of [`Client::execute`](super::Client::execute).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Resolution, connect, TLS or socket failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The status line did not split into version, code and reason.
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),
    /// The status code was not an integer.
    #[error("invalid status code: {0:?}")]
    InvalidStatusCode(String),
    /// A header line had no colon.
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
    /// The response head or a text body was not valid UTF-8.
    #[error("invalid utf-8 in response")]
    InvalidUtf8,
    /// The response carried no `Content-Length` header.
    #[error("response has no Content-Length header")]
    MissingContentLength,
    /// `Content-Length` was not a non-negative integer.
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    /// The peer closed the connection before the declared body length arrived.
    #[error("body ended after {received} of {expected} bytes")]
    IncompleteBody { expected: usize, received: usize },
    /// The body was declared JSON but did not decode.
    #[error("invalid json body: {0}")]
    Json(#[from] serde_json::Error),
    /// The method name is not one the client sends.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
    /// The configured deadline for the whole exchange expired.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}
