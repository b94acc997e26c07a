//! Common error types for transport operations

use std::io;

/// A common error type for transport operations.
///
/// `WouldBlock` is the only transient variant: it tells the caller that a
/// non-blocking socket had nothing to offer and the operation should be retried.
/// Every other variant is fatal to the request in flight.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operation would block; retry later.
    #[error("operation would block")]
    WouldBlock,
    /// The host name could not be resolved.
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    /// The resolver returned no addresses.
    #[error("no addresses found for {host}:{port}")]
    NoAddress { host: String, port: u16 },
    /// A connection attempt failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },
    /// The host is not a valid TLS server name.
    #[error("invalid server name: {0}")]
    InvalidServerName(String),
    /// TLS setup or handshake failed.
    #[error("tls error: {0}")]
    Tls(String),
    /// The connection was closed.
    #[error("connection closed")]
    ConnectionClosed,
    /// Any other I/O failure.
    #[error("io error: {0}")]
    Io(io::Error),
}

impl Error {
    /// Whether the operation should simply be retried.
    pub fn is_would_block(&self) -> bool {
        matches!(self, Error::WouldBlock)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock => Error::WouldBlock,
            io::ErrorKind::NotConnected => Error::ConnectionClosed,
            _ => Error::Io(err),
        }
    }
}
