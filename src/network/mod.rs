//! A transport abstraction layer for the HTTP client
//!
//! This module provides the traits a connection has to implement to carry an HTTP
//! exchange, along with the TCP/TLS implementation used by default. The traits are
//! synchronous and non-blocking: a call returns immediately with whatever the
//! underlying socket accepted or produced, and [`Error::WouldBlock`](error::Error::WouldBlock)
//! signals "nothing yet, try again". Higher layers poll them cooperatively.
//!

#![allow(missing_docs)]
#![allow(async_fn_in_trait)]
#![deny(unsafe_code)]

/// Common error types for transport operations
pub mod error;

/// TCP (and optionally TLS) connections
pub mod tcp;

/// Application layer protocols
pub mod application;

use error::Error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

/// Non-blocking read half of a connection.
pub trait Read {
    /// Read available data into `buf`.
    ///
    /// `Ok(0)` means the peer closed the stream. `Err(Error::WouldBlock)` means
    /// no data is available right now.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
}

/// Non-blocking write half of a connection.
pub trait Write {
    /// Write as much of `buf` as the connection accepts right now.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error>;
    /// Push buffered data towards the peer.
    fn flush(&mut self) -> Result<(), Error>;
}

pub trait Close {
    /// Close the connection
    fn close(self) -> Result<(), Error>;
}

/// A bidirectional non-blocking byte stream
pub trait Connection: Read + Write + Close {}

/// Opens connections to a remote host.
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Open a connection to `host:port`, wrapped in TLS when `ssl` is set.
    async fn connect(&self, host: &str, port: u16, ssl: bool) -> Result<Self::Connection, Error>;
}
