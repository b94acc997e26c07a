//! TCP transport, optionally wrapped in TLS.
//!
//! [`TcpConnector`] resolves the host with the platform resolver, takes the first
//! address and connects. The socket is non-blocking from then on; a TLS handshake,
//! when requested, is polled on it with a yield between attempts, so an outer
//! timeout can drop a connect or handshake that never finishes.

use std::io::{self, Read as _, Write as _};
use std::net::{Shutdown, TcpStream};

use log::debug;

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};

#[cfg(feature = "tls")]
type Session = rustls::ClientConnection;
#[cfg(not(feature = "tls"))]
type Session = std::convert::Infallible;

/// Opens [`TcpConnection`]s.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    #[cfg(feature = "tls")]
    tls: Option<std::sync::Arc<rustls::ClientConfig>>,
}

impl TcpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-supplied TLS configuration instead of the bundled web PKI roots.
    #[cfg(feature = "tls")]
    pub fn with_tls_config(config: std::sync::Arc<rustls::ClientConfig>) -> Self {
        Self { tls: Some(config) }
    }
}

impl Connect for TcpConnector {
    type Connection = TcpConnection;

    async fn connect(&self, host: &str, port: u16, ssl: bool) -> Result<TcpConnection, Error> {
        // The server name is checked before anything touches the network.
        let session = if ssl {
            Some(self.session(host)?)
        } else {
            None
        };

        let addr = tokio::net::lookup_host((host, port))
            .await
            .map_err(|source| Error::Resolve {
                host: host.to_string(),
                port,
                source,
            })?
            .next()
            .ok_or_else(|| Error::NoAddress {
                host: host.to_string(),
                port,
            })?;
        tokio::task::yield_now().await;

        debug!("connecting to {host}:{port} via {addr}");
        let stream = tokio::net::TcpStream::connect(addr)
            .await
            .and_then(|stream| stream.into_std())
            .map_err(|source| Error::Connect { addr, source })?;
        stream.set_nonblocking(true)?;

        match session {
            Some(session) => handshake(host, session, stream).await,
            None => Ok(TcpConnection::Plain(stream)),
        }
    }
}

impl TcpConnector {
    #[cfg(feature = "tls")]
    fn session(&self, host: &str) -> Result<Session, Error> {
        use rustls::pki_types::ServerName;
        use std::sync::Arc;

        let config = match &self.tls {
            Some(config) => config.clone(),
            None => {
                let mut root_store = rustls::RootCertStore::empty();
                root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
                Arc::new(
                    rustls::ClientConfig::builder()
                        .with_root_certificates(root_store)
                        .with_no_client_auth(),
                )
            }
        };
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| Error::InvalidServerName(format!("{host}: {e}")))?;
        rustls::ClientConnection::new(config, server_name).map_err(|e| Error::Tls(e.to_string()))
    }

    #[cfg(not(feature = "tls"))]
    fn session(&self, _host: &str) -> Result<Session, Error> {
        Err(Error::Tls("tls support not compiled in".to_string()))
    }
}

/// Drive the handshake on a non-blocking socket until it completes.
#[cfg(feature = "tls")]
async fn handshake(
    host: &str,
    mut session: Session,
    mut stream: TcpStream,
) -> Result<TcpConnection, Error> {
    while session.is_handshaking() {
        match session.complete_io(&mut stream) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => return Err(Error::Tls(e.to_string())),
        }
        tokio::task::yield_now().await;
    }
    while session.wants_write() {
        match session.write_tls(&mut stream) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => tokio::task::yield_now().await,
            Err(e) => return Err(Error::Tls(e.to_string())),
        }
    }
    log::trace!(
        "tls handshake with {host} done: {:?}",
        session.protocol_version()
    );
    Ok(TcpConnection::Tls(Box::new(rustls::StreamOwned::new(
        session, stream,
    ))))
}

#[cfg(not(feature = "tls"))]
async fn handshake(
    _host: &str,
    session: Session,
    _stream: TcpStream,
) -> Result<TcpConnection, Error> {
    match session {}
}

/// A connected socket, plain or TLS.
#[derive(Debug)]
pub enum TcpConnection {
    Plain(TcpStream),
    #[cfg(feature = "tls")]
    Tls(Box<rustls::StreamOwned<rustls::ClientConnection, TcpStream>>),
}

impl Read for TcpConnection {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let result = match self {
            TcpConnection::Plain(stream) => stream.read(buf),
            #[cfg(feature = "tls")]
            TcpConnection::Tls(stream) => stream.read(buf),
        };
        match result {
            // A peer that drops TCP without close_notify still ended the stream.
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(0),
            other => Ok(other?),
        }
    }
}

impl Write for TcpConnection {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let written = match self {
            TcpConnection::Plain(stream) => stream.write(buf)?,
            #[cfg(feature = "tls")]
            TcpConnection::Tls(stream) => stream.write(buf)?,
        };
        Ok(written)
    }

    fn flush(&mut self) -> Result<(), Error> {
        match self {
            TcpConnection::Plain(stream) => stream.flush()?,
            #[cfg(feature = "tls")]
            TcpConnection::Tls(stream) => stream.flush()?,
        }
        Ok(())
    }
}

impl Close for TcpConnection {
    fn close(self) -> Result<(), Error> {
        let stream = match self {
            TcpConnection::Plain(stream) => stream,
            #[cfg(feature = "tls")]
            TcpConnection::Tls(stream) => {
                let (mut session, mut sock) = (*stream).into_parts();
                session.send_close_notify();
                // Best effort: a full socket buffer just loses the alert.
                let _ = session.write_tls(&mut sock);
                sock
            }
        };
        match stream.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => Ok(other?),
        }
    }
}

impl Connection for TcpConnection {}
