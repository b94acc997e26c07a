use std::time::Duration;

use log::{debug, warn};

use super::error::Error;
use super::headers::HeaderMap;
use super::request::{Method, Request, RequestWriter};
use super::response::{HttpResponse, ResponseReader};
use crate::network::tcp::TcpConnector;
use crate::network::{Close, Connect};

/// Where and how a [`Client`] connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Wrap every connection in TLS.
    pub ssl: bool,
    /// Deadline for a whole exchange, connect included. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ssl: false,
            timeout: None,
        }
    }

    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP/1.0 client bound to one host.
///
/// Holds configuration only. Each request opens a fresh connection, writes the
/// request, reads the response and closes the connection again, so calls on the
/// same client are independent of each other.
#[derive(Debug, Clone)]
pub struct Client<N = TcpConnector> {
    config: Config,
    network: N,
}

impl Client<TcpConnector> {
    pub fn new(host: impl Into<String>, port: u16, ssl: bool) -> Self {
        Self::from_config(Config::new(host, port).with_ssl(ssl))
    }

    pub fn from_config(config: Config) -> Self {
        Self::with_connector(config, TcpConnector::new())
    }
}

impl<N: Connect> Client<N> {
    /// Client that opens its connections through `network`.
    pub fn with_connector(config: Config, network: N) -> Self {
        Self { config, network }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connector(&self) -> &N {
        &self.network
    }

    pub fn get(&self, path: &str) -> RequestBuilder<'_, N> {
        RequestBuilder::new(self, Method::Get, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder<'_, N> {
        RequestBuilder::new(self, Method::Post, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder<'_, N> {
        RequestBuilder::new(self, Method::Put, path)
    }

    /// Run one request/response exchange on a new connection.
    pub async fn execute(&self, request: Request) -> Result<HttpResponse, Error> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(&request))
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => self.exchange(&request).await,
        }
    }

    async fn exchange(&self, request: &Request) -> Result<HttpResponse, Error> {
        let Config {
            host, port, ssl, ..
        } = &self.config;
        let mut connection = self.network.connect(host, *port, *ssl).await?;

        let result = Self::round_trip(&mut connection, host, request).await;
        if let Err(e) = connection.close() {
            warn!("failed to close connection to {host}:{port}: {e}");
        }
        result
    }

    async fn round_trip(
        connection: &mut N::Connection,
        host: &str,
        request: &Request,
    ) -> Result<HttpResponse, Error> {
        RequestWriter::new(&mut *connection).send(host, request).await?;
        let response = ResponseReader::new(connection).read_response().await?;
        debug!(
            "{} {} -> {} ({:?})",
            request.method,
            request.path,
            response.code(),
            response.header("Content-Type")
        );
        Ok(response)
    }
}

/// Builder for a request on a [`Client`].
///
/// Query parameters, headers and body all start out empty.
#[derive(Debug)]
pub struct RequestBuilder<'a, N> {
    client: &'a Client<N>,
    request: Request,
}

impl<'a, N: Connect> RequestBuilder<'a, N> {
    fn new(client: &'a Client<N>, method: Method, path: &str) -> Self {
        Self {
            client,
            request: Request::new(method, path),
        }
    }

    /// Append a query parameter. Order of calls is the order on the wire.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.parameters.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.request.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.request.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        self.request
    }

    pub async fn send(self) -> Result<HttpResponse, Error> {
        self.client.execute(self.request).await
    }
}
