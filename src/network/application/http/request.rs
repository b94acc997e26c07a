//! Request serialization and transmission.
//!
//! Serialization is split into pure functions ([`encode_target`],
//! [`with_content_length`], [`encode_head`]) so the exact bytes a request puts on
//! the wire can be checked without a connection. [`RequestWriter`] then drains
//! head and body onto a non-blocking connection.

use core::fmt;
use core::str::FromStr;

use log::{debug, trace};

use super::error::Error;
use super::headers::HeaderMap;
use super::io;
use crate::network::Write;

/// Protocol token sent on the request line.
pub const HTTP_VERSION: &str = "HTTP/1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

/// A request ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    /// Query parameters, serialized in this order.
    pub parameters: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            parameters: Vec::new(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Path plus serialized query string.
    pub fn target(&self) -> String {
        encode_target(&self.path, self.parameters.as_slice())
    }

    /// The full request head as sent to `host`, `Content-Length` included.
    pub fn head(&self, host: &str) -> Vec<u8> {
        let headers = with_content_length(&self.headers, self.body.len());
        encode_head(self.method, &self.target(), host, &headers)
    }
}

/// Append `?k=v&...` to `path` when there are parameters.
///
/// Keys and values are inserted verbatim; nothing is percent-encoded.
pub fn encode_target<K: AsRef<str>, V: AsRef<str>>(path: &str, parameters: &[(K, V)]) -> String {
    if parameters.is_empty() {
        return path.to_string();
    }
    let query = parameters
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

/// Copy of `headers` with `Content-Length` set when the body is non-empty.
pub fn with_content_length(headers: &HeaderMap, body_len: usize) -> HeaderMap {
    let mut headers = headers.clone();
    if body_len > 0 {
        headers.insert("Content-Length", body_len.to_string());
    }
    headers
}

/// Serialize the request line, `Host` and `headers`, ending with a blank line.
pub fn encode_head(method: Method, target: &str, host: &str, headers: &HeaderMap) -> Vec<u8> {
    let mut lines = Vec::with_capacity(headers.len() + 2);
    lines.push(format!("{method} {target} {HTTP_VERSION}"));
    lines.push(format!("Host: {host}"));
    for (name, value) in headers.iter() {
        lines.push(format!("{name}: {value}"));
    }
    let mut head = lines.join("\r\n");
    head.push_str("\r\n\r\n");
    head.into_bytes()
}

/// Writes one request onto a connection.
#[derive(Debug)]
pub struct RequestWriter<'a, C: ?Sized> {
    connection: &'a mut C,
}

impl<'a, C: Write + ?Sized> RequestWriter<'a, C> {
    pub fn new(connection: &'a mut C) -> Self {
        Self { connection }
    }

    /// Send head then body, returning once every byte was accepted.
    pub async fn send(&mut self, host: &str, request: &Request) -> Result<(), Error> {
        let head = request.head(host);
        debug!("{} {} ({} byte body)", request.method, request.target(), request.body.len());
        trace!("request head: {:?}", String::from_utf8_lossy(&head));

        io::write_all(&mut *self.connection, &head).await?;
        if !request.body.is_empty() {
            io::write_all(&mut *self.connection, &request.body).await?;
        }
        io::flush(&mut *self.connection).await?;
        Ok(())
    }
}
