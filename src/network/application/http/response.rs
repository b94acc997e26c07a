//! Response model and incremental response parsing.
//!
//! [`ResponseReader`] pulls a response off a non-blocking connection in three
//! steps: status line, header block, then a body framed strictly by
//! `Content-Length`. Bytes that arrive ahead of the step that needs them stay in
//! the reader's buffer, so a single read carrying head and body together is fine.
//!
//! End of stream is always a read returning `0`. A read that would block is
//! retried after yielding. What end of stream means depends on the step:
//!
//! | Step        | End of stream                      |
//! |-------------|------------------------------------|
//! | status line | [`ConnectionClosed`](crate::network::error::Error::ConnectionClosed) |
//! | headers     | header collection stops            |
//! | body        | [`Error::IncompleteBody`]          |

use core::str::FromStr;

use log::{debug, trace};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::Error;
use super::headers::HeaderMap;
use super::io;
use crate::network::Read;
use crate::network::error::Error as TransportError;

const READ_CHUNK: usize = 4096;
const JSON_CONTENT_TYPE: &str = "application/json";

/// First line of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    /// Protocol token as written by the server, e.g. `HTTP/1.1`.
    pub version: String,
    pub code: u16,
    /// Reason phrase, which may contain spaces.
    pub reason: String,
}

impl FromStr for StatusLine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_end_matches(['\r', '\n']);
        let mut parts = line.splitn(3, ' ');
        let (Some(version), Some(code), Some(reason)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::MalformedStatusLine(line.to_string()));
        };
        let code = code
            .parse::<u16>()
            .map_err(|_| Error::InvalidStatusCode(code.to_string()))?;
        Ok(Self {
            version: version.to_string(),
            code,
            reason: reason.trim_end().to_string(),
        })
    }
}

/// Decoded response payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseBody {
    /// `Content-Length: 0`.
    #[default]
    Empty,
    Raw(Vec<u8>),
    /// Body whose `Content-Type` starts with `application/json`.
    Decoded(Value),
}

impl ResponseBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseBody::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Decoded(value) => Some(value),
            _ => None,
        }
    }
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    status: StatusLine,
    headers: HeaderMap,
    body: ResponseBody,
}

impl HttpResponse {
    pub fn new(status: StatusLine, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Status code (e.g. 200, 404).
    pub fn code(&self) -> u16 {
        self.status.code
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status.code)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value by name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    pub fn into_parts(self) -> (StatusLine, HeaderMap, ResponseBody) {
        (self.status, self.headers, self.body)
    }

    /// Body as text. A decoded JSON body is re-serialized.
    pub fn text(&self) -> Result<String, Error> {
        match &self.body {
            ResponseBody::Empty => Ok(String::new()),
            ResponseBody::Raw(bytes) => {
                String::from_utf8(bytes.clone()).map_err(|_| Error::InvalidUtf8)
            }
            ResponseBody::Decoded(value) => Ok(value.to_string()),
        }
    }

    /// Deserialize the body into `T`, whatever its declared content type.
    ///
    /// An empty body deserializes as JSON `null`, so `Option<T>` yields `None`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let value = match &self.body {
            ResponseBody::Empty => serde_json::from_value(Value::Null)?,
            ResponseBody::Raw(bytes) => serde_json::from_slice(bytes)?,
            ResponseBody::Decoded(value) => T::deserialize(value)?,
        };
        Ok(value)
    }
}

/// Reads one response off a connection.
#[derive(Debug)]
pub struct ResponseReader<'a, C: ?Sized> {
    connection: &'a mut C,
    buffer: Vec<u8>,
}

impl<'a, C: Read + ?Sized> ResponseReader<'a, C> {
    pub fn new(connection: &'a mut C) -> Self {
        Self {
            connection,
            buffer: Vec::new(),
        }
    }

    /// Status line, headers and body, in that order.
    pub async fn read_response(mut self) -> Result<HttpResponse, Error> {
        let status = self.read_status().await?;
        let headers = self.read_headers().await?;
        let body = self.read_body(&headers).await?;
        Ok(HttpResponse::new(status, headers, body))
    }

    pub async fn read_status(&mut self) -> Result<StatusLine, Error> {
        let line = self
            .read_line()
            .await?
            .ok_or(TransportError::ConnectionClosed)?;
        let status: StatusLine = decode(&line)?.parse()?;
        debug!("{} {} {}", status.version, status.code, status.reason);
        Ok(status)
    }

    /// Header lines up to a blank line or the end of the stream.
    pub async fn read_headers(&mut self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        while let Some(line) = self.read_line().await? {
            if line == b"\r\n" || line == b"\n" {
                break;
            }
            let line = decode(&line)?;
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::MalformedHeader(line.trim_end().to_string()))?;
            headers.insert(name, value.trim());
        }
        trace!("received {} headers", headers.len());
        Ok(headers)
    }

    /// Body of exactly `Content-Length` bytes, JSON-decoded when declared so.
    pub async fn read_body(&mut self, headers: &HeaderMap) -> Result<ResponseBody, Error> {
        let declared = headers
            .get("Content-Length")
            .ok_or(Error::MissingContentLength)?;
        let length = declared
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::InvalidContentLength(declared.to_string()))?;
        if length == 0 {
            return Ok(ResponseBody::Empty);
        }

        while self.buffer.len() < length {
            let shortfall = length - self.buffer.len();
            if self.fill(shortfall).await? == 0 {
                return Err(Error::IncompleteBody {
                    expected: length,
                    received: self.buffer.len(),
                });
            }
        }
        let rest = self.buffer.split_off(length);
        let body = std::mem::replace(&mut self.buffer, rest);
        trace!("received {length} byte body");

        match headers.get("Content-Type") {
            Some(content_type) if content_type.starts_with(JSON_CONTENT_TYPE) => {
                Ok(ResponseBody::Decoded(serde_json::from_slice(&body)?))
            }
            _ => Ok(ResponseBody::Raw(body)),
        }
    }

    /// Next line including its terminator, or whatever is left at end of stream.
    async fn read_line(&mut self) -> Result<Option<Vec<u8>>, Error> {
        let mut searched = 0;
        loop {
            if let Some(pos) = self.buffer[searched..].iter().position(|&b| b == b'\n') {
                let end = searched + pos + 1;
                return Ok(Some(self.buffer.drain(..end).collect()));
            }
            searched = self.buffer.len();
            if self.fill(READ_CHUNK).await? == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(std::mem::take(&mut self.buffer)));
            }
        }
    }

    /// Append up to `max` bytes to the buffer. Returns `0` at end of stream.
    async fn fill(&mut self, max: usize) -> Result<usize, Error> {
        let start = self.buffer.len();
        self.buffer.resize(start + max.min(READ_CHUNK * 16), 0);
        let result = io::read_some(&mut *self.connection, &mut self.buffer[start..]).await;
        let n = *result.as_ref().unwrap_or(&0);
        self.buffer.truncate(start + n);
        Ok(result?)
    }
}

fn decode(line: &[u8]) -> Result<&str, Error> {
    core::str::from_utf8(line).map_err(|_| Error::InvalidUtf8)
}
