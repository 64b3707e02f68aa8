//! HTTP/1.0 request types.
//!
//! The request line is kept close to the wire: the target is the raw token from
//! the request line (query string included, nothing percent-decoded) and the
//! version is whatever text followed the second space. Only the method is
//! restricted, to the two methods this server understands.

use std::fmt;
use std::str::FromStr;

use http::{HeaderMap, header};

use crate::protocol::ParseError;

/// The request methods accepted by the decoder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ParseError;

    /// Method names are case-sensitive, `get` is not `GET`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(ParseError::unsupported_method(other)),
        }
    }
}

/// The request line and header block of a request, before its body is read.
#[derive(Debug, Clone)]
pub struct RequestHeader {
    method: Method,
    target: String,
    version: String,
    headers: HeaderMap,
}

impl RequestHeader {
    pub fn new(method: Method, target: impl Into<String>, version: impl Into<String>, headers: HeaderMap) -> Self {
        Self { method, target: target.into(), version: version.into(), headers }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The declared `content-length`, if the request carries one.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidContentLength`] if the value is not an unsigned integer.
    pub fn content_length(&self) -> Result<Option<u64>, ParseError> {
        let Some(value) = self.headers.get(header::CONTENT_LENGTH) else {
            return Ok(None);
        };

        let value = value.to_str().map_err(|_| ParseError::invalid_content_length("value can't to_str"))?;
        value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ParseError::invalid_content_length(format!("value {value} is not u64")))
    }

    /// Attaches a body, producing the complete request.
    pub fn body(self, body: Option<String>) -> Request {
        Request { header: self, body }
    }
}

/// A fully read request.
///
/// `body` is `Some` exactly when the request declared a `content-length`, and then
/// holds exactly that many bytes.
#[derive(Debug, Clone)]
pub struct Request {
    header: RequestHeader,
    body: Option<String>,
}

impl Request {
    pub fn method(&self) -> Method {
        self.header.method()
    }

    pub fn target(&self) -> &str {
        self.header.target()
    }

    pub fn version(&self) -> &str {
        self.header.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.header.headers()
    }

    /// Looks a header up by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header.headers().get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
