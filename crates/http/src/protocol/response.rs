//! HTTP response types.
//!
//! Responses are plain `http::Response` values. The head is a `Response<()>`, the
//! body is a [`ResponseBody`] which also decides how the body is framed on the wire.

use std::num::NonZeroUsize;

use bytes::Bytes;
use http::{HeaderValue, Response, StatusCode, header};
use mime::Mime;

/// Type alias for HTTP response headers.
///
/// The status line and header fields of a response, before the body is attached.
pub type ResponseHead = Response<()>;

/// The body of a response together with its framing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Sent as-is, delimited by `Content-Length`.
    Full(Bytes),
    /// Gzip-compressed in memory, then sent with `Transfer-Encoding: chunked`
    /// in pieces of at most `chunk_size` compressed bytes.
    GzipChunked { payload: Bytes, chunk_size: NonZeroUsize },
}

impl ResponseBody {
    pub fn full(bytes: impl Into<Bytes>) -> Self {
        Self::Full(bytes.into())
    }

    pub fn gzip_chunked(payload: impl Into<Bytes>, chunk_size: NonZeroUsize) -> Self {
        Self::GzipChunked { payload: payload.into(), chunk_size }
    }

    /// The uncompressed body bytes.
    pub fn as_bytes(&self) -> &Bytes {
        match self {
            Self::Full(bytes) => bytes,
            Self::GzipChunked { payload, .. } => payload,
        }
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        Self::Full(bytes)
    }
}

impl From<String> for ResponseBody {
    fn from(s: String) -> Self {
        Self::Full(Bytes::from(s))
    }
}

impl From<&'static str> for ResponseBody {
    fn from(s: &'static str) -> Self {
        Self::Full(Bytes::from_static(s.as_bytes()))
    }
}

/// Builds a response whose body will be gzip-compressed and sent chunked.
///
/// `Content-Type` is set from `content_type`; `Content-Encoding` and
/// `Transfer-Encoding` are added by the encoder when the response is written.
pub fn gzip_chunked_response(
    status: StatusCode,
    content_type: &Mime,
    payload: impl Into<Bytes>,
    chunk_size: NonZeroUsize,
) -> Response<ResponseBody> {
    let mut response = Response::new(ResponseBody::gzip_chunked(payload, chunk_size));
    *response.status_mut() = status;
    if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    response
}

/// Builds a plain response with an empty header set.
pub fn full_response(status: StatusCode, body: impl Into<ResponseBody>) -> Response<ResponseBody> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
}
