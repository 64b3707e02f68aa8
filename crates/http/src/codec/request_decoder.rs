//! HTTP request decoder module
//!
//! This module decodes complete HTTP/1.0 requests from a byte stream.
//!
//! # Components
//!
//! - [`RequestDecoder`]: Main decoder that coordinates head and body parsing
//! - Head parsing: Uses [`HeaderDecoder`] for the request line and headers
//! - Body handling: Uses [`LengthDecoder`] to read exactly `content-length` bytes
//!
//! # Example
//!
//! ```
//! use mini_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"POST /add HTTP/1.0\r\ncontent-length: 5\r\n\r\nhello, next"[..]);
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//!
//! assert_eq!(request.body(), Some("hello"));
//! assert_eq!(&buffer[..], b", next");
//! ```

use crate::codec::body::LengthDecoder;
use crate::codec::header::{HeaderDecoder, incomplete_head};
use crate::ensure;
use crate::protocol::{ParseError, PayloadItem, Request, RequestHeader};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

/// Largest request body the decoder will buffer.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// A decoder for HTTP requests that handles both head and body
///
/// The decoder operates in two phases:
/// 1. Head parsing: Decodes the request line and headers using [`HeaderDecoder`]
/// 2. Body parsing: If `content-length` is present, collects exactly that many bytes
///
/// # State Machine
///
/// The decoder maintains its state through the `pending` field:
/// - `None`: Currently parsing the head
/// - `Some(PendingBody)`: Head parsed, collecting the body
#[derive(Debug, Default)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    pending: Option<PendingBody>,
}

/// A request whose head is parsed but whose body is still arriving.
#[derive(Debug)]
struct PendingBody {
    header: RequestHeader,
    expected: u64,
    payload_decoder: LengthDecoder,
    body: BytesMut,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }
}

impl PendingBody {
    fn new(header: RequestHeader, expected: u64) -> Self {
        Self { header, expected, payload_decoder: LengthDecoder::new(expected), body: BytesMut::with_capacity(expected as usize) }
    }

    fn received(&self) -> u64 {
        self.expected - self.payload_decoder.remaining()
    }

    /// Moves available body bytes out of `src`, returns true once the body is complete.
    fn collect(&mut self, src: &mut BytesMut) -> Result<bool, ParseError> {
        while let Some(item) = self.payload_decoder.decode(src)? {
            match item {
                PayloadItem::Chunk(bytes) => self.body.extend_from_slice(&bytes),
                PayloadItem::Eof => return Ok(true),
            }
        }
        Ok(false)
    }

    fn finish(self) -> Result<Request, ParseError> {
        let body = String::from_utf8(self.body.to_vec()).map_err(|e| ParseError::invalid_body(format!("body is not utf-8: {e}")))?;
        Ok(self.header.body(Some(body)))
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode an HTTP request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: Successfully decoded a whole request
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.pending.is_none() {
            let Some(header) = self.header_decoder.decode(src)? else {
                return Ok(None);
            };

            let Some(expected) = header.content_length()? else {
                trace!(method = %header.method(), target = header.target(), "decoded request without body");
                return Ok(Some(header.body(None)));
            };

            ensure!(expected <= MAX_BODY_BYTES, ParseError::too_large_body(expected, MAX_BODY_BYTES));
            self.pending = Some(PendingBody::new(header, expected));
        }

        let Some(pending) = self.pending.as_mut() else {
            return Ok(None);
        };

        if !pending.collect(src)? {
            return Ok(None);
        }

        match self.pending.take() {
            Some(pending) => {
                trace!(method = %pending.header.method(), target = pending.header.target(), body_size = pending.expected, "decoded request");
                pending.finish().map(Some)
            }
            None => Ok(None),
        }
    }

    /// Called once the stream is closed, reports requests that can never complete.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(request) = self.decode(buf)? {
            return Ok(Some(request));
        }

        if let Some(pending) = self.pending.take() {
            return Err(ParseError::body_truncated(pending.expected, pending.received()));
        }

        if buf.is_empty() {
            return Ok(None);
        }

        let error = incomplete_head(buf);
        buf.clear();
        Err(error)
    }
}
