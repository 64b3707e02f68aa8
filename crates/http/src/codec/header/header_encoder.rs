//! HTTP response head encoder
//!
//! Serializes the status line and header fields of a response. The framing
//! headers are owned by the encoder: whatever the handler put into
//! `Content-Length` or `Transfer-Encoding` is replaced by the value matching the
//! [`PayloadSize`] the body is actually sent with.
//!
//! Every response is written with an `HTTP/1.0` status line, and header names are
//! written in canonical Title-Case (`content-type` becomes `Content-Type`).

use crate::protocol::{PayloadSize, ResponseHead, SendError};

use bytes::{BufMut, BytesMut};

use http::header;
use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for HTTP response heads implementing the [`Encoder`] trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderEncoder;

impl Encoder<(ResponseHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    /// Encodes the response head into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns error if writing to the buffer fails
    fn encode(&mut self, item: (ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (header, payload_size) = item;

        dst.reserve(INIT_HEADER_SIZE);
        let status = header.status();
        write!(FastWrite(dst), "HTTP/1.0 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or("Unknown"))?;

        for (header_name, header_value) in header.headers() {
            if *header_name == header::CONTENT_LENGTH || *header_name == header::TRANSFER_ENCODING {
                continue;
            }
            put_title_case(dst, header_name.as_str());
            dst.put_slice(b": ");
            dst.put_slice(header_value.as_bytes());
            dst.put_slice(b"\r\n");
        }

        match payload_size {
            PayloadSize::Length(n) => write!(FastWrite(dst), "Content-Length: {n}\r\n")?,
            PayloadSize::Chunked { .. } => dst.put_slice(b"Transfer-Encoding: chunked\r\n"),
            PayloadSize::Empty => dst.put_slice(b"Content-Length: 0\r\n"),
        }

        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Writes a lower-case header name with the first letter of every `-` separated word upper-cased.
fn put_title_case(dst: &mut BytesMut, name: &str) {
    let mut upper = true;
    for b in name.bytes() {
        dst.put_u8(if upper { b.to_ascii_uppercase() } else { b });
        upper = b == b'-';
    }
}

/// Fast writer implementation for writing to BytesMut.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
