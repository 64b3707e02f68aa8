use std::num::NonZeroUsize;

use bytes::{Buf, Bytes};

/// Represents a HTTP message that can either be a header or payload.
///
/// The response encoder consumes a stream of these: exactly one `Header`,
/// followed by payload items up to and including [`PayloadItem::Eof`].
pub enum Message<T, Data: Buf = Bytes> {
    /// Contains the header information of type `T`
    Header(T),
    /// Contains a chunk of payload data or EOF marker
    Payload(PayloadItem<Data>),
}

/// Represents an item in the HTTP message payload stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem<Data: Buf = Bytes> {
    /// A chunk of payload data
    Chunk(Data),
    /// Marks the end of the payload stream
    Eof,
}

/// How a message body is delimited on the wire.
///
/// - Known length: exactly `n` bytes follow the header, announced by `Content-Length`
/// - Chunked: the body is split into `chunk_size` pieces with hex length prefixes
/// - Empty: no body at all
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked { chunk_size: NonZeroUsize },
    /// Empty payload (no body)
    Empty,
}

impl PayloadSize {
    /// Picks `Length` or `Empty` for a body of `len` bytes.
    #[inline]
    pub fn from_length(len: usize) -> Self {
        if len == 0 { PayloadSize::Empty } else { PayloadSize::Length(len as u64) }
    }
}

impl<T> From<Bytes> for Message<T> {
    fn from(bytes: Bytes) -> Self {
        Self::Payload(PayloadItem::Chunk(bytes))
    }
}
