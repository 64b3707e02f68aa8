use std::num::NonZeroUsize;

use crate::codec::{ResponseEncoder, gzip};
use crate::protocol::{Message, PayloadItem, PayloadSize, ResponseBody, ResponseHead, SendError};
use bytes::{Buf, Bytes, BytesMut};
use http::header::{self, HeaderValue};
use http::{HeaderMap, Response, StatusCode};
use mime::Mime;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;
use tracing::trace;

/// Serializes responses into a byte sink.
///
/// Every `write*` call encodes a whole response into the internal buffer and
/// flushes it before returning. A failed write is returned as is, there is no retry.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
    buffer: BytesMut,
    encoder: ResponseEncoder,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, 8 * 1024)
    }

    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), encoder: ResponseEncoder::new() }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes a `Content-Length` delimited response.
    ///
    /// `headers` are written in order before the computed `Content-Length`.
    pub async fn write(&mut self, status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Result<(), SendError> {
        let body = body.into();
        let payload_size = PayloadSize::from_length(body.len());

        self.encode(Message::<_, Bytes>::Header((head(status, headers), payload_size)))?;
        self.encode(Message::Payload(PayloadItem::Chunk(body)))?;
        self.encode(Message::<_, Bytes>::Payload(PayloadItem::Eof))?;
        self.flush().await
    }

    /// Gzip-compresses `payload` and writes it with `Transfer-Encoding: chunked`.
    ///
    /// The compressed bytes are cut into chunks of exactly `chunk_size` bytes, except
    /// for the last one which holds the remainder.
    pub async fn write_chunked(
        &mut self,
        status: StatusCode,
        content_type: &Mime,
        payload: &[u8],
        chunk_size: NonZeroUsize,
    ) -> Result<(), SendError> {
        let mut headers = HeaderMap::with_capacity(2);
        let content_type = HeaderValue::from_str(content_type.as_ref()).map_err(SendError::invalid_body)?;
        headers.insert(header::CONTENT_TYPE, content_type);

        self.write_gzip_chunked(status, headers, payload, chunk_size).await
    }

    /// Writes a response built by a handler, framed according to its [`ResponseBody`].
    pub async fn write_response(&mut self, response: Response<ResponseBody>) -> Result<(), SendError> {
        let (parts, body) = response.into_parts();
        match body {
            ResponseBody::Full(bytes) => self.write(parts.status, parts.headers, bytes).await,
            ResponseBody::GzipChunked { payload, chunk_size } => {
                self.write_gzip_chunked(parts.status, parts.headers, &payload, chunk_size).await
            }
        }
    }

    /// Shuts down the write half of the sink, the peer sees end of stream.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        Ok(self.writer.shutdown().await?)
    }

    async fn write_gzip_chunked(
        &mut self,
        status: StatusCode,
        mut headers: HeaderMap,
        payload: &[u8],
        chunk_size: NonZeroUsize,
    ) -> Result<(), SendError> {
        let compressed = gzip(payload)?;
        trace!(payload_size = payload.len(), compressed_size = compressed.len(), chunk_size = chunk_size.get(), "write chunked gzip response");

        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));

        self.encode(Message::<_, Bytes>::Header((head(status, headers), PayloadSize::Chunked { chunk_size })))?;
        self.encode(Message::Payload(PayloadItem::Chunk(compressed)))?;
        self.encode(Message::<_, Bytes>::Payload(PayloadItem::Eof))?;
        self.flush().await
    }

    #[inline]
    fn encode<D>(&mut self, item: Message<(ResponseHead, PayloadSize), D>) -> Result<(), SendError>
    where
        D: Buf,
    {
        self.encoder.encode(item, &mut self.buffer)
    }

    #[inline]
    async fn flush(&mut self) -> Result<(), SendError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let result = self.writer.write_all(self.buffer.as_ref()).await;
        self.buffer.clear();
        result?;
        Ok(self.writer.flush().await?)
    }
}

fn head(status: StatusCode, headers: HeaderMap) -> ResponseHead {
    let mut head = ResponseHead::new(());
    *head.status_mut() = status;
    *head.headers_mut() = headers;
    head
}
