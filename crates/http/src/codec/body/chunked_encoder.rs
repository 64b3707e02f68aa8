//! Chunked transfer-coding, as defined in
//! [RFC 7230 Section 4.1](https://tools.ietf.org/html/rfc7230#section-4.1).
//!
//! Every payload chunk is cut into pieces of at most `chunk_size` bytes, each
//! framed as `<HEX-LEN>\r\n<bytes>\r\n`. EOF writes the last-chunk `0\r\n\r\n`
//! with an empty trailer section.

use std::cmp;
use std::io::Write;
use std::num::NonZeroUsize;

use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BufMut, BytesMut};

use tokio_util::codec::Encoder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedEncoder {
    eof: bool,
    chunk_size: NonZeroUsize,
}

impl ChunkedEncoder {
    pub fn new(chunk_size: NonZeroUsize) -> Self {
        Self { eof: false, chunk_size }
    }

    pub fn is_finish(&self) -> bool {
        self.eof
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for ChunkedEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.eof {
            return Ok(());
        }

        match item {
            // an empty data chunk would read as the last-chunk, so nothing is written for it
            PayloadItem::Chunk(mut bytes) => {
                while bytes.has_remaining() {
                    let len = cmp::min(self.chunk_size.get(), bytes.remaining());
                    write!(helper::Writer(dst), "{len:X}\r\n")?;
                    dst.reserve(len + 2);
                    dst.put((&mut bytes).take(len));
                    dst.extend_from_slice(b"\r\n");
                }
                Ok(())
            }
            PayloadItem::Eof => {
                self.eof = true;
                dst.extend_from_slice(b"0\r\n\r\n");
                Ok(())
            }
        }
    }
}

mod helper {
    use bytes::{BufMut, BytesMut};
    use std::io;

    pub struct Writer<'a>(pub &'a mut BytesMut);

    impl io::Write for Writer<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.put_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
