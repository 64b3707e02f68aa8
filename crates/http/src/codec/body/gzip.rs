//! In-memory gzip compression of response payloads.
//!
//! The output is a complete gzip member: the 10-byte header, the deflate stream
//! and the CRC32 + input size trailer.

use std::io;
use std::io::Write;

use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::trace;

/// Compresses `payload` with the default compression level.
///
/// # Errors
///
/// Returns an error if the encoder fails to write into its buffer.
pub fn gzip(payload: &[u8]) -> io::Result<Bytes> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(payload.len() / 2 + 32), Compression::default());
    encoder.write_all(payload)?;
    let compressed = encoder.finish()?;

    trace!(payload_size = payload.len(), compressed_size = compressed.len(), "gzip payload");
    Ok(Bytes::from(compressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn gunzip(compressed: &[u8]) -> Vec<u8> {
        let mut decoded = Vec::new();
        GzDecoder::new(compressed).read_to_end(&mut decoded).unwrap();
        decoded
    }

    #[test]
    fn header_and_trailer() {
        let payload = b"Hello, this is a compressed and chunked response!";
        let compressed = gzip(payload).unwrap();

        // magic, deflate method
        assert_eq!(&compressed[..3], &[0x1f, 0x8b, 0x08]);

        // trailer ends with the input size, little endian
        let input_size = u32::from_le_bytes(compressed[compressed.len() - 4..].try_into().unwrap());
        assert_eq!(input_size as usize, payload.len());

        assert_eq!(gunzip(&compressed), payload);
    }

    #[test]
    fn empty_payload_is_still_a_gzip_member() {
        let compressed = gzip(b"").unwrap();

        assert!(compressed.len() >= 18);
        assert!(gunzip(&compressed).is_empty());
    }
}
