//! HTTP body handling module
//!
//! ## Decoders
//! - [`LengthDecoder`]: reads exactly `Content-Length` bytes of a request body
//!
//! ## Encoders
//! - [`ChunkedEncoder`]: chunked transfer encoding with a fixed chunk size
//! - [`LengthEncoder`]: `Content-Length` delimited payloads
//! - [`PayloadEncoder`]: picks one of the above from a [`PayloadSize`](crate::protocol::PayloadSize)
//!
//! ## Compression
//! - [`gzip`]: in-memory gzip of a whole payload
//!
//! Chunked *request* bodies are not supported, a request body is always
//! delimited by `Content-Length`.

mod chunked_encoder;
mod gzip;
mod length_decoder;
mod length_encoder;
mod payload_encoder;

pub use chunked_encoder::ChunkedEncoder;
pub use gzip::gzip;
pub use length_decoder::LengthDecoder;
pub use length_encoder::LengthEncoder;
pub use payload_encoder::PayloadEncoder;
