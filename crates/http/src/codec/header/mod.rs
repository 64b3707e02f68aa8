//! HTTP header processing module
//!
//! - [`HeaderDecoder`]: decodes the request line and header block from raw bytes
//!   - CRLF terminated lines, first empty line ends the head
//!   - case-folded names, trimmed values, first duplicate wins
//!   - head size limit enforcement
//!
//! - [`HeaderEncoder`]: encodes the response status line and headers
//!   - `HTTP/1.0` status line with canonical reason phrase
//!   - Title-Case header names
//!   - `Content-Length` or `Transfer-Encoding` computed from the payload size

mod header_decoder;
mod header_encoder;

pub(crate) use header_decoder::incomplete_head;
pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
