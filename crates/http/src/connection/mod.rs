//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: drives one connection:
//!   - decodes a single request from the read half
//!   - turns parse errors into `400`/`501` responses
//!   - calls the handler and writes its response
//!   - shuts the write half down, no keep-alive
//!
//! - [`ResponseWriter`]: serializes responses to the write half:
//!   - `Content-Length` delimited bodies via [`ResponseWriter::write`]
//!   - gzip-compressed chunked bodies via [`ResponseWriter::write_chunked`]

mod http_connection;
mod response_writer;

pub use http_connection::HttpConnection;
pub use response_writer::ResponseWriter;
