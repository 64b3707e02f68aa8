//! A minimal asynchronous HTTP/1.0 server core
//!
//! This crate serves exactly one request per connection: it decodes the request,
//! hands it to a [`handler::Handler`], writes the response and closes the write half.
//! Responses are either `Content-Length` delimited or gzip-compressed and sent with
//! `Transfer-Encoding: chunked` in fixed-size chunks.
//!
//! # Features
//!
//! - `GET` and `POST` requests, anything else is answered with `501 Not Implemented`
//! - Request bodies delimited by `Content-Length`, read fully before the handler runs
//! - Case-insensitive header lookup
//! - `application/x-www-form-urlencoded` body decoding
//! - Gzip compressed chunked responses with a configurable chunk size
//! - Asynchronous I/O using tokio
//!
//! # Example
//!
//! ```no_run
//! use http::StatusCode;
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use mini_http::connection::HttpConnection;
//! use mini_http::handler::make_handler;
//! use mini_http::protocol::{Request, full_response};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8000").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(|request: Request| async move {
//!         info!(target = request.target(), "hello");
//!         Ok::<_, Infallible>(full_response(StatusCode::OK, "Hello World!\r\n"))
//!     }));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             if let Err(e) = HttpConnection::new(reader, writer).process(handler).await {
//!                 error!(cause = %e, "connection finished with error");
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: connection lifecycle and the [`connection::ResponseWriter`]
//! - [`protocol`]: requests, responses, form decoding and error types
//! - [`codec`]: request decoding and response encoding
//! - [`handler`]: the request handler trait
//!
//! # Limitations
//!
//! - No keep-alive, no pipelining, no HTTP/1.1 features beyond chunked responses
//! - Maximum request head size: 8KB
//! - Maximum request body size: 1MB
//! - Chunked request bodies are not accepted

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
