//! HTTP codec module for encoding and decoding HTTP messages
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: Decodes a whole HTTP/1.0 request (head and `content-length` body)
//!   - Head parsing via [`header`] module
//!   - Body reading via [`body`] module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: Encodes outgoing HTTP responses
//!   - Status line and header encoding via [`header`] module
//!   - `Content-Length` or chunked payload encoding via [`body`] module
//!   - [`gzip`] compression of whole payloads
//!
//! # Example
//!
//! ```
//! use mini_http::codec::{RequestDecoder, ResponseEncoder};
//! use mini_http::protocol::{Message, PayloadItem, PayloadSize, ResponseHead};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::{Bytes, BytesMut};
//!
//! // Decode incoming request
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::from(&b"GET / HTTP/1.0\r\n\r\n"[..]);
//! let request = decoder.decode(&mut request_buffer).unwrap().unwrap();
//! assert_eq!(request.target(), "/");
//!
//! // Encode outgoing response
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! let head = ResponseHead::new(());
//! encoder.encode(Message::<_, Bytes>::Header((head, PayloadSize::Length(2))), &mut response_buffer).unwrap();
//! encoder.encode(Message::<(ResponseHead, PayloadSize)>::from(Bytes::from_static(b"ok")), &mut response_buffer).unwrap();
//! encoder.encode(Message::<(ResponseHead, PayloadSize)>::Payload(PayloadItem::Eof), &mut response_buffer).unwrap();
//! assert_eq!(&response_buffer[..], b"HTTP/1.0 200 OK\r\nContent-Length: 2\r\n\r\nok");
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use body::gzip;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
