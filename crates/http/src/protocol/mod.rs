//! Core HTTP protocol abstractions.
//!
//! - **Message Handling** ([`message`]): what the response encoder consumes
//!   - [`Message`]: either a response head or a payload item
//!   - [`PayloadItem`]: a chunk of body bytes or EOF
//!   - [`PayloadSize`]: how the body is framed (`Content-Length`, chunked, empty)
//!
//! - **Requests** ([`request`]): [`Request`], [`RequestHeader`] and the accepted [`Method`]s
//!
//! - **Responses** ([`response`]): [`ResponseHead`] and [`ResponseBody`]
//!
//! - **Forms** ([`form`]): urlencoded body decoding into [`FormParams`]
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Request parsing errors
//!   - [`SendError`]: Response sending errors

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod request;
pub use request::Method;
pub use request::Request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseBody;
pub use response::ResponseHead;
pub use response::full_response;
pub use response::gzip_chunked_response;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;

pub mod form;
pub use form::FormParams;
