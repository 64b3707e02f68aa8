//! HTTP/1.0 request head decoder
//!
//! Parses the request line and the header block from raw bytes into a
//! [`RequestHeader`]. The head ends at the first empty line; nothing after it is
//! consumed, so the body (if any) stays in the buffer for the payload decoder.
//!
//! # Grammar
//!
//! - Lines are terminated by CRLF
//! - The request line is split on the first two spaces into method, target and version;
//!   the version is the rest of the line and may itself contain spaces
//! - Each header line is split on its first `:`. The name is case-folded, the value
//!   trimmed of surrounding whitespace
//! - When a header name repeats, the first line defines the header
//!
//! # Limits
//!
//! - Maximum head size (request line and headers): 8KB

use bytes::BytesMut;
use http::header::Entry;
use http::{HeaderMap, HeaderName, HeaderValue};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{Method, ParseError, RequestHeader};

/// Maximum size in bytes allowed for the entire head section
const MAX_HEADER_BYTES: usize = 8 * 1024;

const CRLF: &[u8] = b"\r\n";
const HEAD_END: &[u8] = b"\r\n\r\n";

/// Decoder for HTTP request heads implementing the [`Decoder`] trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = RequestHeader;
    type Error = ParseError;

    /// Attempts to decode a request head from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(header))` if a complete head was parsed; its bytes are removed from `src`
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The head exceeds `MAX_HEADER_BYTES`
    /// - The request line has fewer than three tokens, or is not UTF-8
    /// - The method is neither `GET` nor `POST`
    /// - A header line has no `:` or an invalid name or value
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(head_end) = find(src, HEAD_END).map(|index| index + HEAD_END.len()) else {
            ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
            return Ok(None);
        };

        trace!(head_size = head_end, "parsed head size");
        ensure!(head_end <= MAX_HEADER_BYTES, ParseError::too_large_header(head_end, MAX_HEADER_BYTES));

        let head = src.split_to(head_end).freeze();
        parse_head(&head[..head_end - HEAD_END.len()]).map(Some)
    }
}

/// Builds the error for a stream that ended in the middle of a request head.
///
/// The request line is blamed when it never completed, otherwise the header block.
pub(crate) fn incomplete_head(src: &[u8]) -> ParseError {
    match find(src, CRLF) {
        None => ParseError::malformed_request_line(String::from_utf8_lossy(src)),
        Some(index) => {
            let rest = &src[index + CRLF.len()..];
            let last_line = Lines::new(rest).filter(|line| !line.is_empty()).last().unwrap_or_default();
            ParseError::malformed_header(String::from_utf8_lossy(last_line))
        }
    }
}

fn parse_head(head: &[u8]) -> Result<RequestHeader, ParseError> {
    let mut lines = Lines::new(head);

    let request_line = lines.next().unwrap_or_default();
    let request_line = std::str::from_utf8(request_line)
        .map_err(|_| ParseError::malformed_request_line(String::from_utf8_lossy(request_line)))?;

    let mut parts = request_line.splitn(3, ' ');
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::malformed_request_line(request_line));
    };
    let method = method.parse::<Method>()?;

    let mut headers = HeaderMap::new();
    for line in lines {
        let (name, value) = parse_header_line(line)?;
        match headers.entry(name) {
            Entry::Occupied(entry) => {
                trace!(header = %entry.key(), "ignore duplicate header line");
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    Ok(RequestHeader::new(method, target, version, headers))
}

fn parse_header_line(line: &[u8]) -> Result<(HeaderName, HeaderValue), ParseError> {
    let malformed = || ParseError::malformed_header(String::from_utf8_lossy(line));

    let colon = line.iter().position(|b| *b == b':').ok_or_else(malformed)?;

    // HeaderName lower-cases the name while validating it
    let name = HeaderName::from_bytes(&line[..colon]).map_err(|_| malformed())?;
    let value = HeaderValue::from_bytes(line[colon + 1..].trim_ascii()).map_err(|_| malformed())?;
    Ok((name, value))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Iterates over CRLF separated lines, without their terminators.
struct Lines<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Lines<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { rest: Some(bytes) }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match find(rest, CRLF) {
            Some(index) => {
                self.rest = Some(&rest[index + CRLF.len()..]);
                Some(&rest[..index])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header;

    fn decode(raw: &[u8]) -> Result<Option<RequestHeader>, ParseError> {
        HeaderDecoder.decode(&mut BytesMut::from(raw))
    }

    #[test]
    fn request_line_only() {
        let header = decode(b"GET / HTTP/1.0\r\n\r\n").unwrap().unwrap();

        assert_eq!(header.method(), Method::Get);
        assert_eq!(header.target(), "/");
        assert_eq!(header.version(), "HTTP/1.0");
        assert!(header.headers().is_empty());
    }

    #[test]
    fn keeps_the_body_in_the_buffer() {
        let mut bytes = BytesMut::from(&b"POST /add HTTP/1.0\r\ncontent-length: 3\r\n\r\n123"[..]);

        let header = HeaderDecoder.decode(&mut bytes).unwrap();

        assert!(header.is_some());
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn needs_more_data() {
        assert!(decode(b"GET / HTTP/1.0\r\nHost: 127.0.0.1").unwrap().is_none());
        assert!(decode(b"GET / HTT").unwrap().is_none());
        assert!(decode(b"").unwrap().is_none());
    }

    #[test]
    fn from_curl() {
        let raw = b"GET /index.html?a=1&b=2 HTTP/1.0\r\nHost: 127.0.0.1:8000\r\nUser-Agent: curl/7.79.1\r\nAccept: */*\r\n\r\n";

        let header = decode(raw).unwrap().unwrap();

        assert_eq!(header.target(), "/index.html?a=1&b=2");
        assert_eq!(header.headers().len(), 3);
        assert_eq!(header.headers().get(header::HOST).unwrap(), "127.0.0.1:8000");
        assert_eq!(header.headers().get(header::USER_AGENT).unwrap(), "curl/7.79.1");
        assert_eq!(header.headers().get(header::ACCEPT).unwrap(), "*/*");
    }

    #[test]
    fn header_names_are_case_folded_and_values_trimmed() {
        let header = decode(b"POST /add HTTP/1.0\r\nContent-LENGTH:    11  \r\nX-Empty:\r\n\r\n").unwrap().unwrap();

        assert_eq!(header.headers().get("content-length").unwrap(), "11");
        assert_eq!(header.headers().get("x-empty").unwrap(), "");
        assert_eq!(header.content_length().unwrap(), Some(11));
    }

    #[test]
    fn header_value_keeps_later_colons() {
        let header = decode(b"GET / HTTP/1.0\r\nHost: localhost:8000\r\n\r\n").unwrap().unwrap();
        assert_eq!(header.headers().get(header::HOST).unwrap(), "localhost:8000");
    }

    #[test]
    fn first_duplicate_header_wins() {
        let header = decode(b"GET / HTTP/1.0\r\nX-Token: first\r\nx-token: second\r\n\r\n").unwrap().unwrap();

        assert_eq!(header.headers().get_all("x-token").iter().count(), 1);
        assert_eq!(header.headers().get("x-token").unwrap(), "first");
    }

    #[test]
    fn version_is_the_rest_of_the_line() {
        let header = decode(b"GET /a HTTP/1.0 extra\r\n\r\n").unwrap().unwrap();
        assert_eq!(header.target(), "/a");
        assert_eq!(header.version(), "HTTP/1.0 extra");
    }

    #[test]
    fn malformed_request_line() {
        assert!(matches!(decode(b"GET\r\n\r\n"), Err(ParseError::MalformedRequestLine { line }) if line == "GET"));
        assert!(matches!(decode(b"GET /\r\n\r\n"), Err(ParseError::MalformedRequestLine { .. })));
        assert!(matches!(decode(b"\r\n\r\n"), Err(ParseError::MalformedRequestLine { .. })));
        assert!(matches!(decode(b"GET \xff HTTP/1.0\r\n\r\n"), Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn unsupported_method() {
        let result = decode(b"DELETE /entries HTTP/1.0\r\n\r\n");
        assert!(matches!(result, Err(ParseError::UnsupportedMethod { method }) if method == "DELETE"));
    }

    #[test]
    fn malformed_header() {
        let result = decode(b"GET / HTTP/1.0\r\nno colon here\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedHeader { line }) if line == "no colon here"));

        let result = decode(b"GET / HTTP/1.0\r\n: no name\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedHeader { .. })));
    }

    #[test]
    fn whitespace_before_colon_is_rejected() {
        let result = decode(b"GET / HTTP/1.0\r\nContent-Length : 5\r\n\r\nhello");
        assert!(matches!(result, Err(ParseError::MalformedHeader { line }) if line == "Content-Length : 5"));
    }

    #[test]
    fn too_large_header() {
        let mut raw = b"GET / HTTP/1.0\r\nX-Filler: ".to_vec();
        raw.extend(std::iter::repeat_n(b'a', MAX_HEADER_BYTES));

        assert!(matches!(decode(&raw), Err(ParseError::TooLargeHeader { .. })));
    }

    #[test]
    fn incomplete_head_blames_the_right_part() {
        assert!(matches!(incomplete_head(b"GET / HT"), ParseError::MalformedRequestLine { line } if line == "GET / HT"));
        assert!(matches!(incomplete_head(b"GET / HTTP/1.0\r\nHost: a\r\nAcc"), ParseError::MalformedHeader { line } if line == "Acc"));
    }
}
