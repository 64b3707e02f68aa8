use std::error::Error;
use std::sync::Arc;

use futures::StreamExt;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedRead;
use tracing::{error, info, warn};

use crate::codec::RequestDecoder;
use crate::connection::ResponseWriter;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, full_response};

/// An HTTP/1.0 connection: one request, one response, then close.
///
/// `HttpConnection` handles the full lifecycle of a connection:
/// - Reading and decoding exactly one request
/// - Answering malformed requests with `400 Bad Request` (`501 Not Implemented`
///   for unknown methods) instead of handing them to the handler
/// - Writing the handler's response and shutting the write half down
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    writer: ResponseWriter<W>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), 8 * 1024),
            writer: ResponseWriter::new(writer),
        }
    }

    /// Serves the connection with `handler`.
    ///
    /// # Errors
    ///
    /// Returns the parse error after the error response was sent, or the send error
    /// if the response could not be written. Either way the connection is done.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let request = match self.framed_read.next().await {
            Some(Ok(request)) => request,

            Some(Err(e)) => {
                warn!(cause = %e, "can't receive request");
                self.send_parse_error(&e).await?;
                return Err(e.into());
            }

            None => {
                info!("connection closed before a request was received");
                return Ok(());
            }
        };

        self.do_process(request, handler.as_ref()).await
    }

    async fn do_process<H>(&mut self, request: Request, handler: &H) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        info!(method = %request.method(), target = request.target(), "receive request");

        let response = match handler.call(request).await {
            Ok(response) => response,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!(cause = %e, "handle request error");
                full_response(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error")
            }
        };

        let status = response.status();
        self.writer.write_response(response).await?;
        self.writer.shutdown().await?;
        info!(status = status.as_u16(), "response sent");
        Ok(())
    }

    async fn send_parse_error(&mut self, e: &ParseError) -> Result<(), HttpError> {
        if matches!(e, ParseError::Io { .. }) {
            // the read side failed, the peer is most likely gone
            return Ok(());
        }

        let status = e.status_code();
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));

        let body = format!("{} {}\n{e}\n", status.as_str(), status.canonical_reason().unwrap_or_default());
        self.writer.write(status, headers, body).await?;
        self.writer.shutdown().await?;
        Ok(())
    }
}
