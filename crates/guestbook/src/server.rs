use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use mini_http::connection::HttpConnection;
use mini_http::handler::Handler;
use mini_http::protocol::HttpError;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("handler must be set")]
    MissingHandler,

    #[error("address must be set")]
    MissingAddress,

    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },

    #[error("bind server error: {source}")]
    Bind { source: io::Error },

    #[error("invalid route table: {source}")]
    Route {
        #[from]
        source: matchit::InsertError,
    },
}

#[derive(Debug)]
pub struct ServerBuilder<H> {
    handler: Option<H>,
    address: Option<io::Result<Vec<SocketAddr>>>,
}

impl<H> ServerBuilder<H>
where
    H: Handler + 'static,
{
    fn new() -> Self {
        Self { handler: None, address: None }
    }

    /// Sets the listening address, name resolution happens here and its
    /// failure is reported by [`ServerBuilder::build`].
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    pub fn handler(mut self, handler: H) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn build(self) -> Result<Server<H>, ServerError> {
        let handler = self.handler.ok_or(ServerError::MissingHandler)?;
        let address = self.address.ok_or(ServerError::MissingAddress)?.map_err(|source| ServerError::InvalidAddress { source })?;
        Ok(Server { handler: Arc::new(handler), address })
    }
}

/// Accepts TCP connections and serves each one on its own task.
#[derive(Debug)]
pub struct Server<H> {
    handler: Arc<H>,
    address: Vec<SocketAddr>,
}

impl<H> Server<H>
where
    H: Handler + 'static,
{
    pub fn builder() -> ServerBuilder<H> {
        ServerBuilder::new()
    }

    /// Binds the listener without accepting connections yet.
    pub async fn bind(self) -> Result<BoundServer<H>, ServerError> {
        let tcp_listener = TcpListener::bind(self.address.as_slice()).await.map_err(|source| ServerError::Bind { source })?;
        Ok(BoundServer { tcp_listener, handler: self.handler })
    }

    /// Binds and serves until the process ends.
    pub async fn start(self) -> Result<(), ServerError> {
        self.bind().await?.serve().await;
        Ok(())
    }
}

/// A server whose listener is bound, see [`BoundServer::local_addr`].
#[derive(Debug)]
pub struct BoundServer<H> {
    tcp_listener: TcpListener,
    handler: Arc<H>,
}

impl<H> BoundServer<H>
where
    H: Handler + 'static,
{
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp_listener.local_addr()
    }

    /// Runs the accept loop. Accept failures and connection errors are logged,
    /// neither stops the loop.
    pub async fn serve(self) {
        match self.tcp_listener.local_addr() {
            Ok(addr) => info!(%addr, "start listening"),
            Err(e) => warn!(cause = %e, "start listening at unknown address"),
        }

        loop {
            let (tcp_stream, remote_addr) = match self.tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = Arc::clone(&self.handler);

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let result = HttpConnection::new(reader, writer).process(handler).await;
                log_connection_result(remote_addr, &result);
            });
        }
    }
}

fn log_connection_result(remote_addr: SocketAddr, result: &Result<(), HttpError>) {
    match result {
        // bad requests are answered and logged by the connection itself
        Ok(()) | Err(HttpError::RequestError { .. }) => {
            info!(%remote_addr, "finished process, connection shutdown");
        }
        Err(e) => {
            error!(%remote_addr, cause = %e, "service has error, connection shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntryStore, GuestBook};
    use mini_http::protocol::{ParseError, SendError};
    use std::num::NonZeroUsize;
    use tracing_test::traced_test;

    fn guest_book() -> GuestBook {
        GuestBook::new(EntryStore::new(), NonZeroUsize::new(16).unwrap()).unwrap()
    }

    #[test]
    fn build_requires_handler() {
        let result = Server::<GuestBook>::builder().address("127.0.0.1:0").build();
        assert!(matches!(result, Err(ServerError::MissingHandler)));
    }

    #[test]
    fn build_requires_address() {
        let result = Server::builder().handler(guest_book()).build();
        assert!(matches!(result, Err(ServerError::MissingAddress)));
    }

    #[test]
    fn build_rejects_bad_address() {
        let result = Server::builder().handler(guest_book()).address("not an address").build();
        assert!(matches!(result, Err(ServerError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn bind_ephemeral_port() {
        let server = Server::builder().handler(guest_book()).address(("127.0.0.1", 0)).build().unwrap();
        let bound = server.bind().await.unwrap();

        let addr = bound.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn bind_error_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let server = Server::builder().handler(guest_book()).address(addr).build().unwrap();
        assert!(matches!(server.bind().await, Err(ServerError::Bind { .. })));
    }

    #[test]
    #[traced_test]
    fn bad_request_is_not_logged_as_error() {
        let remote_addr = SocketAddr::from(([127, 0, 0, 1], 40000));
        log_connection_result(remote_addr, &Err(ParseError::malformed_request_line("GARBAGE").into()));

        assert!(logs_contain("finished process, connection shutdown"));
        assert!(!logs_contain("ERROR"));
    }

    #[test]
    #[traced_test]
    fn send_failure_is_logged_as_error() {
        let remote_addr = SocketAddr::from(([127, 0, 0, 1], 40000));
        let send_error = SendError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        log_connection_result(remote_addr, &Err(send_error.into()));

        assert!(logs_contain("ERROR"));
        assert!(logs_contain("service has error"));
    }
}
