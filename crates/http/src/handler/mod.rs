//! The seam between the protocol core and the application.
//!
//! A [`Handler`] turns one decoded [`Request`] into a response. Any async
//! function with the right shape becomes a handler through [`make_handler`].

use std::error::Error;
use std::future::Future;

use async_trait::async_trait;
use http::Response;

use crate::protocol::{Request, ResponseBody};

#[async_trait]
pub trait Handler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, req: Request) -> Result<Response<ResponseBody>, Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<Err, F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Fut: Future<Output = Result<Response<ResponseBody>, Err>> + Send,
{
    type Error = Err;

    async fn call(&self, req: Request) -> Result<Response<ResponseBody>, Self::Error> {
        (self.f)(req).await
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<Response<ResponseBody>, Err>>,
    F: Fn(Request) -> Ret,
{
    HandlerFn { f }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Method, RequestHeader, full_response};
    use http::{HeaderMap, StatusCode};
    use std::convert::Infallible;

    #[tokio::test]
    async fn handler_from_async_fn() {
        let handler = make_handler(|req: Request| async move {
            Ok::<_, Infallible>(full_response(StatusCode::OK, format!("{} {}", req.method(), req.target())))
        });

        let request = RequestHeader::new(Method::Get, "/hello", "HTTP/1.0", HeaderMap::new()).body(None);
        let response = handler.call(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), &ResponseBody::full("GET /hello"));
    }
}
