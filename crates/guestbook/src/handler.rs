use std::convert::Infallible;
use std::num::NonZeroUsize;

use async_trait::async_trait;
use http::header::{self, HeaderValue};
use http::{Response, StatusCode};
use mini_http::handler::Handler;
use mini_http::protocol::{Method, Request, ResponseBody, form, full_response, gzip_chunked_response};
use tracing::{info, warn};

use crate::pages;
use crate::router::{Route, Router};
use crate::store::EntryStore;

/// The text served gzip-compressed and chunked on `GET /compressed`.
pub const COMPRESSED_TEXT: &str = "Hello, this is a compressed and chunked response!";

/// The guest book application: routes each request and renders its response.
///
/// Every failure is answered with a response, the handler itself never errors.
#[derive(Debug)]
pub struct GuestBook {
    store: EntryStore,
    router: Router,
    chunk_size: NonZeroUsize,
}

impl GuestBook {
    /// Creates the application over `store`, compressed responses are sent in
    /// chunks of `chunk_size` bytes.
    pub fn new(store: EntryStore, chunk_size: NonZeroUsize) -> Result<Self, matchit::InsertError> {
        Ok(Self { store, router: Router::guest_book()?, chunk_size })
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    async fn show_entries(&self) -> Response<ResponseBody> {
        let entries = self.store.list().await;
        html_response(StatusCode::OK, pages::guest_book(&entries))
    }

    async fn add_entry(&self, body: Option<&str>) -> Response<ResponseBody> {
        let Some(body) = body else {
            warn!("add entry without a form body");
            return bad_request("missing form body");
        };

        let params = match form::decode(body) {
            Ok(params) => params,
            Err(e) => {
                warn!(cause = %e, "can't decode form body");
                return bad_request(&e.to_string());
            }
        };

        if let Some(guest) = params.get("guest") {
            info!(guest, "sign the guest book");
            self.store.add(guest).await;
        }

        self.show_entries().await
    }

    fn compressed(&self) -> Response<ResponseBody> {
        gzip_chunked_response(StatusCode::OK, &mime::TEXT_PLAIN, COMPRESSED_TEXT, self.chunk_size)
    }
}

#[async_trait]
impl Handler for GuestBook {
    type Error = Infallible;

    async fn call(&self, req: Request) -> Result<Response<ResponseBody>, Self::Error> {
        let response = match self.router.at(req.method(), req.target()) {
            Some(Route::GuestBook) => self.show_entries().await,
            Some(Route::AddEntry) => self.add_entry(req.body()).await,
            Some(Route::Compressed) => self.compressed(),
            None => not_found(req.method(), req.target()),
        };
        Ok(response)
    }
}

fn html_response(status: StatusCode, page: String) -> Response<ResponseBody> {
    let mut response = full_response(status, page);
    response.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    response
}

fn not_found(method: Method, target: &str) -> Response<ResponseBody> {
    html_response(StatusCode::NOT_FOUND, pages::not_found(method, target))
}

fn bad_request(reason: &str) -> Response<ResponseBody> {
    let mut response = full_response(StatusCode::BAD_REQUEST, format!("400 Bad Request\n{reason}\n"));
    response.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;
    use mini_http::protocol::RequestHeader;

    fn guest_book(entries: &[&str]) -> GuestBook {
        GuestBook::new(EntryStore::with_entries(entries.iter().copied()), NonZeroUsize::new(16).unwrap()).unwrap()
    }

    fn request(method: Method, target: &str, body: Option<&str>) -> Request {
        let mut headers = HeaderMap::new();
        if let Some(body) = body {
            headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
        }
        RequestHeader::new(method, target, "HTTP/1.0", headers).body(body.map(str::to_owned))
    }

    fn body_text(response: &Response<ResponseBody>) -> &str {
        std::str::from_utf8(response.body().as_bytes()).unwrap()
    }

    #[tokio::test]
    async fn index_lists_entries() {
        let app = guest_book(&["a", "b"]);
        let response = app.call(request(Method::Get, "/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert!(body_text(&response).contains("<p>a</p><p>b</p><form action=add method=post>"));
    }

    #[tokio::test]
    async fn add_appends_guest() {
        let app = guest_book(&["a"]);
        let response = app.call(request(Method::Post, "/add", Some("guest=Hello+World%21"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(&response).contains("<p>a</p><p>Hello World!</p>"));
        assert_eq!(app.store().list().await, vec!["a", "Hello World!"]);
    }

    #[tokio::test]
    async fn add_without_guest_field() {
        let app = guest_book(&["a"]);
        let response = app.call(request(Method::Post, "/add", Some("name=bob"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(app.store().list().await, vec!["a"]);
    }

    #[tokio::test]
    async fn add_without_body() {
        let app = guest_book(&[]);
        let response = app.call(request(Method::Post, "/add", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(app.store().list().await.is_empty());
    }

    #[tokio::test]
    async fn add_with_malformed_form() {
        let app = guest_book(&[]);
        let response = app.call(request(Method::Post, "/add", Some("guest"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(&response).contains("guest"));
        assert!(app.store().list().await.is_empty());
    }

    #[tokio::test]
    async fn compressed_is_gzip_chunked() {
        let app = guest_book(&[]);
        let response = app.call(request(Method::Get, "/compressed", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        assert!(matches!(response.body(), ResponseBody::GzipChunked { chunk_size, .. } if chunk_size.get() == 16));
        assert_eq!(body_text(&response), COMPRESSED_TEXT);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = guest_book(&[]);
        let response = app.call(request(Method::Get, "/missing", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(&response), "<!doctype html><h1>GET /missing not found!</h1>");
    }

    #[tokio::test]
    async fn wrong_method_is_not_found() {
        let app = guest_book(&[]);
        let response = app.call(request(Method::Post, "/", Some("guest=x"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(&response), "<!doctype html><h1>POST / not found!</h1>");
        assert!(app.store().list().await.is_empty());
    }
}
