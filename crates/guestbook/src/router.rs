//! Maps a request method and target to a guest book [`Route`].

use std::collections::HashMap;

use mini_http::protocol::Method;
use tracing::trace;

type InnerRouter<T> = matchit::Router<T>;

/// The pages the guest book serves.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /`
    GuestBook,
    /// `POST /add`
    AddEntry,
    /// `GET /compressed`
    Compressed,
}

#[derive(Debug)]
struct RouterItem {
    method: Method,
    route: Route,
}

/// Path router with a method check per path.
///
/// Targets are matched as sent, a query string is part of the path.
#[derive(Debug)]
pub struct Router {
    inner_router: InnerRouter<Vec<RouterItem>>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder { data: HashMap::new() }
    }

    /// The guest book routing table.
    pub fn guest_book() -> Result<Self, matchit::InsertError> {
        Self::builder()
            .route("/", Method::Get, Route::GuestBook)
            .route("/add", Method::Post, Route::AddEntry)
            .route("/compressed", Method::Get, Route::Compressed)
            .build()
    }

    /// Returns the route registered for `method` on `target`, if any.
    pub fn at(&self, method: Method, target: &str) -> Option<Route> {
        let matched = self
            .inner_router
            .at(target)
            .map_err(|e| trace!(path = target, cause = %e, "no route matched"))
            .ok()?;

        matched.value.iter().find(|item| item.method == method).map(|item| item.route)
    }
}

#[derive(Debug)]
pub struct RouterBuilder {
    data: HashMap<String, Vec<RouterItem>>,
}

impl RouterBuilder {
    pub fn route(mut self, path: impl Into<String>, method: Method, route: Route) -> Self {
        self.data.entry(path.into()).or_default().push(RouterItem { method, route });
        self
    }

    pub fn build(self) -> Result<Router, matchit::InsertError> {
        let mut inner_router = InnerRouter::new();
        for (path, items) in self.data {
            inner_router.insert(path, items)?;
        }
        Ok(Router { inner_router })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_book_routes() {
        let router = Router::guest_book().unwrap();

        assert_eq!(router.at(Method::Get, "/"), Some(Route::GuestBook));
        assert_eq!(router.at(Method::Post, "/add"), Some(Route::AddEntry));
        assert_eq!(router.at(Method::Get, "/compressed"), Some(Route::Compressed));
    }

    #[test]
    fn method_must_match() {
        let router = Router::guest_book().unwrap();

        assert_eq!(router.at(Method::Post, "/"), None);
        assert_eq!(router.at(Method::Get, "/add"), None);
        assert_eq!(router.at(Method::Post, "/compressed"), None);
    }

    #[test]
    fn unknown_targets() {
        let router = Router::guest_book().unwrap();

        assert_eq!(router.at(Method::Get, "/missing"), None);
        assert_eq!(router.at(Method::Get, "/?page=2"), None);
        assert_eq!(router.at(Method::Get, "*"), None);
    }

    #[test]
    fn several_methods_on_one_path() {
        let router = Router::builder()
            .route("/add", Method::Get, Route::GuestBook)
            .route("/add", Method::Post, Route::AddEntry)
            .build()
            .unwrap();

        assert_eq!(router.at(Method::Get, "/add"), Some(Route::GuestBook));
        assert_eq!(router.at(Method::Post, "/add"), Some(Route::AddEntry));
    }

    #[test]
    fn conflicting_paths_are_rejected() {
        let result = Router::builder()
            .route("/{id}", Method::Get, Route::GuestBook)
            .route("/{name}", Method::Get, Route::Compressed)
            .build();

        assert!(result.is_err());
    }
}
