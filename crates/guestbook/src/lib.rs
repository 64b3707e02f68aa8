//! A guest book web application on top of [`mini_http`].
//!
//! - [`GuestBook`]: the request handler, routes `GET /`, `POST /add` and
//!   `GET /compressed` and answers everything else with `404 Not Found`
//! - [`EntryStore`]: the entries, shared between connections
//! - [`Server`]: the TCP accept loop, one task per connection
//! - [`Config`]: command line flags of the binary

mod config;
mod handler;
mod pages;
mod router;
mod server;
mod store;

pub use config::Config;
pub use handler::{COMPRESSED_TEXT, GuestBook};
pub use router::{Route, Router, RouterBuilder};
pub use server::{BoundServer, Server, ServerBuilder, ServerError};
pub use store::EntryStore;
