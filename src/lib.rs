//! Comet - HTTP/1.0 Server Construction Kit
//!
//! Application code registers path+method handlers; comet accepts
//! connections, parses the raw byte stream, resolves the route, runs
//! the handler, and writes a wire-correct HTTP/1.0 response. One
//! request/response cycle per connection, no keep-alive.

pub mod app;
pub mod config;
pub mod http;
pub mod router;
pub mod server;

pub use app::{App, AppBuilder};
pub use http::request::{Method, Request};
pub use http::response::{Response, StatusCode};
pub use router::Subrouter;
