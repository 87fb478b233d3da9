use std::future::Future;

use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::router::handler::into_handler;
use crate::router::{RouteTable, RouterError};

/// An independently built route collection mounted under a root path.
///
/// Lets route registration live next to the handlers it belongs to
/// (one sub-router per module, say) and be merged wholesale into the
/// application's table. The root prefix is applied when a route is
/// registered here, not at merge time.
pub struct Subrouter {
    root: String,
    table: RouteTable,
}

impl Subrouter {
    /// Creates a sub-router rooted at the given path segment.
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let root = if root.starts_with('/') {
            root
        } else {
            format!("/{root}")
        };
        Self {
            root,
            table: RouteTable::new(),
        }
    }

    /// Registers a handler under the sub-router's root.
    ///
    /// `route("/list", ...)` on a sub-router rooted at `/api` registers
    /// `/api/list`. Duplicate path+method registration fails exactly as
    /// it does on the main table.
    pub fn route<F, Fut>(
        &mut self,
        path: &str,
        content_type: &str,
        method: Method,
        handler: F,
    ) -> Result<&mut Self, RouterError>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
    {
        let prefixed = format!(
            "{}/{}",
            self.root.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.table
            .register(&prefixed, method, content_type, into_handler(handler))?;
        Ok(self)
    }

    /// Exports the accumulated table for merging into an application.
    pub fn into_table(self) -> RouteTable {
        self.table
    }
}
