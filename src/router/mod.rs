//! Route table construction and request dispatch.
//!
//! A [`RouteTable`] maps normalized paths to [`RouteEntry`] values,
//! each holding one handler slot per HTTP method. Tables are built
//! during application setup (directly or through a [`Subrouter`]) and
//! are read-only once serving starts.

use std::collections::HashMap;

use thiserror::Error;

use crate::http::parser::normalize_path;
use crate::http::request::Method;

pub mod handler;
pub mod subrouter;

pub use handler::{Handler, HandlerFuture, into_handler};
pub use subrouter::Subrouter;

/// Configuration faults raised while building a route table.
///
/// These abort startup; they are never produced while serving.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("method {method} is already registered for {path}")]
    DuplicateRoute { path: String, method: Method },
}

/// Outcome of resolving a request against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// No entry exists for the path (404)
    NotFound,
    /// The entry exists but has no handler for the method (405)
    MethodNotAllowed,
}

/// One registered method slot: the handler and the content type it was
/// registered with.
#[derive(Clone)]
pub struct Subroute {
    pub content_type: String,
    pub handler: Handler,
}

/// A normalized path and its per-method handler registry.
#[derive(Clone, Default)]
pub struct RouteEntry {
    /// The normalized path this entry is keyed under
    pub path: String,
    /// Headers applied to every response from this entry, below
    /// computed and handler headers in precedence
    pub default_headers: HashMap<String, String>,
    methods: HashMap<Method, Subroute>,
}

impl RouteEntry {
    fn new(path: String) -> Self {
        Self {
            path,
            default_headers: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Returns the slot registered for a method, if any.
    pub fn subroute(&self, method: Method) -> Option<&Subroute> {
        self.methods.get(&method)
    }

    /// Methods with a registered handler on this entry.
    pub fn registered_methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.methods.keys().copied()
    }
}

/// Mapping from normalized path to per-method handler registry.
#[derive(Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a path and method.
    ///
    /// The path is normalized first. Registering a second handler for
    /// the same path and method is a configuration error and leaves the
    /// original handler in place.
    pub fn register(
        &mut self,
        path: &str,
        method: Method,
        content_type: &str,
        handler: Handler,
    ) -> Result<(), RouterError> {
        let path = normalize_path(path);
        let entry = self
            .routes
            .entry(path.clone())
            .or_insert_with(|| RouteEntry::new(path.clone()));

        if entry.methods.contains_key(&method) {
            return Err(RouterError::DuplicateRoute { path, method });
        }

        entry.methods.insert(
            method,
            Subroute {
                content_type: content_type.to_string(),
                handler,
            },
        );
        Ok(())
    }

    /// Merges another table into this one.
    ///
    /// Entries for new paths move over wholesale; entries for existing
    /// paths merge slot by slot under the same duplicate-method rule as
    /// [`register`](Self::register).
    pub fn merge(&mut self, other: RouteTable) -> Result<(), RouterError> {
        for (path, entry) in other.routes {
            match self.routes.get_mut(&path) {
                None => {
                    self.routes.insert(path, entry);
                }
                Some(existing) => {
                    for (method, subroute) in entry.methods {
                        if existing.methods.contains_key(&method) {
                            return Err(RouterError::DuplicateRoute {
                                path: path.clone(),
                                method,
                            });
                        }
                        existing.methods.insert(method, subroute);
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolves an already-normalized path and method to a handler.
    ///
    /// Exact-match lookup only: no patterns, no wildcards, no
    /// trailing-slash leniency beyond the single-strip normalization
    /// applied at registration and parse time.
    pub fn resolve(&self, path: &str, method: Method) -> Result<(&RouteEntry, &Subroute), RouteError> {
        let entry = self.routes.get(path).ok_or(RouteError::NotFound)?;
        let subroute = entry.methods.get(&method).ok_or(RouteError::MethodNotAllowed)?;
        Ok((entry, subroute))
    }

    /// Merges app-wide default headers into every entry.
    ///
    /// Called once when the application is frozen for serving.
    pub fn apply_default_headers(&mut self, defaults: &HashMap<String, String>) {
        for entry in self.routes.values_mut() {
            for (key, value) in defaults {
                entry.default_headers.insert(key.clone(), value.clone());
            }
        }
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
