use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;

/// A pinned, thread-safe future resolving to a handler result.
pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<Response>> + Send>>;

/// Application-supplied logic for one route method slot.
///
/// Receives the parsed request and returns a response, or fails; a
/// failure (or a panic) becomes a 500 at the connection boundary. The
/// same capability serves plain functions and capturing closures, so no
/// trait hierarchy is involved.
pub type Handler = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync>;

/// Boxes an async function or closure into a [`Handler`].
pub fn into_handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
{
    Arc::new(move |request| Box::pin(f(request)))
}
