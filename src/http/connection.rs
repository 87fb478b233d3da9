use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, error};

use crate::app::App;
use crate::http::parser;
use crate::http::response::StatusCode;
use crate::http::writer::{ResponseWriter, render_error, render_response};
use crate::router::RouteError;

/// Read chunk size; a read shorter than this ends the request.
const READ_CHUNK: usize = 1024;

/// One accepted connection serving exactly one request/response cycle.
///
/// Generic over the stream so plain TCP and TLS connections share the
/// pipeline: read until short read, parse, resolve, invoke the handler,
/// write, close. The transport is closed on every exit path.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    app: Arc<App>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, app: Arc<App>) -> Self {
        Self { stream, peer, app }
    }

    /// Drives the request/response cycle to completion.
    ///
    /// Per-request faults are answered on this connection and never
    /// escape it; the returned error covers only transport failures
    /// while writing, which the accept loop logs.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let raw = match self.read_raw().await {
            Some(buf) if !buf.is_empty() => buf,
            _ => {
                debug!(peer = %self.peer, "closing connection, no request bytes received");
                return Ok(());
            }
        };

        let request = match parser::parse_request(&raw, self.peer) {
            Ok(request) => request,
            Err(e) => {
                error!(peer = %self.peer, error = %e, "peer sent an invalid request");
                return self.send_error(StatusCode::BadRequest).await;
            }
        };

        let app = Arc::clone(&self.app);
        let (content_type, default_headers, handler) =
            match app.routes().resolve(&request.path, request.method) {
                Ok((entry, subroute)) => (
                    subroute.content_type.clone(),
                    entry.default_headers.clone(),
                    subroute.handler.clone(),
                ),
                Err(RouteError::NotFound) => {
                    error!(
                        peer = %self.peer,
                        path = %request.path,
                        "request for a resource that does not exist"
                    );
                    return self.send_error(StatusCode::NotFound).await;
                }
                Err(RouteError::MethodNotAllowed) => {
                    error!(
                        peer = %self.peer,
                        path = %request.path,
                        method = %request.method,
                        "request with a method not registered for the path"
                    );
                    return self.send_error(StatusCode::MethodNotAllowed).await;
                }
            };

        let path = request.path.clone();
        let method = request.method;

        // The handler runs on its own task so a panic surfaces here as
        // a JoinError instead of tearing down the connection task.
        let response = match tokio::spawn((*handler)(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(fault)) => {
                error!(
                    peer = %self.peer,
                    path = %path,
                    method = %method,
                    fault = %fault,
                    "handler failed"
                );
                return self.send_error(StatusCode::InternalServerError).await;
            }
            Err(join_error) => {
                error!(
                    peer = %self.peer,
                    path = %path,
                    method = %method,
                    fault = %join_error,
                    "handler panicked"
                );
                return self.send_error(StatusCode::InternalServerError).await;
            }
        };

        let rendered = render_response(&response, &content_type, &default_headers);
        ResponseWriter::new(rendered)
            .write_to(&mut self.stream)
            .await?;
        self.stream.shutdown().await.ok();
        Ok(())
    }

    /// Reads bounded chunks until a short read ends the request.
    ///
    /// Returns `None` when the peer stalls past the configured deadline
    /// or the read fails; both close the connection without a response.
    async fn read_raw(&mut self) -> Option<BytesMut> {
        let mut buf = BytesMut::with_capacity(4096);
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let n = match timeout(self.app.read_timeout(), self.stream.read(&mut chunk)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => {
                    debug!(peer = %self.peer, error = %e, "read failed");
                    return None;
                }
                Err(_) => {
                    debug!(peer = %self.peer, "read timed out");
                    return None;
                }
            };

            buf.extend_from_slice(&chunk[..n]);

            if n < READ_CHUNK {
                return Some(buf);
            }
        }
    }

    async fn send_error(&mut self, status: StatusCode) -> anyhow::Result<()> {
        let page = self.app.error_pages().page(status);
        let rendered = render_error(status, &page, self.app.default_headers());
        ResponseWriter::new(rendered)
            .write_to(&mut self.stream)
            .await?;
        self.stream.shutdown().await.ok();
        Ok(())
    }
}
