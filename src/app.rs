//! Application setup and the two-phase serving lifecycle.
//!
//! [`AppBuilder`] is the setup stage: routes, sub-routers, static
//! files, error pages, and default headers are registered on a mutable
//! builder, and any configuration fault surfaces immediately as an
//! `Err`. [`AppBuilder::build`] freezes everything into an [`App`],
//! which is shared read-only across connection tasks — no locking is
//! needed while serving, and there is no way to mutate the route table
//! once the acceptor is running.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::config::{Config, TlsConfig};
use crate::http::error_pages::ErrorPages;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::router::{RouteTable, RouterError, Subrouter, into_handler};
use crate::server::Server;

/// Identity header value attached to every response.
pub const SERVER_NAME: &str = "comet";

/// Mutable application under construction.
pub struct AppBuilder {
    host: String,
    port: u16,
    cors: bool,
    read_timeout: Duration,
    tls: Option<TlsConfig>,
    extra_headers: HashMap<String, String>,
    routes: RouteTable,
    errors: ErrorPages,
}

impl AppBuilder {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            cors: true,
            read_timeout: Duration::from_secs(2),
            tls: None,
            extra_headers: HashMap::new(),
            routes: RouteTable::new(),
            errors: ErrorPages::new(),
        }
    }

    /// Seeds the builder from the configuration layer.
    pub fn from_config(cfg: &Config) -> Self {
        let mut builder = Self::new(cfg.server.host.clone(), cfg.server.port);
        builder.cors = cfg.server.cors;
        builder.read_timeout = Duration::from_secs(cfg.server.read_timeout_secs);
        builder.tls = cfg.tls.clone();
        builder
    }

    /// Enables or disables the CORS default header (on by default).
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Sets the per-read deadline used while draining a request.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Supplies certificate material; the server will speak HTTPS.
    pub fn tls(mut self, cert_path: impl Into<String>, key_path: impl Into<String>) -> Self {
        self.tls = Some(TlsConfig {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        });
        self
    }

    /// Adds an app-wide default header, applied to every successful and
    /// error response alike (lowest header precedence).
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Registers a handler for a path and method.
    ///
    /// Repeat calls for the same path add methods to the existing
    /// entry; registering the same path+method twice is a configuration
    /// error.
    pub fn route<F, Fut>(
        mut self,
        path: &str,
        content_type: &str,
        method: Method,
        handler: F,
    ) -> Result<Self, RouterError>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Response>> + Send + 'static,
    {
        self.routes
            .register(path, method, content_type, into_handler(handler))?;
        Ok(self)
    }

    /// Merges a sub-router's accumulated routes into the application.
    pub fn mount(mut self, subrouter: Subrouter) -> Result<Self, RouterError> {
        self.routes.merge(subrouter.into_table())?;
        Ok(self)
    }

    /// Exposes a file under `/static/<basename>`.
    ///
    /// The file is read fresh from disk on every request — no caching —
    /// and served with its exact byte length and an
    /// `accept-ranges: bytes` header. A failed read is a handler fault
    /// and answers 500.
    pub fn static_file(mut self, file_path: &str, content_type: &str) -> Result<Self, RouterError> {
        let basename = Path::new(file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let route_path = format!("/static/{basename}");

        let source = file_path.to_string();
        let handler = into_handler(move |_req: Request| {
            let source = source.clone();
            async move {
                let content = tokio::fs::read(&source).await?;
                let length = content.len();
                Ok(Response::binary(content)
                    .header("accept-ranges", "bytes")
                    .header("Content-Length", length.to_string()))
            }
        });

        self.routes
            .register(&route_path, Method::GET, content_type, handler)?;
        Ok(self)
    }

    /// Replaces the canned error response for a status code.
    pub fn set_error(
        mut self,
        status: StatusCode,
        content_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.errors.set(status, content_type, body);
        self
    }

    /// Freezes the application for serving.
    ///
    /// Default headers are merged into every route entry here, and with
    /// TLS configured the port is conventionalized: 80 becomes 443, 443
    /// stays, anything else becomes 8443.
    pub fn build(mut self) -> App {
        let mut default_headers = HashMap::new();
        if self.cors {
            default_headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        }
        default_headers.insert("server".to_string(), SERVER_NAME.to_string());
        for (key, value) in self.extra_headers {
            default_headers.insert(key, value);
        }

        self.routes.apply_default_headers(&default_headers);

        let port = if self.tls.is_some() {
            let https_port = match self.port {
                80 => 443,
                443 => 443,
                _ => 8443,
            };
            if https_port != self.port {
                debug!("Using HTTPS, switching port to {}", https_port);
            }
            https_port
        } else {
            self.port
        };

        App {
            host: self.host,
            port,
            tls: self.tls,
            read_timeout: self.read_timeout,
            default_headers,
            routes: self.routes,
            errors: self.errors,
        }
    }
}

/// Frozen application state shared by every connection task.
pub struct App {
    host: String,
    port: u16,
    tls: Option<TlsConfig>,
    read_timeout: Duration,
    default_headers: HashMap<String, String>,
    routes: RouteTable,
    errors: ErrorPages,
}

impl App {
    /// The route table, read-only for the process lifetime.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn error_pages(&self) -> &ErrorPages {
        &self.errors
    }

    /// App-wide default headers, used directly for error responses.
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn tls_config(&self) -> Option<&TlsConfig> {
        self.tls.as_ref()
    }

    /// The address to bind, as `host:port`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Binds and serves until the process exits.
    pub async fn serve(self) -> anyhow::Result<()> {
        Server::bind(self).await?.run().await
    }
}
