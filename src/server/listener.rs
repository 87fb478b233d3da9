use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, info};

use crate::app::App;
use crate::http::connection::Connection;
use crate::server::tls;

/// Owns the listening transport and drives the accept loop.
///
/// Binding and serving are separate steps so callers can learn the
/// bound address (ephemeral ports in tests) before the loop starts.
pub struct Server {
    listener: TcpListener,
    tls: Option<TlsAcceptor>,
    app: Arc<App>,
}

impl Server {
    /// Binds the configured address, wrapping the transport in TLS when
    /// the application carries certificate material.
    pub async fn bind(app: App) -> anyhow::Result<Self> {
        let tls = match app.tls_config() {
            Some(cfg) => {
                let config = tls::load_server_config(&cfg.cert_path, &cfg.key_path)?;
                Some(TlsAcceptor::from(config))
            }
            None => None,
        };

        let listener = TcpListener::bind(app.listen_addr()).await?;
        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            tls,
            app: Arc::new(app),
        })
    }

    /// The address the listener actually bound.
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever, spawning one task per connection.
    ///
    /// A connection task's failure is logged and never stops the loop.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let (socket, peer) = self.listener.accept().await?;
            debug!("Accepted connection from {}", peer);

            let app = Arc::clone(&self.app);
            let tls = self.tls.clone();

            tokio::spawn(async move {
                match tls {
                    Some(acceptor) => match acceptor.accept(socket).await {
                        Ok(stream) => {
                            if let Err(e) = Connection::new(stream, peer, app).run().await {
                                error!("Connection error from {}: {}", peer, e);
                            }
                        }
                        Err(e) => {
                            error!("TLS handshake failed with {}: {}", peer, e);
                        }
                    },
                    None => {
                        if let Err(e) = Connection::new(socket, peer, app).run().await {
                            error!("Connection error from {}: {}", peer, e);
                        }
                    }
                }
            });
        }
    }
}
