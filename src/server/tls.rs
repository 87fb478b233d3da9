//! TLS transport setup from PEM certificate material.

use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};

/// Builds a rustls `ServerConfig` from PEM files.
///
/// The certificate file may contain a chain (multiple PEM blocks); the
/// key file must contain exactly one private key. Any failure here is a
/// configuration fault and aborts startup.
pub fn load_server_config(cert_path: &str, key_path: &str) -> anyhow::Result<Arc<ServerConfig>> {
    if !Path::new(cert_path).exists() {
        anyhow::bail!("certificate file not found: {cert_path}");
    }
    if !Path::new(key_path).exists() {
        anyhow::bail!("private key file not found: {key_path}");
    }

    let mut cert_reader = BufReader::new(
        std::fs::File::open(cert_path)
            .with_context(|| format!("opening certificate file {cert_path}"))?,
    );
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut cert_reader)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing certificates from {cert_path}"))?;

    let mut key_reader = BufReader::new(
        std::fs::File::open(key_path)
            .with_context(|| format!("opening private key file {key_path}"))?,
    );
    let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut key_reader)
        .with_context(|| format!("parsing private key from {key_path}"))?
        .with_context(|| format!("no private key found in {key_path}"))?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("building TLS server configuration")?;

    Ok(Arc::new(config))
}
