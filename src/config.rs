use anyhow::Context;
use serde::Deserialize;

/// Top-level configuration, loadable from a YAML file.
///
/// Every field has a default, so an empty file (or no file at all)
/// yields a working localhost configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-read deadline while draining a request, in seconds
    pub read_timeout_secs: u64,
    /// Adds `Access-Control-Allow-Origin: *` to the default headers
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            read_timeout_secs: 2,
            cors: true,
        }
    }
}

/// PEM certificate chain and private key paths; presence switches the
/// server to HTTPS.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    pub cert_path: String,
    pub key_path: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// `COMET_CONFIG` names a YAML file to parse; without it the
    /// defaults apply. `COMET_LISTEN` (`host:port`) overrides the
    /// listen address either way. Unreadable or unparsable
    /// configuration aborts startup.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("COMET_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen) = std::env::var("COMET_LISTEN") {
            let (host, port) = listen
                .rsplit_once(':')
                .context("COMET_LISTEN must be host:port")?;
            cfg.server.host = host.to_string();
            cfg.server.port = port.parse().context("COMET_LISTEN port is not a number")?;
        }

        Ok(cfg)
    }

    /// Parses a YAML configuration file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {path}"))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config file {path}"))
    }

    /// The configured listen address as `host:port`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
