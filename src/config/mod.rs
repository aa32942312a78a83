//! Configuration module
//!
//! Layered configuration: code defaults, an optional `config.toml` next
//! to the binary, `SERVER_*` environment variables, and finally the CLI
//! positional port argument. The proxy route table is deliberately not
//! configurable; it lives in `crate::routes`.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub proxy: ProxyConfig,
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    /// Total wait bound for one upstream call, in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// Root directory for static files, relative to the server's own
    /// directory (the working directory is forced there at startup).
    pub root: String,
    pub index_files: Vec<String>,
}

impl Config {
    /// Load configuration from defaults, file, and environment.
    ///
    /// `cli_port` is the optional positional argument and takes
    /// precedence over every other source.
    pub fn load(cli_port: Option<u16>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", true)?
            .set_default("proxy.timeout_secs", 15)?
            .set_default("proxy.user_agent", "YakimaBasinDashboard/1.0 (local proxy)")?
            .set_default("static.root", ".")?
            .set_default("static.index_files", vec!["index.html".to_string()])?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        if let Some(port) = cli_port {
            cfg.server.port = port;
        }
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared per-process state handed to every request handler.
///
/// Fully immutable after startup: the route table is fixed and the
/// reqwest client is internally reference-counted, so handlers share
/// this through an `Arc` with no locking.
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        // One client for the process; the timeout bounds the total wait
        // for each upstream call including connect and body read.
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy.timeout_secs))
            .user_agent(config.proxy.user_agent.clone())
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load(None).expect("defaults should load");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.proxy.timeout_secs, 15);
        assert_eq!(cfg.static_files.index_files, vec!["index.html"]);
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_cli_port_overrides_default() {
        let cfg = Config::load(Some(9000)).expect("defaults should load");
        assert_eq!(cfg.server.port, 9000);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load(Some(9000)).unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 9000);
        assert!(addr.ip().is_loopback());
    }
}
