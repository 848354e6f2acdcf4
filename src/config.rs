use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory tree to serve, relative to the working directory.
    pub root: String,
    /// Files tried in order when a request resolves to a directory.
    pub index_files: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format: "common", "json", or a custom $variable pattern.
    pub format: String,
    pub access_log_file: Option<String>,
    pub error_log_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
}

impl Config {
    /// Load configuration from an optional `coiserve.toml`, `COISERVE_`
    /// environment variables, and built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("coiserve").required(false))
            .add_source(config::Environment::with_prefix("COISERVE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default(
                "server.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("logging.access_log", true)?
            .set_default("logging.format", "common")?
            .set_default("http.server_name", "coiserve/0.1")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}

/// Shared per-process state handed to every connection task.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                root: ".".to_string(),
                index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            },
            logging: LoggingConfig {
                access_log: false,
                format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            http: HttpConfig {
                server_name: "coiserve/test".to_string(),
            },
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::load().expect("defaults should always load");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = test_config();
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8000);
    }
}
