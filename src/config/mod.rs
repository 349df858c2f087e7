// Configuration module entry point
// Loads layered configuration and exposes the typed sections

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, LoggingConfig, ServerConfig, StaticFilesConfig, TlsConfig};

impl Config {
    /// Load configuration from the default "config" file (config.toml etc.)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; environment variables with a `SERVER_` prefix
    /// override it, and hard defaults fill in the rest. The result is
    /// immutable for the lifetime of the server.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("static_files.root", "public")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        Config::load_from("no-such-config-file").expect("defaults should load")
    }

    #[test]
    fn default_port_is_8080() {
        assert_eq!(defaults().server.port, 8080);
    }

    #[test]
    fn default_static_root_contains_public() {
        assert!(defaults().static_files.root.contains("public"));
    }

    #[test]
    fn default_has_no_tls() {
        assert!(defaults().tls.is_none());
    }

    #[test]
    fn socket_addr_uses_configured_port() {
        let mut cfg = defaults();
        cfg.server.port = 3000;
        assert_eq!(cfg.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn bad_host_is_rejected() {
        let mut cfg = defaults();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
