// Configuration module entry point
// Builds the process-wide configuration once at startup

mod env;
mod state;
mod types;

use std::net::SocketAddr;

pub use env::{load_dotenv, LegacyEnv};
pub use state::AppState;
pub use types::Config;

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Placeholder secret used when none is configured
pub const DEV_SECRET_KEY: &str = "dev-secret-dont-use-in-prod";

impl Config {
    /// Load configuration from the given file path (without extension),
    /// `APP_*` environment variables and the legacy variables of the process.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(config_path, LegacyEnv::from_process())
    }

    /// Layering: defaults < config file < `APP_*` env < legacy env
    pub fn load_with(config_path: &str, legacy: LegacyEnv) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("security.secret_key", DEV_SECRET_KEY)?
            .set_default("security.debug", true)?
            .set_default("security.allowed_hosts", vec!["127.0.0.1", "localhost"])?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("upload.max_size_mb", crate::validation::DEFAULT_MAX_UPLOAD_MB)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("security.allowed_hosts")
                    .with_list_parse_key("cors.allowed_origins"),
            );

        legacy.apply(builder)?.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_defaults() -> Config {
        Config::load_with("does-not-exist", LegacyEnv::default()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = load_defaults();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.security.secret_key, DEV_SECRET_KEY);
        assert!(cfg.security.debug);
        assert_eq!(cfg.security.allowed_hosts, vec!["127.0.0.1", "localhost"]);
        assert_eq!(cfg.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.upload.max_size_mb, 10);
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_legacy_env_overrides_defaults() {
        let legacy = LegacyEnv {
            secret_key: Some("prod-secret".to_string()),
            debug: Some(false),
            allowed_hosts: Some(vec!["api.example.com".to_string()]),
            cors_allowed_origins: Some(vec!["https://app.example.com".to_string()]),
        };
        let cfg = Config::load_with("does-not-exist", legacy).unwrap();
        assert_eq!(cfg.security.secret_key, "prod-secret");
        assert!(!cfg.security.debug);
        assert_eq!(cfg.security.allowed_hosts, vec!["api.example.com"]);
        assert_eq!(cfg.cors.allowed_origins, vec!["https://app.example.com"]);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = load_defaults();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
