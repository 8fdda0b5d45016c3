use std::env;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "fincalc=info";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Load from `FINCALC_HOST` / `FINCALC_PORT`, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::var("FINCALC_HOST").ok(), env::var("FINCALC_PORT").ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host.parse().map_err(|_| ConfigError::Invalid {
            var: "FINCALC_HOST",
            value: host.clone(),
        })?;

        let port: u16 = match port {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "FINCALC_PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_vars(None, None).expect("defaults are valid");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_host_and_port() {
        let config =
            ServerConfig::from_vars(Some("127.0.0.1".to_string()), Some("3000".to_string()))
                .expect("valid config");
        assert_eq!(config.bind_address().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_vars(None, Some("http".to_string()))
            .expect_err("port must be numeric");
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "FINCALC_PORT",
                value: "http".to_string()
            }
        );
    }
}
