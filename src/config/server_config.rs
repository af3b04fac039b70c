//! HTTP listener configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};

/// Server environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEnvConfig {
    pub bind_address: IpAddr,
    pub port: u16,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw
                .parse::<IpAddr>()
                .with_context(|| format!("Failed to parse BIND_ADDRESS '{}'", raw))?,
            None => defaults.bind_address,
        };
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Failed to parse PORT '{}' - must be 0-65535", raw))?,
            None => defaults.port,
        };

        Ok(Self { bind_address, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerEnvConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServerEnvConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_server_config_overrides() {
        let config = ServerEnvConfig::from_lookup(|key| match key {
            "BIND_ADDRESS" => Some("0.0.0.0".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_config_rejects_bad_port() {
        let result = ServerEnvConfig::from_lookup(|key| {
            (key == "PORT").then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }
}
