//! HTTP server configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Where the web front end listens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `127.0.0.1` or `0.0.0.0`
    pub bind_address: String,

    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Returns `address:port` suitable for binding
    pub fn socket_address(&self) -> String {
        match self.bind_address.parse::<IpAddr>() {
            Ok(IpAddr::V6(addr)) => format!("[{}]:{}", addr, self.port),
            _ => format!("{}:{}", self.bind_address, self.port),
        }
    }
}

impl ConfigSection for ServerConfig {
    const NAME: &'static str = "server";

    fn check(&self, problems: &mut Vec<ValidationError>) {
        if self.port == 0 {
            Self::problem(problems, "port", "must be between 1 and 65535");
        }

        if self.bind_address.parse::<IpAddr>().is_err() {
            Self::problem(
                problems,
                "bind_address",
                format!("'{}' is not an IP address", self.bind_address),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problems(config: &ServerConfig) -> Vec<ValidationError> {
        let mut problems = Vec::new();
        config.check(&mut problems);
        problems
    }

    #[test]
    fn test_default_is_valid() {
        let config = ServerConfig::default();
        assert!(problems(&config).is_empty());
        assert_eq!(config.socket_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_port_zero_is_invalid() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(problems(&config)[0].field, "server.port");
    }

    #[test]
    fn test_hostname_is_invalid() {
        let config = ServerConfig {
            bind_address: "localhost".to_string(),
            ..Default::default()
        };
        let found = problems(&config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "server.bind_address");
    }

    #[test]
    fn test_ipv6_socket_address() {
        let config = ServerConfig {
            bind_address: "::1".to_string(),
            port: 3000,
        };
        assert_eq!(config.socket_address(), "[::1]:3000");
    }
}
