//! `[serve]` section configuration.
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # 0.0.0.0 makes the server reachable from LAN
//! port = 5277
//! ```

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: IpAddr,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5277,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_serve_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.serve.interface.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_serve_custom() {
        let config = test_parse_config("[serve]\ninterface = \"0.0.0.0\"\nport = 8000");
        assert_eq!(config.serve.port, 8000);
        assert_eq!(config.serve.interface.to_string(), "0.0.0.0");
    }
}
