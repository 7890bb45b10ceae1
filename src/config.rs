use serde::Serialize;

use crate::cors::CorsPolicy;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
/// Single worker, no reloader: this is a dev-facing inference backend.
pub const DEFAULT_WORKERS: usize = 1;

/// Startup configuration. Built once in `main` and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub cors: CorsPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            cors: CorsPolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces_port_8000() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.workers, 1);
        assert_eq!(config.cors, CorsPolicy::default());
    }

    #[test]
    fn serializes_for_startup_log() {
        let json = serde_json::to_value(ServerConfig::default()).unwrap();
        assert_eq!(json["port"], 8000);
        assert_eq!(json["cors"]["path_pattern"], "/*");
        assert_eq!(json["cors"]["allowed_origins"][1], "http://127.0.0.1:5173");
    }
}
