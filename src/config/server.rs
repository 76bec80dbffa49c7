use serde::{Deserialize, Serialize};

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub host: String,

    /// Port to listen on (default: 5123, overridden by `PORT`)
    pub port: u16,

    /// Name reported by `GET /health`
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5123,
            service_name: "glean".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
