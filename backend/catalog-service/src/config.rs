/// Configuration management
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    /// Symmetric signing secret for issued tokens. Rotating it invalidates
    /// every previously issued token.
    pub jwt_secret: String,
    /// Token validity window in milliseconds.
    #[serde(default = "default_jwt_expiration_ms")]
    pub jwt_expiration_ms: i64,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_jwt_expiration_ms() -> i64 {
    86_400_000 // 24 hours
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}
