use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // Persistence
    pub database_url: String,
    pub database_max_connections: u32,

    // Department configuration document, re-read on every request
    pub departments_path: String,

    // Static assets
    pub static_dir: String,
    pub cors_allow_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,

            database_url: "sqlite://mydata.db".to_string(),
            database_max_connections: 5,

            departments_path: "static/departments.json".to_string(),

            static_dir: "static".to_string(),
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        if let Ok(host) = env::var("HRMINI_HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("HRMINI_PORT") {
            config.port = port.parse().map_err(|e| format!("Invalid port: {}", e))?;
        }

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }

        if let Ok(max_conn) = env::var("DATABASE_MAX_CONNECTIONS") {
            config.database_max_connections = max_conn
                .parse()
                .map_err(|e| format!("Invalid database_max_connections: {}", e))?;
            if config.database_max_connections == 0 {
                return Err("Invalid database_max_connections: must be at least 1".to_string());
            }
        }

        if let Ok(path) = env::var("DEPARTMENTS_PATH") {
            config.departments_path = path;
        }

        if let Ok(dir) = env::var("STATIC_DIR") {
            config.static_dir = dir;
        }

        if let Ok(origin) = env::var("CORS_ALLOW_ORIGIN") {
            config.cors_allow_origin = origin;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.departments_path, "static/departments.json");
        assert_eq!(config.database_url, "sqlite://mydata.db");
    }
}
