//! User service configuration.

use std::env;
use std::str::FromStr;

use common::DatabaseConfig;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Serve the GraphiQL IDE on `GET /graphql`
    pub graphiql: bool,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.database.max_connections),
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", defaults.database.min_connections),
            },
            host: env::var("USER_SERVICE_HOST").unwrap_or(defaults.host),
            port: env_or("USER_SERVICE_PORT", defaults.port),
            graphiql: env_or("GRAPHIQL_ENABLED", defaults.graphiql),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse an environment variable, falling back when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 4000,
            graphiql: true,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UserServiceConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:4000");
        assert!(config.graphiql);
        assert!(config.database.url.starts_with("postgres://"));
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("USER_SERVICE_TEST_PORT", "not-a-port");
        assert_eq!(env_or("USER_SERVICE_TEST_PORT", 4000u16), 4000);

        env::set_var("USER_SERVICE_TEST_PORT", "8080");
        assert_eq!(env_or("USER_SERVICE_TEST_PORT", 4000u16), 8080);

        env::remove_var("USER_SERVICE_TEST_PORT");
        assert_eq!(env_or("USER_SERVICE_TEST_PORT", 4000u16), 4000);
    }
}
