//! API configuration.

use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS (credentials are enabled, so this
    /// must be a single explicit origin, never a wildcard)
    pub cors_origin: String,
    /// Secret for signing identity tokens
    pub jwt_secret: String,
    /// Identity token lifetime (also the cookie max-age)
    pub jwt_ttl: Duration,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origin: "http://localhost:5173".to_string(),
            jwt_secret: String::new(),
            jwt_ttl: Duration::from_secs(3600),
            max_body_size: 1024 * 1024, // 1MB
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or_default(),
            jwt_ttl: Duration::from_secs(
                std::env::var("JWT_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        for key in ["API_HOST", "PORT", "CORS_ORIGIN", "JWT_SECRET", "JWT_TTL_SECS"] {
            std::env::remove_var(key);
        }

        let config = ApiConfig::from_env();
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_ttl, Duration::from_secs(3600));
        assert!(!config.is_production());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("PORT", "9000");
        std::env::set_var("JWT_TTL_SECS", "120");
        std::env::set_var("ENVIRONMENT", "Production");

        let config = ApiConfig::from_env();
        assert_eq!(config.port, 9000);
        assert_eq!(config.jwt_ttl, Duration::from_secs(120));
        assert!(config.is_production());

        for key in ["PORT", "JWT_TTL_SECS", "ENVIRONMENT"] {
            std::env::remove_var(key);
        }
    }
}
