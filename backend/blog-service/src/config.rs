/// Configuration management for Blog Service
///
/// This module handles loading configuration from environment variables
/// (optionally seeded from a `.env` file by the binary).
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pagination::DEFAULT_PAGE_SIZE;

const DEV_JWT_SECRET: &str = "blogicum-dev-secret";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Viewer identification
    pub auth: AuthConfig,
    /// Listing configuration
    pub blog: BlogConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Bearer token validation settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity provider
    pub jwt_secret: String,
    /// Where login-required endpoints send anonymous viewers
    pub login_url: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("login_url", &self.login_url)
            .finish()
    }
}

/// Listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    pub page_size: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let app = AppConfig {
            env: app_env,
            host: std::env::var("BLOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_or_default("BLOG_SERVICE_PORT", 8080)?,
        };

        let cors = {
            let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string());
            if app.is_production() && allowed_origins.trim() == "*" {
                return Err(AppError::Config(
                    "CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string(),
                ));
            }
            CorsConfig { allowed_origins }
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/blogicum".to_string()),
            max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
            min_connections: parse_env_or_default("DATABASE_MIN_CONNECTIONS", 2)?,
            acquire_timeout_secs: parse_env_or_default("DATABASE_ACQUIRE_TIMEOUT_SECS", 10)?,
        };

        let auth = {
            let jwt_secret =
                std::env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string());
            if app.is_production()
                && (jwt_secret.trim().is_empty() || jwt_secret == DEV_JWT_SECRET)
            {
                return Err(AppError::Config(
                    "JWT_SECRET must be set to a non-default value in production".to_string(),
                ));
            }
            AuthConfig {
                jwt_secret,
                login_url: std::env::var("LOGIN_URL")
                    .unwrap_or_else(|_| "/auth/login/".to_string()),
            }
        };

        let page_size: usize = parse_env_or_default("BLOG_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(AppError::Config("BLOG_PAGE_SIZE must be at least 1".to_string()));
        }

        Ok(Config {
            app,
            cors,
            database,
            auth,
            blog: BlogConfig { page_size },
        })
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Failed to parse {}='{}': {}", key, val, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "APP_ENV",
        "BLOG_SERVICE_HOST",
        "BLOG_SERVICE_PORT",
        "CORS_ALLOWED_ORIGINS",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "JWT_SECRET",
        "BLOG_PAGE_SIZE",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_default_values() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.blog.page_size, 10);
        assert_eq!(config.auth.login_url, "/auth/login/");
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_rejected() {
        clear_env();
        std::env::set_var("BLOG_SERVICE_PORT", "eighty");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("BLOG_SERVICE_PORT"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_page_size_is_rejected() {
        clear_env();
        std::env::set_var("BLOG_PAGE_SIZE", "0");

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_production_requires_secret_and_strict_cors() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        assert!(Config::from_env().is_err());

        std::env::set_var("JWT_SECRET", "a-real-secret");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "*");
        assert!(Config::from_env().is_err());

        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://blog.example.com");
        let config = Config::from_env().unwrap();
        assert!(config.app.is_production());

        clear_env();
    }

    #[test]
    fn test_auth_debug_redacts_secret() {
        let auth = AuthConfig {
            jwt_secret: "super-secret".into(),
            login_url: "/auth/login/".into(),
        };
        assert!(!format!("{:?}", auth).contains("super-secret"));
    }
}
