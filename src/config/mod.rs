//! Configuration Module
//!
//! Centralized configuration for the admin service, loaded from environment
//! variables with development-friendly defaults.

use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::validate_email;

/// Environment variable helpers
pub mod env {
    use std::env;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u32 with default
    pub fn get_u32(key: &str, default: u32) -> u32 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u64 with default
    pub fn get_u64(key: &str, default: u64) -> u64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as i64 with default
    pub fn get_i64(key: &str, default: i64) -> i64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Check if environment variable is set
    pub fn is_set(key: &str) -> bool {
        env::var(key).is_ok()
    }
}

/// Application configuration combining all service settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub jwt: JwtConfig,
    pub admin: AdminBootstrapConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database pool settings
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

/// JWT signing settings
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_hours: i64,
}

/// Credentials for the one-time default admin bootstrap
#[derive(Debug, Clone)]
pub struct AdminBootstrapConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Allowed browser origin for the dashboard
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub frontend_url: String,
}

/// Global fixed-window rate limit
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window_seconds: u64,
    pub max_requests: u32,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::get_string("HOST", "0.0.0.0"),
                port: env::get_u16("PORT", 5000),
            },
            database: DatabaseSettings {
                url: env::get_string(
                    "DATABASE_URL",
                    "postgresql://localhost/savings_admin",
                ),
                max_connections: env::get_u32("DB_MAX_CONNECTIONS", 20),
                min_connections: env::get_u32("DB_MIN_CONNECTIONS", 1),
                connect_timeout_seconds: env::get_u64("DB_CONNECT_TIMEOUT", 30),
                idle_timeout_seconds: env::get_u64("DB_IDLE_TIMEOUT", 600),
            },
            jwt: JwtConfig {
                secret: env::get_string("JWT_SECRET", "change-me-in-production"),
                expires_hours: env::get_i64("JWT_EXPIRES_HOURS", 24),
            },
            admin: AdminBootstrapConfig {
                email: env::get_string("ADMIN_EMAIL", "admin@creditjambo.com"),
                password: env::get_string("ADMIN_PASSWORD", "Admin@123"),
                name: env::get_string("ADMIN_NAME", "Admin"),
            },
            cors: CorsConfig {
                frontend_url: env::get_string("FRONTEND_URL", "http://localhost:5173"),
            },
            rate_limit: RateLimitConfig {
                window_seconds: env::get_u64("RATE_LIMIT_WINDOW_SECS", 900),
                max_requests: env::get_u32("RATE_LIMIT_MAX_REQUESTS", 100),
            },
        }
    }

    /// Validate loaded configuration, rejecting values that cannot work
    pub fn validate(&self) -> AppResult<()> {
        if self.jwt.secret.is_empty() {
            return Err(AppError::Configuration("JWT_SECRET must not be empty".into()));
        }
        if self.jwt.expires_hours <= 0 {
            return Err(AppError::Configuration(
                "JWT_EXPIRES_HOURS must be positive".into(),
            ));
        }
        if !validate_email(&self.admin.email) {
            return Err(AppError::Configuration(
                "ADMIN_EMAIL is not a valid email address".into(),
            ));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_seconds == 0 {
            return Err(AppError::Configuration(
                "Rate limit window and request cap must be positive".into(),
            ));
        }
        if !env::is_set("JWT_SECRET") {
            log::warn!("JWT_SECRET not set, using the built-in development secret");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 5000,
            },
            database: DatabaseSettings {
                url: "postgresql://localhost/savings_admin_test".into(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                expires_hours: 24,
            },
            admin: AdminBootstrapConfig {
                email: "admin@creditjambo.com".into(),
                password: "Admin@123".into(),
                name: "Admin".into(),
            },
            cors: CorsConfig {
                frontend_url: "http://localhost:5173".into(),
            },
            rate_limit: RateLimitConfig {
                window_seconds: 900,
                max_requests: 100,
            },
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_empty_secret() {
        let mut config = base_config();
        config.jwt.secret.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_admin_email() {
        let mut config = base_config();
        config.admin.email = "not-an-email".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_rate_limit() {
        let mut config = base_config();
        config.rate_limit.max_requests = 0;
        assert!(config.validate().is_err());
    }
}
