use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Secret used when no JWT_SECRET is provided outside production.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-me";

/// Issuer claim stamped into every token this service mints.
pub const DEFAULT_JWT_ISSUER: &str = "ecommerce-api";

/// One year.
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expiry_hours: u64,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,

    #[error("the development JWT secret cannot be used in production")]
    InsecureJwtSecret,

    #[error("bcrypt cost {0} is outside the supported range 4..=31")]
    InvalidBcryptCost(u32),

    #[error("JWT expiry of {0} hours is outside the supported range 1..=8760")]
    InvalidJwtExpiry(u64),

    #[error("invalid page size configuration: {0}")]
    InvalidPageSize(String),

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|url| !url.trim().is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Catalog overrides
        if let Ok(v) = env::var("CATALOG_DEFAULT_PAGE_SIZE") {
            self.catalog.default_page_size = v.parse().unwrap_or(self.catalog.default_page_size);
        }
        if let Ok(v) = env::var("CATALOG_MAX_PAGE_SIZE") {
            self.catalog.max_page_size = v.parse().unwrap_or(self.catalog.max_page_size);
        }

        self
    }

    /// Check the settings the server cannot safely run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        if self.environment == Environment::Production
            && self.security.jwt_secret == DEVELOPMENT_JWT_SECRET
        {
            return Err(ConfigError::InsecureJwtSecret);
        }
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&self.security.jwt_expiry_hours) {
            return Err(ConfigError::InvalidJwtExpiry(self.security.jwt_expiry_hours));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(self.security.bcrypt_cost));
        }
        if self.catalog.default_page_size == 0 || self.catalog.max_page_size == 0 {
            return Err(ConfigError::InvalidPageSize("page sizes must be positive".to_string()));
        }
        if self.catalog.default_page_size > self.catalog.max_page_size {
            return Err(ConfigError::InvalidPageSize(format!(
                "default page size {} exceeds max {}",
                self.catalog.default_page_size, self.catalog.max_page_size
            )));
        }
        Ok(())
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database.url.as_deref().ok_or(ConfigError::MissingDatabaseUrl)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
                jwt_expiry_hours: 2,
                bcrypt_cost: 10,
                enable_cors: true,
                cors_origins: vec![],
            },
            catalog: CatalogConfig {
                default_page_size: 10,
                max_page_size: 1000,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
                jwt_expiry_hours: 2,
                bcrypt_cost: 10,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            catalog: CatalogConfig {
                default_page_size: 10,
                max_page_size: 500,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            security: SecurityConfig {
                // Must come from JWT_SECRET
                jwt_secret: String::new(),
                jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
                jwt_expiry_hours: 2,
                bcrypt_cost: 12,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            catalog: CatalogConfig {
                default_page_size: 10,
                max_page_size: 100,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.security.jwt_expiry_hours, 2);
        assert_eq!(config.security.jwt_issuer, "ecommerce-api");
        assert_eq!(config.catalog.default_page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.catalog.max_page_size, 100);
        assert!(!config.database.run_migrations);
        assert_eq!(config.validate(), Err(ConfigError::MissingJwtSecret));
    }

    #[test]
    fn production_rejects_development_secret() {
        let mut config = AppConfig::production();
        config.security.jwt_secret = DEVELOPMENT_JWT_SECRET.to_string();
        assert_eq!(config.validate(), Err(ConfigError::InsecureJwtSecret));

        config.security.jwt_secret = "a-real-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_bcrypt_cost() {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 3;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBcryptCost(3)));
    }

    #[test]
    fn rejects_zero_or_oversized_jwt_expiry() {
        let mut config = AppConfig::development();
        config.security.jwt_expiry_hours = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidJwtExpiry(0)));

        config.security.jwt_expiry_hours = 10_000_000_000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidJwtExpiry(10_000_000_000)));

        config.security.jwt_expiry_hours = MAX_JWT_EXPIRY_HOURS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_default_page_size_above_cap() {
        let mut config = AppConfig::development();
        config.catalog.default_page_size = 50;
        config.catalog.max_page_size = 20;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPageSize(_))));
    }

    #[test]
    fn database_url_is_required_to_connect() {
        let mut config = AppConfig::development();
        assert_eq!(config.database_url(), Err(ConfigError::MissingDatabaseUrl));
        config.database.url = Some("postgres://localhost/ecommerce".to_string());
        assert_eq!(config.database_url(), Ok("postgres://localhost/ecommerce"));
    }
}
