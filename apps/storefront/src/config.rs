//! # Application Configuration
//!
//! Configuration loaded at startup from environment variables.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MANDI_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

/// Application configuration.
///
/// Most fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the API binds to.
    pub addr: String,

    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Allowed CORS origin for the web storefront.
    /// `*` during development; the deployed frontend origin in production.
    pub cors_origin: String,

    /// Default page size for catalog listings.
    pub catalog_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            addr: "0.0.0.0:8080".to_string(),
            database_path: PathBuf::from("./mandi_dev.db"),
            cors_origin: "*".to_string(),
            catalog_page_size: 50,
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MANDI_ADDR`: Bind address (default "0.0.0.0:8080")
    /// - `MANDI_DB_PATH`: Database file path (default "./mandi_dev.db")
    /// - `MANDI_CORS_ORIGIN`: Allowed CORS origin (default "*")
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(addr) = std::env::var("MANDI_ADDR") {
            config.addr = addr;
        }

        if let Ok(path) = std::env::var("MANDI_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if let Ok(origin) = std::env::var("MANDI_CORS_ORIGIN") {
            config.cors_origin = origin;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.catalog_page_size, 50);
    }
}
