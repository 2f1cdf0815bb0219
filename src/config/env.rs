// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8003)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Places API Key (link import is disabled without it)
    pub google_places_api_key: String,

    /// URL stored in place of a photo the image proxy could not fetch
    pub image_placeholder_url: String,

    /// Width requested from the provider photo endpoint
    pub photo_max_width: u32,

    /// Timeout for outbound HTTP calls, in seconds
    pub http_timeout_secs: u64,

    /// JSON file with an array of place records loaded at startup
    pub places_seed_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 8003,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            google_places_api_key: String::new(),
            image_placeholder_url: "https://placehold.co/400".to_string(),
            photo_max_width: 400,
            http_timeout_secs: 10,
            places_seed_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment, falling back to defaults
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Config::default();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),

            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),

            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY")
                .unwrap_or(defaults.google_places_api_key),

            image_placeholder_url: env::var("IMAGE_PLACEHOLDER_URL")
                .unwrap_or(defaults.image_placeholder_url),

            photo_max_width: env::var("PHOTO_MAX_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.photo_max_width),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),

            places_seed_file: env::var("PLACES_SEED_FILE")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.server_port == 0 {
            return Err("SERVER_PORT must be non-zero".to_string());
        }

        if self.photo_max_width == 0 {
            return Err("PHOTO_MAX_WIDTH must be non-zero".to_string());
        }

        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - link import will not work");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.image_placeholder_url, "https://placehold.co/400");
    }

    #[test]
    fn test_zero_port_rejected() {
        let config = Config {
            server_port: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_photo_width_rejected() {
        let config = Config {
            photo_max_width: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
