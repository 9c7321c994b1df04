//! # API Configuration Module
//!
//! Loads the server and scheduling configuration from environment variables,
//! with defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info"); `RUST_LOG` overrides it
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `PLATFORM_TIMEZONE`: IANA zone for availability windows (default: "UTC")
//! - `SLOT_GRANULARITY_MINUTES`: Step between candidate slots (default: 30)
//! - `DEFAULT_HORIZON_DAYS`: Days searched when a request gives none (default: 7)
//! - `MAX_HORIZON_DAYS`: Largest horizon a request may ask for (default: 60)
//! - `DEFAULT_SESSION_MINUTES`: Session length when none is given (default: 60)

use std::{env, str::FromStr};

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use mentorbook_core::service::SchedulingSettings;
use tracing::Level;

/// Configuration for the mentorbook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use mentorbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub database_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Zone in which availability windows are interpreted
    pub timezone: Tz,

    pub slot_granularity_minutes: i32,
    pub default_horizon_days: u32,
    pub max_horizon_days: u32,
    pub default_session_minutes: i32,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - A numeric variable cannot be parsed
    /// - PLATFORM_TIMEZONE is not a known IANA zone
    /// - The scheduling values are inconsistent (see [`ApiConfig::from_lookup`])
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    ///
    /// Granularity and default session length must be positive and the
    /// default horizon must lie within `1..=MAX_HORIZON_DAYS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "API_PORT", 3000)?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = parse_or(&lookup, "API_REQUEST_TIMEOUT_SECONDS", 30)?;

        // Scheduling settings
        let timezone_name = lookup("PLATFORM_TIMEZONE").unwrap_or_else(|| "UTC".to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid PLATFORM_TIMEZONE value {:?}: {}", timezone_name, e))?;
        let slot_granularity_minutes = parse_or(&lookup, "SLOT_GRANULARITY_MINUTES", 30)?;
        let default_horizon_days = parse_or(&lookup, "DEFAULT_HORIZON_DAYS", 7)?;
        let max_horizon_days = parse_or(&lookup, "MAX_HORIZON_DAYS", 60)?;
        let default_session_minutes = parse_or(&lookup, "DEFAULT_SESSION_MINUTES", 60)?;

        if slot_granularity_minutes <= 0 {
            return Err(eyre!("SLOT_GRANULARITY_MINUTES must be positive"));
        }
        if default_session_minutes <= 0 {
            return Err(eyre!("DEFAULT_SESSION_MINUTES must be positive"));
        }
        if default_horizon_days == 0 || default_horizon_days > max_horizon_days {
            return Err(eyre!(
                "DEFAULT_HORIZON_DAYS must be between 1 and MAX_HORIZON_DAYS ({})",
                max_horizon_days
            ));
        }

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            timezone,
            slot_granularity_minutes,
            default_horizon_days,
            max_horizon_days,
            default_session_minutes,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn scheduling_settings(&self) -> SchedulingSettings {
        SchedulingSettings {
            timezone: self.timezone,
            granularity_minutes: self.slot_granularity_minutes,
            default_horizon_days: self.default_horizon_days,
            max_horizon_days: self.max_horizon_days,
            default_session_minutes: self.default_session_minutes,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {} value: {:?}", key, raw)),
        None => Ok(default),
    }
}
