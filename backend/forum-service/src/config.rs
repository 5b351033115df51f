/// Configuration management for Forum Service
///
/// Loads configuration from environment variables (a `.env` file is read by the
/// binary before this runs).
use crate::middleware::RateLimitConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Request limits
    pub http: HttpConfig,
    /// Per-client request window
    pub rate_limit: RateLimitConfig,
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

/// Database configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Max connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Min connections in pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Timeout for opening a new connection
    pub connect_timeout_secs: u64,
    /// Timeout for acquiring a pooled connection
    pub acquire_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API
    pub allowed_origins: Vec<String>,
    /// Origin suffixes (e.g. `.vercel.app`) allowed to call the API
    pub allowed_origin_suffixes: Vec<String>,
}

/// HTTP request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Maximum accepted JSON body size in bytes
    pub max_body_bytes: usize,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    /// Raw error details are only returned to clients in development
    pub fn is_development(&self) -> bool {
        self.env.eq_ignore_ascii_case("development")
    }
}

// Default values
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_ALLOWED_ORIGIN_SUFFIXES: &str = ".vercel.app";
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let app = AppConfig {
            env: app_env.clone(),
            host: std::env::var("FORUM_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("FORUM_SERVICE_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
        };

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL environment variable not set")?,
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", default_max_connections())?,
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", default_min_connections())?,
            connect_timeout_secs: parse_env_or("DB_CONNECT_TIMEOUT_SECS", 5)?,
            acquire_timeout_secs: parse_env_or("DB_ACQUIRE_TIMEOUT_SECS", 10)?,
        };

        let cors = CorsConfig {
            allowed_origins: split_list(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            allowed_origin_suffixes: split_list(
                &std::env::var("CORS_ALLOWED_ORIGIN_SUFFIXES")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN_SUFFIXES.to_string()),
            ),
        };

        if app.is_production() && cors.allowed_origins.iter().any(|o| o == "*") {
            bail!("CORS_ALLOWED_ORIGINS cannot be '*' in production");
        }

        let http = HttpConfig {
            max_body_bytes: parse_env_or("HTTP_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        };

        let rate_limit = RateLimitConfig {
            max_requests: parse_env_or("RATE_LIMIT_MAX_REQUESTS", 100)?,
            window_seconds: parse_env_or("RATE_LIMIT_WINDOW_SECS", 900)?,
        };

        if rate_limit.max_requests == 0 || rate_limit.window_seconds == 0 {
            bail!("RATE_LIMIT_MAX_REQUESTS and RATE_LIMIT_WINDOW_SECS must be greater than zero");
        }

        Ok(Config {
            app,
            database,
            cors,
            http,
            rate_limit,
        })
    }
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
