//! Configuration management with layered files and environment variable support.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deadline for a single request, after which it is answered with 408.
    pub request_timeout_seconds: u64,
    /// Time in-flight requests get to finish once shutdown starts.
    pub shutdown_grace_seconds: u64,
    pub max_request_size_kb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_seconds: 60,
            shutdown_grace_seconds: 5,
            max_request_size_kb: 1_024,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid server host: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }

    pub fn max_request_size_bytes(&self) -> usize {
        self.max_request_size_kb.saturating_mul(1024)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    pub format: String, // "json" or "text"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main settings structure with all configuration sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from the built-in defaults, an optional local `weather`
    /// config file, and `WEATHER__` environment variables, in that order.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(
                include_str!("../config.toml"),
                FileFormat::Toml,
            ))
            .add_source(File::with_name("weather").required(false))
            // e.g. WEATHER__SERVER__PORT=9000
            .add_source(
                Environment::with_prefix("WEATHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to assemble configuration sources")?;

        let settings: Settings = config
            .try_deserialize()
            .context("Failed to parse configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("Server port cannot be 0"));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(anyhow!("Request timeout must be at least one second"));
        }
        if self.server.max_request_size_kb == 0 {
            return Err(anyhow!("Max request size cannot be 0"));
        }
        self.server.socket_addr()?;

        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(anyhow!(
                    "Unknown log format '{other}', expected 'text' or 'json'"
                ))
            }
        }

        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings to TOML")
    }
}
