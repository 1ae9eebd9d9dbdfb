//! Server configuration
//!
//! Settings come from an optional TOML file (named by `PLANBOARD_CONFIG`)
//! and are then overridden by individual environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable naming the TOML configuration file
pub const CONFIG_ENV: &str = "PLANBOARD_CONFIG";

const DEFAULT_SERVICE_NAME: &str = "planboard-server";
const DEFAULT_LOG_FILTER: &str = "info,planboard=debug";
const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 100 * 1024 * 1024;

/// Runtime configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_address: SocketAddr,

    /// Service name reported to OpenTelemetry
    pub service_name: String,

    /// Verbose logging
    pub debug: bool,

    /// Export traces over OTLP
    pub otel_enabled: bool,

    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,

    /// Maximum accepted request body, uploads included
    pub upload_limit_bytes: usize,
}

/// On-disk form of [`ServerConfig`]; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    bind_address: Option<String>,
    service_name: Option<String>,
    debug: Option<bool>,
    otel_enabled: Option<bool>,
    log_filter: Option<String>,
    upload_limit_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            debug: false,
            otel_enabled: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `PLANBOARD_CONFIG` (if set) and the environment
    pub fn load() -> Result<Self> {
        let config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        let mut config = Self::default();

        if let Some(addr) = file.bind_address {
            config.bind_address = parse_bind_address(&addr)?;
        }
        if let Some(name) = file.service_name {
            config.service_name = name;
        }
        if let Some(debug) = file.debug {
            config.debug = debug;
        }
        if let Some(otel) = file.otel_enabled {
            config.otel_enabled = otel;
        }
        if let Some(filter) = file.log_filter {
            config.log_filter = filter;
        }
        if let Some(limit) = file.upload_limit_bytes {
            config.upload_limit_bytes = limit;
        }

        Ok(config)
    }

    /// Apply `BIND_ADDRESS`, `SERVICE_NAME`, `DEBUG`, `OTEL_ENABLED`,
    /// `PLANBOARD_LOG` and `UPLOAD_LIMIT_BYTES`
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BIND_ADDRESS") {
            self.bind_address = parse_bind_address(&addr)?;
        }
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service_name = name;
        }
        // Presence alone turns debug on
        if lookup("DEBUG").is_some() {
            self.debug = true;
        }
        if let Some(otel) = lookup("OTEL_ENABLED") {
            self.otel_enabled = otel
                .parse()
                .with_context(|| format!("OTEL_ENABLED must be true or false, got {:?}", otel))?;
        }
        if let Some(filter) = lookup("PLANBOARD_LOG") {
            self.log_filter = filter;
        }
        if let Some(limit) = lookup("UPLOAD_LIMIT_BYTES") {
            self.upload_limit_bytes = limit
                .parse()
                .with_context(|| format!("UPLOAD_LIMIT_BYTES must be a byte count, got {:?}", limit))?;
        }
        Ok(self)
    }

    /// Filter directive actually handed to the subscriber
    pub fn effective_log_filter(&self) -> String {
        if self.debug {
            format!("{},planboard=trace", self.log_filter)
        } else {
            self.log_filter.clone()
        }
    }
}

fn parse_bind_address(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .with_context(|| format!("Invalid bind address: {:?}", addr))
}
