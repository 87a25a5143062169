//! Process configuration from environment variables (a `.env` file is loaded by the binary).

use std::net::SocketAddr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct EdgeConfig {
    pub bind_addr: SocketAddr,
    /// Prefix for bundles served from managed storage; path parts are appended verbatim.
    pub managed_origin: String,
    /// Used when a request carries no `x-edge-environment` header.
    pub default_environment: String,
    /// Scheme of the public request URL (TLS usually terminates in front of this service).
    pub public_scheme: String,
    pub database_url: Option<String>,
    pub kv_seed_path: Option<String>,
    pub upstream_timeout: Duration,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        EdgeConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            managed_origin: "https://storage.tenant-edge.invalid/".into(),
            default_environment: "prod".into(),
            public_scheme: "https".into(),
            database_url: None,
            kv_seed_path: None,
            upstream_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid {var}: {reason}")]
pub struct SettingsError {
    pub var: &'static str,
    pub reason: String,
}

impl EdgeConfig {
    /// Read `BIND_ADDR`, `MANAGED_ORIGIN`, `DEFAULT_ENVIRONMENT`, `PUBLIC_SCHEME`, `DATABASE_URL`,
    /// `KV_SEED_PATH` and `UPSTREAM_TIMEOUT_SECS`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        let defaults = EdgeConfig::default();
        let bind_addr = match env_opt("BIND_ADDR") {
            Some(v) => v.parse().map_err(|e: std::net::AddrParseError| SettingsError {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?,
            None => defaults.bind_addr,
        };
        let upstream_timeout = match env_opt("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse().map_err(|e: std::num::ParseIntError| SettingsError {
                var: "UPSTREAM_TIMEOUT_SECS",
                reason: e.to_string(),
            })?),
            None => defaults.upstream_timeout,
        };
        let public_scheme = env_opt("PUBLIC_SCHEME").unwrap_or(defaults.public_scheme);
        if public_scheme != "http" && public_scheme != "https" {
            return Err(SettingsError {
                var: "PUBLIC_SCHEME",
                reason: format!("expected http or https, got {}", public_scheme),
            });
        }
        Ok(EdgeConfig {
            bind_addr,
            managed_origin: env_opt("MANAGED_ORIGIN").unwrap_or(defaults.managed_origin),
            default_environment: env_opt("DEFAULT_ENVIRONMENT").unwrap_or(defaults.default_environment),
            public_scheme,
            database_url: env_opt("DATABASE_URL"),
            kv_seed_path: env_opt("KV_SEED_PATH"),
            upstream_timeout,
        })
    }
}

fn env_opt(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
