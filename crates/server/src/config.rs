//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use data_facade::{
    LiveApiConfig, LiveApiConfigBuilder, DEFAULT_LIVE_API_URL, DEFAULT_MAX_CONCURRENT,
    DEFAULT_TIMEOUT_SECS,
};
use forecast_facade::{ForecastConfig, ForecastConfigBuilder, DEFAULT_HOURS, DEFAULT_MAX_HOURS};

use crate::error::StartupError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Everything the service needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Snapshot CSV seeding the buffer store (`PEDCAST_SNAPSHOT`)
    pub snapshot_path: PathBuf,
    /// Model bundle JSON (`PEDCAST_MODEL`)
    pub model_path: PathBuf,
    pub live_api: LiveApiConfig,
    pub forecast: ForecastConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        let snapshot_path = required_path(&lookup, "PEDCAST_SNAPSHOT")?;
        let model_path = required_path(&lookup, "PEDCAST_MODEL")?;

        let live_api = LiveApiConfigBuilder::new()
            .base_url(
                &lookup("PEDCAST_LIVE_API_URL").unwrap_or_else(|| DEFAULT_LIVE_API_URL.to_string()),
            )
            .timeout_secs(parse_var(
                &lookup,
                "PEDCAST_LIVE_API_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?)
            .max_concurrent(parse_var(
                &lookup,
                "PEDCAST_LIVE_MAX_CONCURRENT",
                DEFAULT_MAX_CONCURRENT,
            )?)
            .build()
            .map_err(|e| StartupError::Config(e.to_string()))?;

        let max_hours = parse_var(&lookup, "PEDCAST_MAX_HOURS", DEFAULT_MAX_HOURS)?;
        let forecast = ForecastConfigBuilder::new()
            .max_hours(max_hours)
            .default_hours(DEFAULT_HOURS.min(max_hours.max(1)))
            .build()
            .map_err(|e| StartupError::Config(format!("PEDCAST_MAX_HOURS: {}", e)))?;

        Ok(Self {
            host,
            port,
            snapshot_path,
            model_path,
            live_api,
            forecast,
        })
    }

    /// Socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr, StartupError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                StartupError::Config(format!("invalid HOST:PORT {}:{}", self.host, self.port))
            })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, StartupError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| StartupError::Config(format!("{} must be a valid number, got '{}'", key, raw))),
    }
}

fn required_path<F>(lookup: &F, key: &str) -> Result<PathBuf, StartupError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| StartupError::Config(format!("{} must be set", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("PEDCAST_SNAPSHOT", "data/recent.csv"),
        ("PEDCAST_MODEL", "models/pedcast.json"),
    ];

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.snapshot_path, PathBuf::from("data/recent.csv"));
        assert_eq!(config.live_api.base_url, DEFAULT_LIVE_API_URL);
        assert_eq!(config.live_api.timeout_secs, 10);
        assert_eq!(config.live_api.max_concurrent, 8);
        assert_eq!(config.forecast.max_hours, 720);
        assert_eq!(config.forecast.default_hours, 24);
        assert_eq!(config.addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("PEDCAST_LIVE_API_URL", "http://localhost:1234/records"),
            ("PEDCAST_LIVE_API_TIMEOUT_SECS", "3"),
            ("PEDCAST_LIVE_MAX_CONCURRENT", "2"),
            ("PEDCAST_MAX_HOURS", "12"),
        ]);
        let config = ServerConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.live_api.timeout_secs, 3);
        assert_eq!(config.live_api.max_concurrent, 2);
        assert_eq!(config.forecast.max_hours, 12);
        assert_eq!(config.forecast.default_hours, 12);
    }

    #[test]
    fn test_missing_required_path() {
        let err = ServerConfig::from_lookup(lookup(&REQUIRED[..1])).unwrap_err();
        assert!(matches!(err, StartupError::Config(msg) if msg.contains("PEDCAST_MODEL")));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        for (key, value) in [
            ("PORT", "eighty"),
            ("PEDCAST_LIVE_API_TIMEOUT_SECS", "0"),
            ("PEDCAST_LIVE_MAX_CONCURRENT", "-1"),
            ("PEDCAST_MAX_HOURS", "0"),
            ("PEDCAST_LIVE_API_URL", "ftp://example.com"),
        ] {
            let mut vars = REQUIRED.to_vec();
            vars.push((key, value));
            assert!(
                matches!(
                    ServerConfig::from_lookup(lookup(&vars)),
                    Err(StartupError::Config(_))
                ),
                "{}={}",
                key,
                value
            );
        }
    }

    #[test]
    fn test_invalid_host() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("HOST", "not a host"));
        let config = ServerConfig::from_lookup(lookup(&vars)).unwrap();
        assert!(config.addr().is_err());
    }
}
