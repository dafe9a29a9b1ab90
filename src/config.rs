use std::env;
use std::net::SocketAddr;

use chrono::Duration;

use crate::auth::token::DEFAULT_TOKEN_TTL_HOURS;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings shared by both binaries.
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration: Duration,
    /// `None` runs on the in-memory stores.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_host: String,
    pub user_service_port: u16,
    pub grpc_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration = match lookup("JWT_EXPIRATION") {
            Some(raw) => parse_duration(&raw).ok_or(ConfigError::Invalid {
                name: "JWT_EXPIRATION",
                value: raw,
            })?,
            None => Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        };

        Ok(Self {
            jwt_secret,
            jwt_expiration,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            user_service_port: parse_or(&lookup, "USER_SERVICE_PORT", 8080)?,
            grpc_port: parse_or(&lookup, "GRPC_PORT", 50051)?,
        })
    }

    pub fn grpc_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server_host, self.grpc_port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "SERVER_HOST",
            value: self.server_host.clone(),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.user_service_port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

/// Longest token validity window accepted from the environment.
const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// Accepts bare seconds (`3600`) or unit-suffixed parts (`24h`, `90m`,
/// `1h30m`, `45s`). Zero, negative and over-long durations are rejected.
fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if let Ok(seconds) = raw.parse::<i64>() {
        return Duration::try_seconds(seconds).filter(in_ttl_range);
    }

    let mut total: i64 = 0;
    let mut digits = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let value: i64 = digits.parse().ok()?;
        digits.clear();
        let unit = match ch {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(value.checked_mul(unit)?)?;
    }
    if !digits.is_empty() {
        return None;
    }

    Duration::try_seconds(total).filter(in_ttl_range)
}

fn in_ttl_range(ttl: &Duration) -> bool {
    *ttl > Duration::zero() && *ttl <= Duration::days(MAX_TOKEN_TTL_DAYS)
}
