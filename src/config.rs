/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sharedstreams::{ClientConfig, JoinKey};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 8000;

/// Origins allowed to call the API when `CORS_ALLOWED_ORIGINS` is not set
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:1313",
    "https://travel.igl-web.de",
    "https://traveldev.igl-web.de",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value `{value}` for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Settings for the HTTP service, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub client: ClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            port: DEFAULT_PORT,
            client: ClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `BIND_ADDRESS`, `CORS_ALLOWED_ORIGINS`, `ICLOUD_TIMEOUT_SECS`
    /// and `ICLOUD_JOIN_KEY`. Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(port) = var("PORT") {
            cfg.port = parse("PORT", &port)?;
        }
        if let Some(address) = var("BIND_ADDRESS") {
            cfg.bind_address = address.trim().to_string();
        }
        if let Some(origins) = var("CORS_ALLOWED_ORIGINS") {
            cfg.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(parse_origin)
                .collect::<Result<_, _>>()?;
        }
        if let Some(secs) = var("ICLOUD_TIMEOUT_SECS") {
            cfg.client.timeout = Duration::from_secs(parse("ICLOUD_TIMEOUT_SECS", &secs)?);
        }
        if let Some(key) = var("ICLOUD_JOIN_KEY") {
            cfg.client.join_key = parse::<JoinKey>("ICLOUD_JOIN_KEY", &key)?;
        }
        Ok(cfg)
    }
}

fn parse<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

// Accepts a bare `http(s)://host[:port]` origin and returns it normalized
fn parse_origin(value: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        name: "CORS_ALLOWED_ORIGINS",
        value: value.to_string(),
    };
    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    let origin = url.origin().ascii_serialization();
    if !origin.eq_ignore_ascii_case(value.trim_end_matches('/')) {
        return Err(invalid());
    }
    Ok(origin)
}
