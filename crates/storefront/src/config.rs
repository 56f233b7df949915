//! Runtime configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `STOREFRONT_HOST` | `0.0.0.0` |
//! | `STOREFRONT_PORT` | `5000` |
//! | `STOREFRONT_MAILBOX_CAPACITY` | `32` |
//! | `STOREFRONT_CORS_MAX_AGE_SECS` | `3600` |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mailbox_capacity: usize,
    pub cors_max_age: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // Non-fatal: variables may come from the real environment.
        if dotenvy::dotenv().is_ok() {
            info!("Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mailbox_capacity: usize = try_load(&lookup, "STOREFRONT_MAILBOX_CAPACITY", "32")?;
        if mailbox_capacity == 0 {
            return Err(ConfigError::Zero("STOREFRONT_MAILBOX_CAPACITY"));
        }
        Ok(Self {
            host: try_load(&lookup, "STOREFRONT_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "STOREFRONT_PORT", "5000")?,
            mailbox_capacity,
            cors_max_age: Duration::from_secs(try_load(
                &lookup,
                "STOREFRONT_CORS_MAX_AGE_SECS",
                "3600",
            )?),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
