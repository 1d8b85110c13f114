use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::render::ScoreSchema;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub schema: ScoreSchema,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => parse("PORT", value, |v| v.trim().parse::<u16>().map_err(|e| e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let backend_url = lookup("BACKEND_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let schema = match lookup("SCORE_SCHEMA") {
            Some(value) => parse("SCORE_SCHEMA", value, |v| v.parse::<ScoreSchema>())?,
            None => ScoreSchema::default(),
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => Some(parse("REQUEST_TIMEOUT_SECS", value, |v| {
                match v.trim().parse::<u64>() {
                    Ok(0) => Err("must be positive".to_string()),
                    Ok(secs) => Ok(Duration::from_secs(secs)),
                    Err(err) => Err(err.to_string()),
                }
            })?),
            None => None,
        };

        Ok(Self {
            port,
            backend_url,
            schema,
            request_timeout,
        })
    }
}

fn parse<T>(
    name: &'static str,
    value: String,
    parser: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    parser(&value).map_err(|reason| ConfigError::Invalid { name, value, reason })
}
