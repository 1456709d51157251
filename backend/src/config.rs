use std::net::SocketAddr;
use std::str::FromStr;

use shared::constants::*;
use shared::physics::PhysicsConfig;
use shared::EngineError;

const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
const DEFAULT_CORS_ORIGINS: &str = "http://127.0.0.1:8080,http://127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("spin physics rejected: {0}")]
    Physics(#[from] EngineError),
}

/// Server settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Postgres connection string. Wheels are kept in memory when unset.
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub physics: PhysicsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "SPINWHEEL_BIND", SocketAddr::from(DEFAULT_BIND))?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let cors_origins = lookup("SPINWHEEL_CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        // A friction of 1 or a zero stop speed would spin forever, so refuse to start.
        let physics = PhysicsConfig::new(
            parse_or(&lookup, "SPIN_FRICTION", DEFAULT_FRICTION)?,
            parse_or(&lookup, "SPIN_MIN_SPEED", DEFAULT_MIN_SPEED)?,
            parse_or(&lookup, "SPIN_MIN_IMPULSE", DEFAULT_MIN_IMPULSE)?,
            parse_or(&lookup, "SPIN_IMPULSE_RANGE", DEFAULT_IMPULSE_RANGE)?,
        )?;

        Ok(Self {
            bind_addr,
            database_url,
            cors_origins,
            physics,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        _ => Ok(default),
    }
}
