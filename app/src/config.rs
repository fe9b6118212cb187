use crate::error::{AppError, Result};
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/fleet.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TRACK_CACHE_TTL_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub track_cache_ttl: Duration,
    pub seed: Option<SeedConfig>,
}

/// Demo data inserted at startup when `SEED_FROM_ENV=true`.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub drivers: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            dotenvy::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = dotenvy::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let track_cache_ttl_secs = dotenvy::var("TRACK_CACHE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TRACK_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| AppError::Config("Invalid TRACK_CACHE_TTL_SECS".to_string()))?;

        let should_seed = dotenvy::var("SEED_FROM_ENV")
            .map(|v| v == "true")
            .unwrap_or(false);

        let seed = if should_seed {
            Some(SeedConfig::from_env()?)
        } else {
            None
        };

        Ok(Config {
            database_url,
            bind_addr,
            track_cache_ttl: Duration::from_secs(track_cache_ttl_secs),
            seed,
        })
    }
}

impl SeedConfig {
    fn from_env() -> Result<Self> {
        let admin_email = dotenvy::var("SEED_ADMIN_EMAIL")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("SEED_ADMIN_EMAIL is required".to_string()))?;

        let admin_password = dotenvy::var("SEED_ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("SEED_ADMIN_PASSWORD is required".to_string()))?;

        let drivers = dotenvy::var("SEED_DRIVERS")
            .map(|v| parse_name_list(&v))
            .unwrap_or_default();

        Ok(SeedConfig {
            admin_email,
            admin_password,
            drivers,
        })
    }
}

fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
