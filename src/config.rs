use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use uuid::Uuid;

/// Owner id used when `AUTH_USER_ID` is not set.
pub const DEFAULT_USER_ID: Uuid = Uuid::from_u128(0x5b0c_6a1e_8d2f_4c3a_9e71_2f4d_8a6b_1c90);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StorageBackend::Postgres),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => anyhow::bail!("unknown storage backend: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// The single account allowed to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub user_id: Uuid,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt: JwtConfig,
    pub account: AccountConfig,
    pub catalogue_source_path: Option<PathBuf>,
    pub seed_on_startup: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage = match std::env::var("STORAGE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StorageBackend::Postgres,
        };
        let database_url = std::env::var("DATABASE_URL").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORAGE_BACKEND=postgres");
        }

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "coinkeeper".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "coinkeeper-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES").unwrap_or(60 * 12),
        };

        let account = AccountConfig {
            user_id: match std::env::var("AUTH_USER_ID") {
                Ok(v) => v.parse().context("AUTH_USER_ID must be a UUID")?,
                Err(_) => DEFAULT_USER_ID,
            },
            username: std::env::var("AUTH_USERNAME").unwrap_or_else(|_| "Ludivine".into()),
            password: std::env::var("AUTH_PASSWORD").unwrap_or_else(|_| "Ludivine67".into()),
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parse("APP_PORT").unwrap_or(8080),
            storage,
            database_url,
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS").unwrap_or(10),
            jwt,
            account,
            catalogue_source_path: std::env::var("CATALOGUE_SOURCE_PATH").ok().map(PathBuf::from),
            seed_on_startup: env_parse("CATALOGUE_SEED_ON_STARTUP").unwrap_or(true),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}
