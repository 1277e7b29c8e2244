//! Service configuration.
//!
//! # Purpose
//! Resolves the listen addresses, storage backend and Postgres pool settings
//! from environment variables, then applies an optional YAML override file
//! named by `FULCRUM_CONFIG`.
//!
//! # Notes
//! Database URLs carry credentials; they are never logged.
use anyhow::{Context, Result, bail};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" => Ok(Self::Postgres),
            other => bail!("unknown storage backend {other:?} (expected memory or postgres)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_ms: u64,
    pub acquire_timeout_ms: u64,
}

impl PostgresConfig {
    fn with_url(url: String) -> Self {
        Self {
            url,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FulcrumConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub storage: StorageBackend,
    /// Present whenever a database URL could be resolved, even for the
    /// memory backend.
    pub postgres: Option<PostgresConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct FulcrumConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    storage: Option<StorageBackend>,
    database_url: Option<String>,
    max_connections: Option<u32>,
    connect_timeout_ms: Option<u64>,
    acquire_timeout_ms: Option<u64>,
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("parse {key}")),
        None => Ok(default),
    }
}

/// Resolve the database URL: `DATABASE_URL` wins, otherwise the discrete
/// `DB_*` variables are composed when `DB_HOST` is set.
pub fn database_url_from_lookup(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<String>> {
    if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
        return Ok(Some(url));
    }
    let Some(host) = lookup("DB_HOST").filter(|host| !host.trim().is_empty()) else {
        return Ok(None);
    };
    let port: u16 = parse_var(lookup, "DB_PORT", DEFAULT_DB_PORT)?;
    let user = lookup("DB_USER").unwrap_or_default();
    let pass = lookup("DB_PASS").unwrap_or_default();
    let name = lookup("DB_NAME").unwrap_or_default();
    let credentials = match (user.is_empty(), pass.is_empty()) {
        (true, _) => String::new(),
        (false, true) => format!("{}@", utf8_percent_encode(&user, NON_ALPHANUMERIC)),
        (false, false) => format!(
            "{}:{}@",
            utf8_percent_encode(&user, NON_ALPHANUMERIC),
            utf8_percent_encode(&pass, NON_ALPHANUMERIC)
        ),
    };
    Ok(Some(format!(
        "postgres://{credentials}{host}:{port}/{}",
        utf8_percent_encode(&name, NON_ALPHANUMERIC)
    )))
}

impl FulcrumConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = match lookup("FULCRUM_BIND") {
            Some(value) => value.parse().with_context(|| "parse FULCRUM_BIND")?,
            None => {
                let port: u16 = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };
        let metrics_bind = lookup("FULCRUM_METRICS_BIND")
            .unwrap_or_else(|| DEFAULT_METRICS_BIND.to_string())
            .parse()
            .with_context(|| "parse FULCRUM_METRICS_BIND")?;
        let storage = match lookup("FULCRUM_STORAGE") {
            Some(value) => StorageBackend::parse(&value).with_context(|| "parse FULCRUM_STORAGE")?,
            None => StorageBackend::Postgres,
        };
        let postgres = match database_url_from_lookup(&lookup)? {
            Some(url) => Some(PostgresConfig {
                url,
                max_connections: parse_var(
                    &lookup,
                    "FULCRUM_DB_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                )?,
                connect_timeout_ms: parse_var(
                    &lookup,
                    "FULCRUM_DB_CONNECT_TIMEOUT_MS",
                    DEFAULT_CONNECT_TIMEOUT_MS,
                )?,
                acquire_timeout_ms: parse_var(
                    &lookup,
                    "FULCRUM_DB_ACQUIRE_TIMEOUT_MS",
                    DEFAULT_ACQUIRE_TIMEOUT_MS,
                )?,
            }),
            None => None,
        };
        Ok(Self {
            bind_addr,
            metrics_bind,
            storage,
            postgres,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("FULCRUM_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read FULCRUM_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: FulcrumConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse fulcrum config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        if let Some(value) = override_cfg.storage {
            self.storage = value;
        }
        if let Some(url) = override_cfg.database_url {
            match self.postgres.as_mut() {
                Some(pg) => pg.url = url,
                None => self.postgres = Some(PostgresConfig::with_url(url)),
            }
        }
        if let Some(pg) = self.postgres.as_mut() {
            if let Some(value) = override_cfg.max_connections {
                pg.max_connections = value;
            }
            if let Some(value) = override_cfg.connect_timeout_ms {
                pg.connect_timeout_ms = value;
            }
            if let Some(value) = override_cfg.acquire_timeout_ms {
                pg.acquire_timeout_ms = value;
            }
        }
        Ok(())
    }
}
