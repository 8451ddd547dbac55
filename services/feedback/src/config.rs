//! Service configuration.
//!
//! # Purpose
//! Reads settings from environment variables, then applies an optional YAML
//! override file named by `FEEDBACK_CONFIG`.
//!
//! # Security notes
//! The database URL is never defaulted and never printed; `Debug` for
//! [`PostgresConfig`] redacts it.
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";
pub const DEFAULT_COLLECTION: &str = "feedbacks";
pub const DEFAULT_PG_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_PG_TIMEOUT_MS: u64 = 5_000;
const MAX_COLLECTION_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => bail!("unknown storage backend: {other}"),
        }
    }
}

#[derive(Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_ms: u64,
    pub acquire_timeout_ms: u64,
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("acquire_timeout_ms", &self.acquire_timeout_ms)
            .finish()
    }
}

// Feedback service configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub storage: StorageBackend,
    pub postgres: Option<PostgresConfig>,
    pub collection: String,
}

#[derive(Debug, Default, Deserialize)]
struct FeedbackConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    storage: Option<StorageBackend>,
    collection: Option<String>,
    postgres: Option<PostgresOverride>,
}

#[derive(Debug, Default, Deserialize)]
struct PostgresOverride {
    url: Option<String>,
    max_connections: Option<u32>,
    connect_timeout_ms: Option<u64>,
    acquire_timeout_ms: Option<u64>,
}

impl FeedbackConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("FEEDBACK_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read FEEDBACK_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    /// Build from an arbitrary key lookup so tests need not mutate the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("FEEDBACK_BIND") {
            Some(value) => value,
            None => {
                let port = match lookup("PORT") {
                    Some(port) => port.trim().parse::<u16>().with_context(|| "parse PORT")?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        }
        .parse()
        .with_context(|| "parse FEEDBACK_BIND")?;
        let metrics_bind = lookup("FEEDBACK_METRICS_BIND")
            .unwrap_or_else(|| DEFAULT_METRICS_BIND.to_string())
            .parse()
            .with_context(|| "parse FEEDBACK_METRICS_BIND")?;
        let storage = match lookup("FEEDBACK_STORAGE_BACKEND") {
            Some(value) => value
                .parse()
                .with_context(|| "parse FEEDBACK_STORAGE_BACKEND")?,
            None => StorageBackend::Memory,
        };
        let collection =
            lookup("FEEDBACK_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let postgres = match lookup("FEEDBACK_DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
            Some(url) => Some(PostgresConfig {
                url,
                max_connections: parse_or(
                    &lookup,
                    "FEEDBACK_PG_MAX_CONNECTIONS",
                    DEFAULT_PG_MAX_CONNECTIONS,
                )?,
                connect_timeout_ms: parse_or(
                    &lookup,
                    "FEEDBACK_PG_CONNECT_TIMEOUT_MS",
                    DEFAULT_PG_TIMEOUT_MS,
                )?,
                acquire_timeout_ms: parse_or(
                    &lookup,
                    "FEEDBACK_PG_ACQUIRE_TIMEOUT_MS",
                    DEFAULT_PG_TIMEOUT_MS,
                )?,
            }),
            None => None,
        };

        let config = Self {
            bind_addr,
            metrics_bind,
            storage,
            postgres,
            collection,
        };
        config.validate()?;
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: FeedbackConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse feedback config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        if let Some(value) = override_cfg.storage {
            self.storage = value;
        }
        if let Some(value) = override_cfg.collection {
            self.collection = value;
        }
        if let Some(pg) = override_cfg.postgres {
            let current = self.postgres.take();
            let url = match pg.url.or_else(|| current.as_ref().map(|c| c.url.clone())) {
                Some(url) => url,
                None => bail!("postgres override requires a url"),
            };
            self.postgres = Some(PostgresConfig {
                url,
                max_connections: pg
                    .max_connections
                    .or(current.as_ref().map(|c| c.max_connections))
                    .unwrap_or(DEFAULT_PG_MAX_CONNECTIONS),
                connect_timeout_ms: pg
                    .connect_timeout_ms
                    .or(current.as_ref().map(|c| c.connect_timeout_ms))
                    .unwrap_or(DEFAULT_PG_TIMEOUT_MS),
                acquire_timeout_ms: pg
                    .acquire_timeout_ms
                    .or(current.as_ref().map(|c| c.acquire_timeout_ms))
                    .unwrap_or(DEFAULT_PG_TIMEOUT_MS),
            });
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        let name = &self.collection;
        if name.is_empty() || name.len() > MAX_COLLECTION_LEN {
            bail!("collection name must be 1-{MAX_COLLECTION_LEN} characters");
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            bail!("collection name may only contain [a-z0-9_-]: {name}");
        }
        if let Some(pg) = &self.postgres {
            if pg.max_connections == 0 {
                bail!("postgres max_connections must be at least 1");
            }
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = FeedbackConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config.bind_addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(config.metrics_bind, DEFAULT_METRICS_BIND.parse().unwrap());
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert!(config.postgres.is_none());
    }

    #[test]
    fn port_applies_when_bind_is_unset() {
        let config =
            FeedbackConfig::from_lookup(lookup_from(&[("PORT", "8081")])).expect("config");
        assert_eq!(config.bind_addr, "0.0.0.0:8081".parse().unwrap());

        let config = FeedbackConfig::from_lookup(lookup_from(&[
            ("PORT", "8081"),
            ("FEEDBACK_BIND", "127.0.0.1:7000"),
        ]))
        .expect("config");
        assert_eq!(config.bind_addr, "127.0.0.1:7000".parse().unwrap());
    }

    #[test]
    fn postgres_settings_from_environment() {
        let config = FeedbackConfig::from_lookup(lookup_from(&[
            ("FEEDBACK_STORAGE_BACKEND", "Postgres"),
            ("DATABASE_URL", "postgres://u:p@db/feedback"),
            ("FEEDBACK_PG_MAX_CONNECTIONS", "3"),
            ("FEEDBACK_COLLECTION", "beta_feedback"),
        ]))
        .expect("config");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.collection, "beta_feedback");
        let pg = config.postgres.expect("postgres");
        assert_eq!(pg.url, "postgres://u:p@db/feedback");
        assert_eq!(pg.max_connections, 3);
        assert_eq!(pg.acquire_timeout_ms, DEFAULT_PG_TIMEOUT_MS);
    }

    #[test]
    fn debug_output_redacts_database_url() {
        let pg = PostgresConfig {
            url: "postgres://user:secret@db/feedback".to_string(),
            max_connections: 1,
            connect_timeout_ms: 1,
            acquire_timeout_ms: 1,
        };
        let text = format!("{pg:?}");
        assert!(!text.contains("secret"));
        assert!(text.contains("<redacted>"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = FeedbackConfig::from_lookup(lookup_from(&[("FEEDBACK_BIND", "nope")]))
            .expect_err("bad bind");
        assert!(err.to_string().contains("FEEDBACK_BIND"));

        let err =
            FeedbackConfig::from_lookup(lookup_from(&[("FEEDBACK_STORAGE_BACKEND", "mongo")]))
                .expect_err("bad backend");
        assert!(err.to_string().contains("FEEDBACK_STORAGE_BACKEND"));

        let err =
            FeedbackConfig::from_lookup(lookup_from(&[("FEEDBACK_COLLECTION", "Bad Name")]))
                .expect_err("bad collection");
        assert!(err.to_string().contains("collection"));
    }

    #[test]
    fn yaml_overrides_environment() {
        let mut config = FeedbackConfig::from_lookup(lookup_from(&[])).expect("config");
        config
            .apply_yaml(
                "bind_addr: 127.0.0.1:6000\nstorage: postgres\ncollection: launch\npostgres:\n  url: postgres://db/feedback\n  max_connections: 2\n",
            )
            .expect("apply");
        assert_eq!(config.bind_addr, "127.0.0.1:6000".parse().unwrap());
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.collection, "launch");
        let pg = config.postgres.expect("postgres");
        assert_eq!(pg.max_connections, 2);
        assert_eq!(pg.connect_timeout_ms, DEFAULT_PG_TIMEOUT_MS);
    }

    #[test]
    fn yaml_postgres_without_url_is_rejected() {
        let mut config = FeedbackConfig::from_lookup(lookup_from(&[])).expect("config");
        let err = config
            .apply_yaml("postgres:\n  max_connections: 2\n")
            .expect_err("missing url");
        assert!(err.to_string().contains("url"));
    }

    #[test]
    #[serial]
    fn from_env_or_yaml_reads_override_file() {
        let path = std::env::temp_dir().join(format!("feedback-config-{}.yaml", uuid::Uuid::new_v4()));
        fs::write(&path, "collection: from_file\n").expect("write yaml");
        let prev = std::env::var("FEEDBACK_CONFIG").ok();
        unsafe {
            std::env::set_var("FEEDBACK_CONFIG", &path);
        }
        let result = FeedbackConfig::from_env_or_yaml();
        unsafe {
            match prev {
                Some(value) => std::env::set_var("FEEDBACK_CONFIG", value),
                None => std::env::remove_var("FEEDBACK_CONFIG"),
            }
        }
        let _ = fs::remove_file(&path);
        assert_eq!(result.expect("config").collection, "from_file");
    }
}
