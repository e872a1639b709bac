use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Postgres,
    Sqlite,
}

impl DbBackend {
    fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub backend: DbBackend,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub sqlite_busy_timeout: Duration,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, DbConfigError> {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(DbConfigError::Missing {
                key: "DATABASE_URL",
            })?;

        let mut config = Self::for_url(url)?;
        config.max_connections = env_u32("DB_MAX_CONNECTIONS", config.max_connections);
        config.acquire_timeout = Duration::from_millis(env_u64("DB_ACQUIRE_TIMEOUT_MS", 5000));
        config.sqlite_busy_timeout =
            Duration::from_millis(env_u64("SQLITE_BUSY_TIMEOUT_MS", 30_000));
        Ok(config)
    }

    /// Defaults for an explicit URL, ignoring the environment
    pub fn for_url(url: impl Into<String>) -> Result<Self, DbConfigError> {
        let url = url.into();
        let backend = DbBackend::from_url(&url).ok_or_else(|| DbConfigError::UnsupportedUrl {
            scheme: url.split(':').next().unwrap_or_default().to_string(),
        })?;

        Ok(Self {
            url,
            backend,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            sqlite_busy_timeout: Duration::from_secs(30),
        })
    }
}

#[derive(Debug, Error)]
pub enum DbConfigError {
    #[error("Missing required env var: {key}")]
    Missing { key: &'static str },
    #[error("Unsupported database scheme: {scheme}")]
    UnsupportedUrl { scheme: String },
}

pub(crate) fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        let pg = DbConfig::for_url("postgres://user:pw@localhost/lessons").unwrap();
        assert_eq!(pg.backend, DbBackend::Postgres);

        let sqlite = DbConfig::for_url("sqlite:./data/lessons.db?mode=rwc").unwrap();
        assert_eq!(sqlite.backend, DbBackend::Sqlite);
        assert_eq!(sqlite.max_connections, 10);
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = DbConfig::for_url("mysql://localhost/lessons").unwrap_err();
        assert!(matches!(err, DbConfigError::UnsupportedUrl { ref scheme } if scheme == "mysql"));
    }
}
