use std::path::PathBuf;

use crate::db::config::env_bool;

const DEFAULT_LOG_DIR: &str = "./logs";

/// Process settings; database settings live in [`crate::db::config::DbConfig`]
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Directory for rolling log files, `None` when file logging is off
    pub log_dir: Option<PathBuf>,
    pub seed_content: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = env_bool("ENABLE_FILE_LOGS", false).then(|| {
            std::env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR))
        });

        Self {
            log_level,
            log_dir,
            seed_content: env_bool("SEED_CONTENT", false),
        }
    }
}
