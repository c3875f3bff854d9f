//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REPORTS_DIR, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SHEETS_DIR,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Directory backing the CSV spreadsheet connector
    pub sheets_dir: PathBuf,
    /// Directory the CLI writes rendered reports into
    pub reports_dir: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("sheets_dir", &self.sheets_dir)
            .field("reports_dir", &self.reports_dir)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            sheets_dir: env::var("SHEETS_DIR")
                .unwrap_or_else(|_| DEFAULT_SHEETS_DIR.to_string())
                .into(),
            reports_dir: env::var("REPORTS_DIR")
                .unwrap_or_else(|_| DEFAULT_REPORTS_DIR.to_string())
                .into(),
        }
    }

    /// Configuration pointing at the given database, other values defaulted.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            sheets_dir: DEFAULT_SHEETS_DIR.into(),
            reports_dir: DEFAULT_REPORTS_DIR.into(),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_database_url() {
        let config = Config::with_database_url("postgres://admin:hunter2@db/school");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        let mut config = Config::with_database_url("sqlite::memory:");
        config.server_host = "127.0.0.1".to_string();
        config.server_port = 8080;

        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
