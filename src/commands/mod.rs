//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod department;
pub mod migrate;
pub mod report;
pub mod serve;
pub mod sheets;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;

/// Connect (running pending migrations) and wire the services.
async fn connect_services(config: &Config) -> AppResult<Services> {
    let db = Database::connect(config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    Ok(Services::from_connection(db.get_connection(), config))
}
