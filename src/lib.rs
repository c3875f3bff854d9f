//! School Records - administration backend for a school
//!
//! Departments, courses, academic years, students and faculty with soft
//! archival, a department-wide archive cascade, department head
//! bookkeeping, filtered reports and spreadsheet sync.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core school records and their lifecycle
//! - **services**: Use cases, the archive cascade and event handling
//! - **infra**: Database, repositories, spreadsheet and report rendering
//! - **api**: HTTP handlers and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Archive a department and everything under it
//! cargo run -- department archive 3
//!
//! # Import every sheet
//! cargo run -- sheets import --all
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use infra::Database;
