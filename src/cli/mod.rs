//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `department` - Department archive, restore and destroy
//! - `sheets` - Spreadsheet export and import
//! - `report` - Student and faculty reports

pub mod args;

pub use args::{Cli, Commands};
