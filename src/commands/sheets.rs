//! Sheets command - spreadsheet export and import.

use crate::cli::args::{SheetsAction, SheetsArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::ServiceContainer;

use super::connect_services;

/// Execute the sheets command
pub async fn execute(args: SheetsArgs, config: Config) -> AppResult<()> {
    let services = connect_services(&config).await?;
    let sync = services.sync();

    match args.action {
        SheetsAction::Export(selection) => {
            for entity in selection.entities() {
                let summary = sync.export(entity).await?;
                println!("{}: {} rows exported", summary.entity, summary.rows);
            }
        }
        SheetsAction::Import(selection) => {
            // Departments come first so later sheets can reference them
            for entity in selection.entities() {
                let summary = sync.import(entity).await?;
                println!(
                    "{}: {} created, {} updated",
                    summary.entity, summary.created, summary.updated
                );
            }
        }
    }

    Ok(())
}
