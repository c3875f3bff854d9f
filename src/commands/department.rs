//! Department command - archive, restore and destroy from the shell.

use std::io::{self, BufRead, Write};

use crate::cli::args::{DepartmentAction, DepartmentArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::ServiceContainer;

use super::connect_services;

/// Execute the department command
pub async fn execute(args: DepartmentArgs, config: Config) -> AppResult<()> {
    let services = connect_services(&config).await?;
    let departments = services.departments();

    match args.action {
        DepartmentAction::Archive { id } => {
            let outcome = departments.archive(id).await?;
            println!("{}", outcome.message(&format!("Department {}", id)));
        }
        DepartmentAction::Restore { id } => {
            let outcome = departments.restore(id).await?;
            println!("{}", outcome.message(&format!("Department {}", id)));
        }
        DepartmentAction::Destroy { id, yes } => {
            let department = departments.get(id, true).await?;
            if !yes && !confirm(&department.name)? {
                println!("Aborted");
                return Ok(());
            }
            let summary = departments.destroy(id).await?;
            println!(
                "Department '{}' permanently deleted ({} courses, {} students, {} faculty)",
                department.name, summary.courses, summary.students, summary.faculty
            );
        }
    }

    Ok(())
}

fn confirm(name: &str) -> AppResult<bool> {
    print!(
        "Permanently delete '{}' with all of its courses, students and faculty? [y/N] ",
        name
    );
    io::stdout()
        .flush()
        .map_err(|e| AppError::internal(e.to_string()))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| AppError::internal(e.to_string()))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
