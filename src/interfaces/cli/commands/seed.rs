//! Seed command: CSV venue import and demo users

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::{ImportService, UserService};
use crate::storage::SeaOrmStorage;

pub async fn run_seed(
    storage: Arc<SeaOrmStorage>,
    csv: Option<String>,
    demo_users: bool,
) -> Result<(), CliError> {
    if csv.is_none() && !demo_users {
        return Err(CliError::CommandError(
            "Nothing to seed: pass a CSV file and/or --demo-users".to_string(),
        ));
    }

    if demo_users {
        let count = UserService::new(storage.clone()).seed_demo_users().await?;
        println!("{} Upserted {} demo users", "✓".bold().green(), count);
    }

    if let Some(path) = csv {
        let report = ImportService::new(storage).import_csv(&path).await?;

        println!("{} {}", "✓".bold().green(), report.to_string().green());
        for error in &report.errors {
            println!("  {} {}", "✗".red(), error);
        }
    }

    Ok(())
}
