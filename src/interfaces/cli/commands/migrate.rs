use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;

/// 迁移在建立连接时已经执行，这里只报告结果
pub fn run_migrate(storage: &SeaOrmStorage) -> Result<(), CliError> {
    println!(
        "{} {} {}",
        "✓".bold().green(),
        "Migrations applied on".green(),
        storage.backend_name().blue()
    );
    Ok(())
}
