//! 非 `serve` 子命令的执行入口

pub mod commands;

use std::fmt;

use colored::Colorize;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::VenueError;
use crate::storage::StorageFactory;
use commands::{config_generate, run_migrate, run_seed};

#[derive(Debug)]
pub enum CliError {
    /// 来自存储或导入层的错误
    Venue(VenueError),
    /// 命令用法或终端交互问题
    CommandError(String),
}

impl CliError {
    pub fn format_colored(&self) -> String {
        match self {
            CliError::Venue(err) => err.format_colored(),
            CliError::CommandError(msg) => format!("{} {}", "error:".red().bold(), msg),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Venue(err) => fmt::Display::fmt(err, f),
            CliError::CommandError(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<VenueError> for CliError {
    fn from(err: VenueError) -> Self {
        CliError::Venue(err)
    }
}

pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        // 只写文件，不需要数据库
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,
        Commands::Serve => Err(CliError::CommandError(
            "`serve` runs the HTTP server and is not a one-shot command".to_string(),
        )),
        Commands::Migrate => {
            // 打开连接的同时已完成迁移
            let storage = StorageFactory::create().await?;
            let result = run_migrate(&storage);
            storage.close().await;
            result
        }
        Commands::Seed { csv, demo_users } => {
            let storage = StorageFactory::create().await?;
            let result = run_seed(storage.clone(), csv, demo_users).await;
            storage.close().await;
            result
        }
    }
}
