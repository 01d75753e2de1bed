//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// venuetrack - venue analytics dashboard backend
#[derive(Parser)]
#[command(name = "venuetrack")]
#[command(version)]
#[command(about = "Venue dashboard REST API and data tools", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Run database migrations and exit
    Migrate,

    /// Import venues from a CSV file
    ///
    /// Usage: seed [CSV] [--demo-users]
    Seed {
        /// CSV file with one venue per row
        csv: Option<String>,

        /// Also upsert the three demo users
        #[arg(long)]
        demo_users: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
