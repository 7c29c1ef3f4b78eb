//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Hermes using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Hermes - Children's social care data submission tool
#[derive(Parser, Debug)]
#[command(name = "hermes")]
#[command(version, about, long_about = None)]
#[command(author = "Hermes Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hermes.toml", env = "HERMES_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HERMES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Regenerate partial payloads and submit pending records
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show staging table status
    Status(commands::status::StatusArgs),

    /// Check staging database and API connectivity
    Check(commands::check::CheckArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
