//! Status command implementation
//!
//! This module implements the `status` command for displaying staging
//! table counts by submission status and row state.

use crate::adapters::staging::{PostgresStagingStore, StagingStore};
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking staging status");

        println!("📊 Staging Status");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Connect to the staging database
        let store = match PostgresStagingStore::new(config.staging.clone()).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to staging database");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        // Load counts
        let counts = match store.status_counts().await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to query staging table");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        if counts.total() == 0 {
            println!("No staged records found.");
            println!("Run the loader to populate the staging table, then 'hermes run'.");
            return Ok(0);
        }

        println!("Found {} staged record(s) in '{}':", counts.total(), config.staging.table);
        println!();

        println!("By submission status:");
        for (status, count) in &counts.by_status {
            println!("  {status:<12} {count}");
        }
        println!();

        println!("By row state:");
        for (state, count) in &counts.by_row_state {
            println!("  {state:<12} {count}");
        }
        println!();

        Ok(0)
    }
}
