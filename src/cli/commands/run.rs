//! Run command implementation
//!
//! This module implements the `run` command: the delta pass over the
//! staging table followed by batched submission to the API.

use crate::config::load_config;
use crate::core::pipeline::RunCoordinator;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - compute payloads without writing or submitting
    #[arg(long)]
    pub dry_run: bool,

    /// Override records per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Submit full documents instead of regenerated partial payloads
    #[arg(long)]
    pub full_payload: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(batch_size) = self.batch_size {
            tracing::info!(batch_size = batch_size, "Overriding batch size from CLI");
            config.submission.batch_size = batch_size;
        }

        if self.full_payload {
            tracing::info!("Disabling partial payloads from CLI");
            config.submission.use_partial_payload = false;
        }

        // Apply dry-run flag from CLI
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        // Validate configuration
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Dry run mode
        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - nothing will be written or submitted");
            println!("🔍 DRY RUN MODE - No payloads will be written and nothing will be submitted");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !config.application.dry_run {
            println!("Run Configuration:");
            println!("  Endpoint: {}", config.api.submission_url());
            println!(
                "  Payload mode: {}",
                if config.submission.use_partial_payload {
                    "partial"
                } else {
                    "full"
                }
            );
            println!("  Batch size: {}", config.submission.batch_size);
            println!("  Max retries: {}", config.api.retry.max_retries);
            println!();
            print!("Proceed with submission? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Run cancelled.");
                return Ok(0);
            }
        }

        // Create run coordinator
        tracing::info!("Creating run coordinator");
        let coordinator = match RunCoordinator::new(config, shutdown_signal).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create run coordinator");
                eprintln!("Failed to initialize run: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        // Execute run
        tracing::info!("Executing run");
        println!("🚀 Starting submission run...");
        println!();

        let summary = match coordinator.execute_run().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Run Summary:");
        if let Some(delta) = &summary.delta {
            println!("  Rows checked: {}", delta.checked);
            println!("  Partial payloads: {}", delta.deltas);
            println!("  Deletion payloads: {}", delta.deletions);
            if delta.parse_failures > 0 {
                println!("  Parse failures: {}", delta.parse_failures);
            }
        }
        println!("  Pending: {}", summary.pending);
        println!("  Sent: {}", summary.sent());
        println!("  Failed: {}", summary.failed());
        println!("  Retries: {}", summary.retries());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        // Determine exit code
        let exit_code = if summary.interrupted {
            println!();
            println!("⚠️  Run interrupted gracefully. Completed batches are persisted.");
            println!("   Run the same command to submit the remainder.");
            println!();
            tracing::info!("Run interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.is_successful() {
            if summary.dry_run {
                println!("✅ Dry run completed. Nothing was submitted.");
            } else {
                println!("✅ Run completed successfully!");
            }
            0
        } else {
            println!("⚠️  Run completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }
}
