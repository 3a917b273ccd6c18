//! # Guardpost CLI
//!
//! Command-line interface for Guardpost Admin.
//!
//! ## Commands
//!
//! - `list` - search, filter, sort and page through a collection
//! - `show` - display one record
//! - `add` / `edit` - create or update a record from `--set FIELD=VALUE` pairs
//! - `delete` - remove a record
//! - `settings` - show or update the support settings
//! - `dashboard` - record counts per collection (the default command)
//! - `reset` - clear stored data
//!

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

// Re-export dependencies for use in main.rs
pub use guardpost_core;
pub use guardpost_views;

use anyhow::Result;
use clap::Parser;
use guardpost_views::AdminContext;
use tracing::debug;

pub use args::{Cli, Command};
pub use commands::CliError;
pub use config::{Config, load_config};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Parse the process arguments and run the chosen command
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

/// Run an already-parsed command line
pub fn run_with(cli: Cli) -> Result<()> {
    let loaded = config::read_config(&cli.config);
    let configured_level = loaded
        .as_ref()
        .ok()
        .and_then(|c| c.as_ref())
        .and_then(|c| c.log_level.clone());
    logging::init(cli.verbose, configured_level.as_deref());

    let config = config::settle(loaded, &cli.config).with_data_dir(cli.data_dir.clone());
    debug!("Using data directory {}", config.data_dir.display());

    let ctx = AdminContext::new(guardpost_store::open_directory(&config.data_dir))
        .with_page_size(config.page_size)
        .with_latency(config.simulated_latency());

    let command = cli.command.unwrap_or(Command::Dashboard);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(commands::execute(ctx, command))
}
