//! Command-line arguments

use clap::{ArgAction, Args, Parser, Subcommand};
use guardpost_core::{CollectionKey, SortField};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "guardpost")]
#[command(about = "Manage pages, banners, email templates, services and support settings")]
#[command(version)]
pub struct Cli {
    /// Directory holding the collection files
    #[arg(long, global = true, env = "GUARDPOST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(
        long,
        global = true,
        env = "GUARDPOST_CONFIG",
        default_value = crate::config::CONFIG_FILENAME
    )]
    pub config: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List records with search, filters, sorting and paging
    List(ListArgs),

    /// Show every field of one record
    Show {
        collection: CollectionKey,
        id: String,
    },

    /// Create a record
    Add {
        collection: CollectionKey,

        /// Field value, repeatable (e.g. --set title="About Us")
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Update a record
    Edit {
        collection: CollectionKey,
        id: String,

        /// Field value, repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Delete a record
    Delete {
        collection: CollectionKey,
        id: String,
    },

    /// Show or update the support settings
    Settings {
        /// Field value, repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// Record counts per collection
    Dashboard,

    /// Remove stored data for one collection, or `all`
    Reset { target: String },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub collection: CollectionKey,

    /// Case-insensitive title search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Equality filter, repeatable (e.g. --filter status=active)
    #[arg(short, long, value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub filter: Vec<(String, String)>,

    /// Sort field: title or created-at
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page to show (clamped to the last page)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Parse `field=value`
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((field.to_string(), value.to_string()))
}
