//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    asset::AssetCommands, asset_type::TypeCommands, category::CategoryCommands,
    completions::CompletionsArgs, init::InitArgs, location::LocationCommands,
};
use crate::core::config::{Config, DEFAULT_DATABASE};

#[derive(Parser)]
#[command(name = "itrack")]
#[command(author, version, about = "IT asset inventory")]
#[command(long_about = "Track hardware assets by category, type, tag, location and status in a local SQLite database.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Database file (default: from config, ITRACK_DB, or ./itrack.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

impl GlobalOpts {
    /// Fill in whatever the command line left open from the loaded configuration
    pub fn apply_config(&mut self, config: &Config) {
        self.db = Some(config.database_path(self.db.as_deref()));
        if self.format == OutputFormat::Auto {
            if let Some(format) = config
                .default_format
                .as_deref()
                .and_then(|f| OutputFormat::from_str(f, true).ok())
            {
                self.format = format;
            }
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    /// Log filter for the subscriber: flags win over configuration
    pub fn log_filter(&self, config: &Config) -> String {
        if self.verbose {
            "itrack=debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            config.log_level().to_string()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and load reference data
    Init(InitArgs),

    /// Asset categories (code prefixes)
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Asset types within a category
    #[command(subcommand)]
    Type(TypeCommands),

    /// Locations assets can be placed at
    #[command(subcommand)]
    Location(LocationCommands),

    /// Asset management
    #[command(subcommand)]
    Asset(AssetCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (table for list, details for show)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
