use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogFormat;

/// set-quota: check nutrition sets against per-category consumption quotas.
#[derive(Parser, Debug)]
#[command(name = "set-quota")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Ingredient catalog (JSON array, or CSV when the file ends in .csv).
    #[arg(short, long, global = true, default_value = "ingredients.json")]
    pub catalog: PathBuf,

    /// Maximum consumption per category, in percent of reference servings.
    /// Overrides MAX_INGREDIENT_CONSUMPTION.
    #[arg(short = 'm', long, global = true)]
    pub max_consumption: Option<f64>,

    /// Log filter directive (overrides RUST_LOG).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (overrides LOG_FORMAT).
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a set file the way a set create/update request is checked.
    Check {
        /// Path to the set JSON file.
        set: PathBuf,

        /// Check as an update (ingredients may be omitted).
        #[arg(long)]
        update: bool,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show per-category headroom for a set file.
    Report {
        /// Path to the set JSON file.
        set: PathBuf,

        /// Also write the report rows to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Build a set interactively.
    Compose {
        /// Where to save the set.
        #[arg(short, long, default_value = "set.json")]
        out: PathBuf,
    },

    /// List catalog records with negative or non-numeric figures.
    ValidateCatalog,
}

impl Default for Command {
    fn default() -> Self {
        Command::ValidateCatalog
    }
}
