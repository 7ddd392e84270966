// dqlens/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dqlens")]
#[command(about = "Inspect data quality metrics of your tables from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Explicit config file (default: dqlens.yaml in the project directory)
    #[arg(long, global = true, env = "DQLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project directory searched for dqlens.yaml
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📚 Lists the tables known to the catalog
    Tables,

    /// 📋 Prints the columns of one or more tables
    Columns {
        /// Table name (repeatable)
        #[arg(long = "table", short = 't', required = true)]
        tables: Vec<String>,
    },

    /// 📊 Fetches and renders the quality report of the selected tables
    Analyze {
        /// Table to select (repeatable)
        #[arg(long = "table", short = 't')]
        tables: Vec<String>,

        /// Select every table of the catalog
        #[arg(long, conflicts_with = "tables")]
        all: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// 🐚 Interactive session (list, toggle, fetch, show...)
    Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
