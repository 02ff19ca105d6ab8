//! # Lineage CLI Module
//!
//! ## Available Commands
//!
//! - `convert` - Write the GEDCOM document for a table of people
//! - `status` - Show counts of the built family tree

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use lineage_core::LineageError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Lineage - tabular family records to GEDCOM
///
/// Reads one record per person (JSON array of objects keyed by column
/// header) and links parents, children and spouses into families.
#[derive(Parser, Debug)]
#[command(name = "lineage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a table of people into a GEDCOM document
    Convert {
        /// Path to the input records (JSON)
        input: PathBuf,

        /// Directory holding pictures named after each person's ID
        pictures: Option<PathBuf>,

        /// Submitter first name
        first_name: Option<String>,

        /// Submitter last name
        last_name: Option<String>,

        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show counts of the family tree built from the input
    Status {
        /// Path to the input records (JSON)
        input: PathBuf,

        /// Directory holding pictures named after each person's ID
        #[arg(short, long)]
        pictures: Option<PathBuf>,

        /// Output in JSON format (for programmatic access)
        #[arg(long)]
        json_mode: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), LineageError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Convert {
            input,
            pictures,
            first_name,
            last_name,
            output,
        } => {
            let submitter = config.resolve_submitter(first_name, last_name)?;
            let pictures = config.resolve_pictures(pictures);
            cmd_convert(&config, &input, pictures.as_deref(), &submitter, output.as_deref())
        }
        Commands::Status {
            input,
            pictures,
            json_mode,
        } => {
            let pictures = config.resolve_pictures(pictures);
            cmd_status(&config, &input, pictures.as_deref(), json_mode)
        }
    }
}
