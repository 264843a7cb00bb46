//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lakemill batch pipeline CLI
#[derive(Parser, Debug)]
#[command(name = "lakemill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: catalog stage, then event stage
    Run,

    /// Run only the catalog stage (item and attribute tables)
    Catalog,

    /// Run only the event stage (actor, time and fact tables; re-reads
    /// catalog records for the join)
    Events,

    /// Validate the pipeline configuration without running anything
    Validate,
}
