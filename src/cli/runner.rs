//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::output::WriteSummary;
use crate::pipeline::Pipeline;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run => self.run_pipeline().await,
            Commands::Catalog => self.run_catalog().await,
            Commands::Events => self.run_events().await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load the pipeline config from the -c flag
    fn load_config(&self) -> Result<PipelineConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -c flag)"))?;
        PipelineConfig::from_path(path)
    }

    async fn run_pipeline(&self) -> Result<()> {
        let start = Instant::now();
        let pipeline = Pipeline::new(self.load_config()?)?;
        let stats = pipeline.run().await?;

        print_summary("items", &stats.catalog.items);
        print_summary("attributes", &stats.catalog.attributes);
        print_summary("actors", &stats.events.actors);
        print_summary("time", &stats.events.time);
        print_summary("facts", &stats.events.facts);
        info!(elapsed = ?start.elapsed(), "pipeline run complete");
        Ok(())
    }

    async fn run_catalog(&self) -> Result<()> {
        let pipeline = Pipeline::new(self.load_config()?)?;
        let stats = pipeline.run_catalog().await?;
        print_summary("items", &stats.items);
        print_summary("attributes", &stats.attributes);
        Ok(())
    }

    async fn run_events(&self) -> Result<()> {
        let pipeline = Pipeline::new(self.load_config()?)?;
        let stats = pipeline.run_events().await?;
        print_summary("actors", &stats.actors);
        print_summary("time", &stats.time);
        print_summary("facts", &stats.facts);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        println!(
            "OK: {} -> {} (zone {})",
            config.input_url, config.output_url, config.timezone
        );
        Ok(())
    }
}

fn print_summary(table: &str, summary: &WriteSummary) {
    println!(
        "{table}: {} rows, {} files, {} partitions",
        summary.rows, summary.files, summary.partitions
    );
}
