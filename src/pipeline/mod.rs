//! Pipeline orchestration
//!
//! Sequences the two transformer stages: the catalog stage materializes
//! the item and attribute tables, then the event stage re-reads the
//! catalog records for its join and materializes the actor, time and
//! fact tables. All five tables go through the partitioned writer.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::output::{PartitionedWriter, WriteSummary};
use crate::reader::SourceReader;
use crate::session::Session;
use crate::table::{ActorRow, AttributeRow, FactRow, ItemRow, TimeRow};
use crate::transform;
use crate::types::Table;
use tracing::info;

/// Write summaries of the catalog stage
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogStats {
    pub items: WriteSummary,
    pub attributes: WriteSummary,
}

/// Write summaries of the event stage
#[derive(Debug, Clone, Copy, Default)]
pub struct EventStats {
    pub actors: WriteSummary,
    pub time: WriteSummary,
    pub facts: WriteSummary,
}

/// Write summaries of a full run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    pub catalog: CatalogStats,
    pub events: EventStats,
}

/// A configured pipeline bound to a session
pub struct Pipeline {
    config: PipelineConfig,
    session: Session,
    writer: PartitionedWriter,
}

impl Pipeline {
    /// Build a pipeline, establishing its session from config
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let session = Session::connect(&config)?;
        Ok(Self::with_session(config, session))
    }

    /// Build a pipeline over an existing session
    pub fn with_session(config: PipelineConfig, session: Session) -> Self {
        let writer = PartitionedWriter::new(session.output().clone());
        Self {
            config,
            session,
            writer,
        }
    }

    /// Run the full pipeline: catalog stage, then event stage
    pub async fn run(&self) -> Result<RunStats> {
        let catalog = self.run_catalog().await?;
        let events = self.run_events().await?;
        Ok(RunStats { catalog, events })
    }

    /// Catalog stage: item and attribute tables
    pub async fn run_catalog(&self) -> Result<CatalogStats> {
        let records = self.read_catalog().await?;
        info!(records = records.len(), "catalog stage: sources read");

        let items = transform::item_rows(&records);
        let items_summary = self
            .writer
            .write(
                &ItemRow::to_batch(&items)?,
                Table::Items.path(),
                Table::Items.partition_columns(),
            )
            .await?;
        info!(rows = items_summary.rows, files = items_summary.files, "wrote items table");

        let attributes = transform::attribute_rows(&records);
        let attributes_summary = self
            .writer
            .write(
                &AttributeRow::to_batch(&attributes)?,
                Table::Attributes.path(),
                Table::Attributes.partition_columns(),
            )
            .await?;
        info!(rows = attributes_summary.rows, "wrote attributes table");

        Ok(CatalogStats {
            items: items_summary,
            attributes: attributes_summary,
        })
    }

    /// Event stage: actor, time and fact tables
    pub async fn run_events(&self) -> Result<EventStats> {
        let reader = SourceReader::new(self.session.input(), &self.config.events_pattern)?;
        let events = reader.read_events().await?;
        // The join needs the same record set the catalog stage saw
        let catalog = self.read_catalog().await?;
        info!(
            events = events.len(),
            catalog = catalog.len(),
            "event stage: sources read"
        );

        let tz = self.session.tz();
        let plays = transform::qualifying(&events)?;

        let actors = transform::actor_rows(&plays);
        let actors_summary = self
            .writer
            .write(
                &ActorRow::to_batch(&actors)?,
                Table::Actors.path(),
                Table::Actors.partition_columns(),
            )
            .await?;
        info!(rows = actors_summary.rows, "wrote actors table");

        let time = transform::time_rows(&plays, tz)?;
        let time_summary = self
            .writer
            .write(
                &TimeRow::to_batch(&time)?,
                Table::Time.path(),
                Table::Time.partition_columns(),
            )
            .await?;
        info!(
            rows = time_summary.rows,
            partitions = time_summary.partitions,
            "wrote time table"
        );

        let facts = transform::fact_rows(&plays, &catalog, tz)?;
        let facts_summary = self
            .writer
            .write(
                &FactRow::to_batch(&facts)?,
                Table::Facts.path(),
                Table::Facts.partition_columns(),
            )
            .await?;
        info!(
            rows = facts_summary.rows,
            partitions = facts_summary.partitions,
            "wrote facts table"
        );

        Ok(EventStats {
            actors: actors_summary,
            time: time_summary,
            facts: facts_summary,
        })
    }

    async fn read_catalog(&self) -> Result<Vec<crate::record::CatalogRecord>> {
        SourceReader::new(self.session.input(), &self.config.catalog_pattern)?
            .read_catalog()
            .await
    }
}
