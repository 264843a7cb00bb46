//! Partitioned Parquet writer
//!
//! The shared sink both transformers write through. A write fully
//! replaces its destination: the whole table when unpartitioned, or
//! exactly the partition subtrees implied by the batch's distinct
//! partition-key combinations. Never appends, never merges.
//!
//! Fail-clean strategy: every Parquet file is serialized in memory and
//! staged under `_staging/` before any existing object is touched; only
//! after all staging puts succeed are old objects deleted and staged
//! files renamed into place. An error before publish leaves the
//! destination in its pre-run state.

use super::partition::{split_partitions, PartitionSlice};
use crate::error::{Error, Result};
use crate::session::StoreHandle;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::ObjectStore;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::debug;

/// Staging directory name under each table destination
const STAGING_DIR: &str = "_staging";

/// Deterministic data file name; identical reruns produce identical trees
const DATA_FILE: &str = "part-00000.parquet";

// ============================================================================
// Writer Configuration
// ============================================================================

/// Configuration for Parquet serialization
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024, // 1M rows
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression algorithm
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Serialize a record batch to Parquet bytes
pub fn batch_to_parquet_bytes(batch: &RecordBatch, config: &ParquetWriterConfig) -> Result<Bytes> {
    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(
        &mut buffer,
        batch.schema(),
        Some(config.build_properties()),
    )?;
    writer.write(batch)?;
    writer.close()?;
    Ok(Bytes::from(buffer))
}

// ============================================================================
// Write Summary
// ============================================================================

/// What a completed write replaced at its destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Data files written
    pub files: usize,
    /// Rows written across all files
    pub rows: usize,
    /// Partition directories replaced (1 for unpartitioned tables)
    pub partitions: usize,
}

// ============================================================================
// Partitioned Writer
// ============================================================================

/// Writes tables to Parquet at an object-store destination with
/// overwrite semantics and an explicit ordered list of partition columns
#[derive(Debug, Clone)]
pub struct PartitionedWriter {
    handle: StoreHandle,
    config: ParquetWriterConfig,
}

impl PartitionedWriter {
    /// Create a writer over the given output store
    pub fn new(handle: StoreHandle) -> Self {
        Self {
            handle,
            config: ParquetWriterConfig::default(),
        }
    }

    /// Set the Parquet serialization config
    #[must_use]
    pub fn with_config(mut self, config: ParquetWriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Write a batch to `destination`, replacing prior data there.
    ///
    /// `partition_columns` is ordered; empty writes the batch as a single
    /// logical unit. An empty partitioned batch implies no partitions and
    /// leaves the destination untouched.
    pub async fn write(
        &self,
        batch: &RecordBatch,
        destination: &str,
        partition_columns: &[&str],
    ) -> Result<WriteSummary> {
        let slices = split_partitions(batch, partition_columns)?;
        if !partition_columns.is_empty() && batch.num_rows() == 0 {
            return Ok(WriteSummary::default());
        }

        // Serialize everything before the store is touched
        let mut staged: Vec<(String, Bytes, usize)> = Vec::with_capacity(slices.len());
        for PartitionSlice { path, batch } in &slices {
            let bytes = batch_to_parquet_bytes(batch, &self.config)?;
            staged.push((path.clone(), bytes, batch.num_rows()));
        }

        let staging_root = join(destination, STAGING_DIR);

        // Clear any stale staging tree from an earlier failed run
        self.delete_prefix(&staging_root, None).await?;

        // Stage
        let mut staged_paths = Vec::with_capacity(staged.len());
        for (partition, bytes, _) in &staged {
            let staged_path = self
                .handle
                .resolve(&join(&join(&staging_root, partition), DATA_FILE));
            let result = self
                .handle
                .store()
                .put(&staged_path, bytes.clone().into())
                .await;
            if let Err(e) = result {
                self.rollback_staging(&staging_root).await;
                return Err(Error::write(format!(
                    "staging {staged_path} failed: {e}"
                )));
            }
            staged_paths.push(staged_path);
        }

        // Publish: replace each affected partition (or the whole table)
        for (index, (partition, _, _)) in staged.iter().enumerate() {
            let final_dir = join(destination, partition);
            let exclude = if partition.is_empty() {
                // Unpartitioned: the staged files live under the
                // destination itself, keep them out of the sweep
                Some(staging_root.as_str())
            } else {
                None
            };
            self.delete_prefix(&final_dir, exclude).await?;

            let final_path = self.handle.resolve(&join(&final_dir, DATA_FILE));
            self.handle
                .store()
                .rename(&staged_paths[index], &final_path)
                .await
                .map_err(|e| Error::write(format!("publishing {final_path} failed: {e}")))?;
            debug!(path = %final_path, "published partition");
        }

        // Drop the now-empty staging tree
        self.delete_prefix(&staging_root, None).await?;

        let summary = WriteSummary {
            files: staged.len(),
            rows: staged.iter().map(|(_, _, rows)| rows).sum(),
            partitions: staged.len(),
        };
        Ok(summary)
    }

    /// Delete every object under `prefix`, skipping `exclude` when given
    async fn delete_prefix(&self, prefix: &str, exclude: Option<&str>) -> Result<()> {
        let root = self.handle.resolve(prefix);
        let metas: Vec<_> = self
            .handle
            .store()
            .list(Some(&root))
            .try_collect()
            .await
            .map_err(|e| Error::write(format!("listing {root} failed: {e}")))?;

        let excluded = exclude.map(|p| self.handle.resolve(p).to_string());
        for meta in metas {
            if let Some(excluded) = &excluded {
                if meta.location.as_ref().starts_with(excluded.as_str()) {
                    continue;
                }
            }
            self.handle
                .store()
                .delete(&meta.location)
                .await
                .map_err(|e| Error::write(format!("deleting {} failed: {e}", meta.location)))?;
        }
        Ok(())
    }

    /// Best-effort cleanup after a failed staging put; the destination
    /// itself has not been modified at this point
    async fn rollback_staging(&self, staging_root: &str) {
        if let Err(e) = self.delete_prefix(staging_root, None).await {
            debug!(error = %e, "staging cleanup failed; next run clears it");
        }
    }
}

fn join(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => rest.to_string(),
        (false, false) => format!("{}/{rest}", base.trim_end_matches('/')),
    }
}
