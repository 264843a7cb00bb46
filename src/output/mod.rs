//! Output module
//!
//! Partition splitting and the shared partitioned Parquet sink.
//!
//! # Overview
//!
//! This module provides:
//! - Hive-style partition splitting of record batches
//! - Parquet serialization
//! - `PartitionedWriter` - overwrite-semantics writes to object storage

mod partition;
mod writer;

pub use partition::{split_partitions, PartitionSlice, NULL_PARTITION};
pub use writer::{batch_to_parquet_bytes, ParquetWriterConfig, PartitionedWriter, WriteSummary};
