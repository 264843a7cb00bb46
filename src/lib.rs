//! # lakemill
//!
//! A minimal, Rust-native batch pipeline that mills two semi-structured
//! record streams - an item catalog and an activity log - into a small
//! dimensional (star-schema) dataset of partitioned Parquet tables.
//!
//! ## Features
//!
//! - **Typed record parsing**: strict on key/join fields, null-propagating
//!   on everything else
//! - **Deterministic deduplication**: first occurrence in reader order wins
//! - **Pure time derivation**: explicit time zone, never the host's
//! - **Left-outer catalog join**: activity rows are never dropped for a
//!   missing catalog match
//! - **Partitioned Parquet output**: Hive-style layout, whole-or-partition
//!   overwrite, fail-clean staging
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lakemill::{Pipeline, PipelineConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = PipelineConfig::from_path("pipeline.yaml")?;
//!     let pipeline = Pipeline::new(config)?;
//!     let stats = pipeline.run().await?;
//!     println!("{} fact rows", stats.events.facts.rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Pipeline                               │
//! │   run() = catalog stage ──then──▶ event stage                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬──────────────────────────┐
//! │  Reader  │ Transform │     Table     │         Output           │
//! ├──────────┼───────────┼───────────────┼──────────────────────────┤
//! │ Glob     │ Dedup     │ Item, Attr    │ Partition split          │
//! │ JSON     │ Time      │ Actor, Time   │ Parquet                  │
//! │ JSONL    │ Join      │ Fact          │ Overwrite + staging      │
//! └──────────┴───────────┴───────────────┴──────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: document the table row fields before 1.0
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the pipeline
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pipeline configuration
pub mod config;

/// Data-access session and store handles
pub mod session;

/// Input record types
pub mod record;

/// Record source reading (globs, JSON, JSON Lines)
pub mod reader;

/// Dimensional table rows and Arrow schemas
pub mod table;

/// Transformation core (dedup, time derivation, join, projections)
pub mod transform;

/// Partitioned Parquet output
pub mod output;

/// Pipeline orchestration
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunStats};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
