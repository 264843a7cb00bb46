//! Transformation core
//!
//! Pure functions from input record sets to table rows: deduplication,
//! derived time columns, the catalog/activity join, and projections.
//! Nothing here touches storage; the pipeline wires these to the reader
//! and the partitioned writer.

mod catalog;
mod dedup;
mod event;
mod time;

pub use catalog::{attribute_rows, item_rows};
pub use dedup::dedup_by_key;
pub use event::{actor_rows, fact_rows, qualifying, time_rows};
pub use time::derive_time;

#[cfg(test)]
mod tests;
