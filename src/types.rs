//! Common types used throughout lakemill
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Table Identity
// ============================================================================

/// The five tables produced by a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// One row per distinct item
    Items,
    /// One row per distinct item publisher/creator
    Attributes,
    /// One row per distinct actor seen in qualifying events
    Actors,
    /// One row per distinct event timestamp
    Time,
    /// One row per qualifying event
    Facts,
}

impl Table {
    /// Relative destination of this table under the output root
    pub fn path(self) -> &'static str {
        match self {
            Table::Items => "catalog/items",
            Table::Attributes => "catalog/attributes",
            Table::Actors => "activity/actors",
            Table::Time => "activity/time",
            Table::Facts => "activity/facts",
        }
    }

    /// Partition columns for this table, in order. Empty means the table
    /// is written as a single logical unit.
    pub fn partition_columns(self) -> &'static [&'static str] {
        match self {
            Table::Items => &["year", "parent_id"],
            Table::Time | Table::Facts => &["year", "month"],
            Table::Attributes | Table::Actors => &[],
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Table::Items => "items",
            Table::Attributes => "attributes",
            Table::Actors => "actors",
            Table::Time => "time",
            Table::Facts => "facts",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
