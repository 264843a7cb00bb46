//! Dimensional table rows and their Arrow schemas
//!
//! One row struct per output table, each with a fixed Arrow schema and a
//! `RecordBatch` constructor. Schemas are static: the pipeline produces
//! the same five shapes every run.

use crate::error::Result;
use arrow::array::{
    ArrayRef, Float64Array, Int32Array, Int64Array, StringArray, TimestampMillisecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Timestamp columns are stored as epoch milliseconds in UTC
fn timestamp_field(name: &str) -> Field {
    Field::new(
        name,
        DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
        false,
    )
}

fn batch(schema: &SchemaRef, columns: Vec<ArrayRef>) -> Result<RecordBatch> {
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

// ============================================================================
// Item Table
// ============================================================================

/// One row per distinct item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub item_id: String,
    pub title: String,
    pub parent_id: String,
    pub year: i32,
    pub duration: f64,
}

impl ItemRow {
    /// Arrow schema of the item table
    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("item_id", DataType::Utf8, false),
            Field::new("title", DataType::Utf8, false),
            Field::new("parent_id", DataType::Utf8, false),
            Field::new("year", DataType::Int32, false),
            Field::new("duration", DataType::Float64, false),
        ]))
    }

    /// Build a record batch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let schema = Self::schema();
        batch(
            &schema,
            vec![
                Arc::new(StringArray::from_iter_values(
                    rows.iter().map(|r| r.item_id.as_str()),
                )),
                Arc::new(StringArray::from_iter_values(
                    rows.iter().map(|r| r.title.as_str()),
                )),
                Arc::new(StringArray::from_iter_values(
                    rows.iter().map(|r| r.parent_id.as_str()),
                )),
                Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
                Arc::new(Float64Array::from_iter_values(
                    rows.iter().map(|r| r.duration),
                )),
            ],
        )
    }
}

// ============================================================================
// Attribute Table
// ============================================================================

/// One row per distinct creator/publisher
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow {
    pub parent_id: String,
    pub creator_name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AttributeRow {
    /// Arrow schema of the attribute table
    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("parent_id", DataType::Utf8, false),
            Field::new("creator_name", DataType::Utf8, false),
            Field::new("location", DataType::Utf8, true),
            Field::new("latitude", DataType::Float64, true),
            Field::new("longitude", DataType::Float64, true),
        ]))
    }

    /// Build a record batch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let schema = Self::schema();
        batch(
            &schema,
            vec![
                Arc::new(StringArray::from_iter_values(
                    rows.iter().map(|r| r.parent_id.as_str()),
                )),
                Arc::new(StringArray::from_iter_values(
                    rows.iter().map(|r| r.creator_name.as_str()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.location.as_deref()),
                )),
                Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.latitude))),
                Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.longitude))),
            ],
        )
    }
}

// ============================================================================
// Actor Table
// ============================================================================

/// One row per distinct actor seen in qualifying events
#[derive(Debug, Clone, PartialEq)]
pub struct ActorRow {
    pub actor_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub subscription_level: Option<String>,
}

impl ActorRow {
    /// Arrow schema of the actor table
    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("actor_id", DataType::Utf8, false),
            Field::new("first_name", DataType::Utf8, true),
            Field::new("last_name", DataType::Utf8, true),
            Field::new("gender", DataType::Utf8, true),
            Field::new("subscription_level", DataType::Utf8, true),
        ]))
    }

    /// Build a record batch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let schema = Self::schema();
        batch(
            &schema,
            vec![
                Arc::new(StringArray::from_iter_values(
                    rows.iter().map(|r| r.actor_id.as_str()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.first_name.as_deref()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.last_name.as_deref()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.gender.as_deref()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.subscription_level.as_deref()),
                )),
            ],
        )
    }
}

// ============================================================================
// Time Table
// ============================================================================

/// One row per distinct event timestamp; every column besides
/// `start_time` is a pure function of it and the configured zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRow {
    /// Epoch milliseconds
    pub start_time: i64,
    pub hour: i32,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    /// ISO day of week, Monday=1 through Sunday=7
    pub day_of_week: i32,
}

impl TimeRow {
    /// Arrow schema of the time table
    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            timestamp_field("start_time"),
            Field::new("hour", DataType::Int32, false),
            Field::new("day", DataType::Int32, false),
            Field::new("month", DataType::Int32, false),
            Field::new("year", DataType::Int32, false),
            Field::new("day_of_week", DataType::Int32, false),
        ]))
    }

    /// Build a record batch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let schema = Self::schema();
        batch(
            &schema,
            vec![
                Arc::new(
                    TimestampMillisecondArray::from_iter_values(
                        rows.iter().map(|r| r.start_time),
                    )
                    .with_timezone("UTC"),
                ),
                Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.hour))),
                Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.day))),
                Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.month))),
                Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
                Arc::new(Int32Array::from_iter_values(
                    rows.iter().map(|r| r.day_of_week),
                )),
            ],
        )
    }
}

// ============================================================================
// Fact Table
// ============================================================================

/// One row per qualifying activity event. `item_id`/`parent_id` are null
/// when the event matched no catalog record; the row is kept regardless.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    pub actor_id: String,
    pub subscription_level: Option<String>,
    pub item_id: Option<String>,
    pub parent_id: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    /// Partition key, derived from the event timestamp
    pub year: i32,
    /// Partition key, derived from the event timestamp
    pub month: i32,
}

impl FactRow {
    /// Arrow schema of the fact table
    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("actor_id", DataType::Utf8, false),
            Field::new("subscription_level", DataType::Utf8, true),
            Field::new("item_id", DataType::Utf8, true),
            Field::new("parent_id", DataType::Utf8, true),
            Field::new("session_id", DataType::Int64, true),
            Field::new("location", DataType::Utf8, true),
            Field::new("user_agent", DataType::Utf8, true),
            Field::new("year", DataType::Int32, false),
            Field::new("month", DataType::Int32, false),
        ]))
    }

    /// Build a record batch from rows
    pub fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        let schema = Self::schema();
        batch(
            &schema,
            vec![
                Arc::new(StringArray::from_iter_values(
                    rows.iter().map(|r| r.actor_id.as_str()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.subscription_level.as_deref()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.item_id.as_deref()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.parent_id.as_deref()),
                )),
                Arc::new(Int64Array::from_iter(rows.iter().map(|r| r.session_id))),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.location.as_deref()),
                )),
                Arc::new(StringArray::from_iter(
                    rows.iter().map(|r| r.user_agent.as_deref()),
                )),
                Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
                Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.month))),
            ],
        )
    }
}
