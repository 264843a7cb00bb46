//! Partition splitting
//!
//! Splits a record batch into Hive-style partition slices keyed by an
//! explicit ordered list of partition columns. Partition values are
//! encoded into the path and the columns are dropped from the slice data,
//! so a partition directory fully determines those column values.

use crate::error::{Error, Result};
use arrow::array::{Array, Int32Array, Int64Array, StringArray, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Rendered value for a null partition key
pub const NULL_PARTITION: &str = "__NULL__";

/// One partition of a batch: the relative directory it lands in and the
/// rows that belong to it, partition columns removed
#[derive(Debug, Clone)]
pub struct PartitionSlice {
    /// Relative directory, e.g. `year=2018/month=11`; empty when the
    /// table is unpartitioned
    pub path: String,
    /// The slice data
    pub batch: RecordBatch,
}

/// Split a batch by the given partition columns.
///
/// With no partition columns the whole batch is a single slice. Slices
/// come out sorted by path, so write order is deterministic.
pub fn split_partitions(batch: &RecordBatch, columns: &[&str]) -> Result<Vec<PartitionSlice>> {
    if columns.is_empty() {
        return Ok(vec![PartitionSlice {
            path: String::new(),
            batch: batch.clone(),
        }]);
    }

    let schema = batch.schema();
    let mut column_indices = Vec::with_capacity(columns.len());
    for name in columns {
        let (idx, field) = schema.column_with_name(name).ok_or_else(|| {
            Error::write(format!("partition column '{name}' not in table schema"))
        })?;
        match field.data_type() {
            DataType::Utf8 | DataType::Int32 | DataType::Int64 => column_indices.push(idx),
            other => {
                return Err(Error::write(format!(
                    "partition column '{name}' has unsupported type {other}"
                )))
            }
        }
    }

    // Group row indices by their rendered partition path
    let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for row in 0..batch.num_rows() {
        let mut segments = Vec::with_capacity(columns.len());
        for (name, &idx) in columns.iter().zip(&column_indices) {
            let value = encode_value(batch.column(idx).as_ref(), row)?;
            segments.push(format!("{name}={value}"));
        }
        groups
            .entry(segments.join("/"))
            .or_default()
            .push(row as u32);
    }

    // Data schema: everything except the partition columns
    let kept: Vec<usize> = (0..schema.fields().len())
        .filter(|idx| !column_indices.contains(idx))
        .collect();
    let data_schema = Arc::new(Schema::new(
        kept.iter()
            .map(|&idx| schema.field(idx).clone())
            .collect::<Vec<_>>(),
    ));

    let mut slices = Vec::with_capacity(groups.len());
    for (path, rows) in groups {
        let indices = UInt32Array::from(rows);
        let arrays = kept
            .iter()
            .map(|&idx| Ok(take(batch.column(idx).as_ref(), &indices, None)?))
            .collect::<Result<Vec<_>>>()?;
        slices.push(PartitionSlice {
            path,
            batch: RecordBatch::try_new(Arc::clone(&data_schema), arrays)?,
        });
    }
    Ok(slices)
}

/// Render one partition value as a path segment
fn encode_value(array: &dyn Array, row: usize) -> Result<String> {
    if array.is_null(row) {
        return Ok(NULL_PARTITION.to_string());
    }

    match array.data_type() {
        DataType::Utf8 => {
            let values = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| Error::write("failed to downcast partition column".to_string()))?;
            Ok(sanitize(values.value(row)))
        }
        DataType::Int32 => {
            let values = array
                .as_any()
                .downcast_ref::<Int32Array>()
                .ok_or_else(|| Error::write("failed to downcast partition column".to_string()))?;
            Ok(values.value(row).to_string())
        }
        DataType::Int64 => {
            let values = array
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| Error::write("failed to downcast partition column".to_string()))?;
            Ok(values.value(row).to_string())
        }
        other => Err(Error::write(format!(
            "unsupported partition value type {other}"
        ))),
    }
}

/// Keep partition path segments filesystem- and URL-safe
fn sanitize(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        NULL_PARTITION.to_string()
    } else {
        cleaned
    }
}
