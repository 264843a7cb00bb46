//! Catalog transformer
//!
//! Produces the item and attribute dimension rows from the catalog
//! record set: one dedup pass per key, then a projection.

use super::dedup_by_key;
use crate::record::CatalogRecord;
use crate::table::{AttributeRow, ItemRow};

/// One row per distinct item_id, first occurrence retained
pub fn item_rows(records: &[CatalogRecord]) -> Vec<ItemRow> {
    dedup_by_key(records, |r| r.item_id.clone())
        .into_iter()
        .map(|r| ItemRow {
            item_id: r.item_id.clone(),
            title: r.title.clone(),
            parent_id: r.parent_id.clone(),
            year: r.year,
            duration: r.duration,
        })
        .collect()
}

/// One row per distinct parent_id, first occurrence retained
pub fn attribute_rows(records: &[CatalogRecord]) -> Vec<AttributeRow> {
    dedup_by_key(records, |r| r.parent_id.clone())
        .into_iter()
        .map(|r| AttributeRow {
            parent_id: r.parent_id.clone(),
            creator_name: r.creator_name.clone(),
            location: r.location.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
        })
        .collect()
}
