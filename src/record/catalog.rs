//! Catalog record parsing

use super::{as_object, opt_f64, opt_i64, opt_str, req_f64, req_str};
use crate::error::Result;
use crate::types::JsonValue;

/// A description of a single distributable item, sourced once per run.
///
/// `item_id`, `title`, `creator_name` and `duration` are key/join fields
/// and must be present; the remaining fields null-propagate when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    /// Unique item key
    pub item_id: String,
    /// Item title (join field)
    pub title: String,
    /// Creator/publisher reference
    pub parent_id: String,
    /// Release year, 0 when unknown
    pub year: i32,
    /// Duration in seconds (join field)
    pub duration: f64,
    /// Creator display name (join field)
    pub creator_name: String,
    /// Free-text creator location
    pub location: Option<String>,
    /// Creator latitude
    pub latitude: Option<f64>,
    /// Creator longitude
    pub longitude: Option<f64>,
}

impl CatalogRecord {
    /// Parse a catalog record from a decoded JSON value.
    ///
    /// Accepts both the canonical field names and the legacy wire names
    /// (`song_id`, `artist_id`, `artist_name`, ...).
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let obj = as_object(value, "catalog record")?;

        Ok(Self {
            item_id: req_str(obj, &["item_id", "song_id"])?,
            title: req_str(obj, &["title"])?,
            parent_id: req_str(obj, &["parent_id", "artist_id"])?,
            year: opt_i64(obj, &["year"]).unwrap_or(0) as i32,
            duration: req_f64(obj, &["duration"])?,
            creator_name: req_str(obj, &["creator_name", "artist_name"])?,
            location: opt_str(obj, &["location", "artist_location"]),
            latitude: opt_f64(obj, &["latitude", "artist_latitude"]),
            longitude: opt_f64(obj, &["longitude", "artist_longitude"]),
        })
    }
}
