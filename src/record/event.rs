//! Activity record parsing

use super::{as_object, opt_f64, opt_i64, opt_id, opt_str, req_i64, req_str};
use crate::error::Result;
use crate::types::JsonValue;

/// A single logged user action, sourced once per run.
///
/// `page` and the timestamp are required on every row. `actor_id` may be
/// absent on anonymous rows; rows that qualify for the play filter are
/// required to carry one before they reach any table (the transformer
/// enforces that). Join fields are optional here: a row lacking one never
/// matches the catalog but is still preserved in the fact stream.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Acting user key; absent on anonymous rows
    pub actor_id: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Gender
    pub gender: Option<String>,
    /// Subscription level at event time
    pub subscription_level: Option<String>,
    /// Event timestamp, milliseconds since epoch
    pub timestamp_epoch_ms: i64,
    /// Action type; only "NextSong" rows feed the tables
    pub page: String,
    /// Played item title (join field)
    pub item_title: Option<String>,
    /// Played item creator (join field)
    pub creator_name: Option<String>,
    /// Played duration in seconds (join field)
    pub duration: Option<f64>,
    /// Session identifier
    pub session_id: Option<i64>,
    /// Free-text user location
    pub location: Option<String>,
    /// Device user agent
    pub user_agent: Option<String>,
}

impl EventRecord {
    /// Parse an activity record from a decoded JSON value.
    ///
    /// Accepts both the canonical field names and the legacy wire names
    /// (`userId`, `ts`, `song`, `artist`, `length`, ...).
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let obj = as_object(value, "activity record")?;

        Ok(Self {
            actor_id: opt_id(obj, &["actor_id", "userId"]),
            first_name: opt_str(obj, &["first_name", "firstName"]),
            last_name: opt_str(obj, &["last_name", "lastName"]),
            gender: opt_str(obj, &["gender"]),
            subscription_level: opt_str(obj, &["subscription_level", "level"]),
            timestamp_epoch_ms: req_i64(obj, &["timestamp_epoch_ms", "ts"])?,
            page: req_str(obj, &["page"])?,
            item_title: opt_str(obj, &["item_title", "song"]),
            creator_name: opt_str(obj, &["creator_name", "artist"]),
            duration: opt_f64(obj, &["duration", "length"]),
            session_id: opt_i64(obj, &["session_id", "sessionId"]),
            location: opt_str(obj, &["location"]),
            user_agent: opt_str(obj, &["user_agent", "userAgent"]),
        })
    }

    /// Whether this row passes the play filter
    pub fn is_qualifying(&self) -> bool {
        self.page == super::QUALIFYING_PAGE
    }
}
