//! Derived time columns

use crate::error::{Error, Result};
use crate::table::TimeRow;
use chrono::{Datelike, TimeZone, Timelike};
use chrono_tz::Tz;

/// Convert an epoch-milliseconds timestamp into its derived time columns.
///
/// Pure and stateless: the zone is an explicit parameter and the host
/// zone is never consulted. Day-of-week is ISO numbered, Monday=1 through
/// Sunday=7. Values outside the representable range are malformed.
pub fn derive_time(epoch_ms: i64, tz: Tz) -> Result<TimeRow> {
    let datetime = tz.timestamp_millis_opt(epoch_ms).single().ok_or_else(|| {
        Error::malformed(
            "timestamp_epoch_ms",
            format!("not a representable instant: {epoch_ms}"),
        )
    })?;

    Ok(TimeRow {
        start_time: epoch_ms,
        hour: datetime.hour() as i32,
        day: datetime.day() as i32,
        month: datetime.month() as i32,
        year: datetime.year(),
        day_of_week: datetime.weekday().number_from_monday() as i32,
    })
}
