//! Event transformer
//!
//! Produces the actor and time dimension rows and the fact rows from the
//! activity record set. Everything derives from the play-filtered subset;
//! the fact projection left-outer joins back to the catalog records.

use super::{dedup_by_key, derive_time};
use crate::error::{Error, Result};
use crate::record::{CatalogRecord, EventRecord};
use crate::table::{ActorRow, FactRow, TimeRow};
use chrono_tz::Tz;
use std::collections::HashMap;

/// Join key: exact equality on (creator_name, item_title, duration).
/// Duration compares bit-exact; the sources serialize the same float both
/// sides when they agree at all.
type JoinKey<'a> = (&'a str, &'a str, u64);

fn join_key<'a>(creator: &'a str, title: &'a str, duration: f64) -> JoinKey<'a> {
    (creator, title, duration.to_bits())
}

/// Filter to qualifying play events.
///
/// A qualifying row without an actor_id has no usable key for any
/// downstream table and fails the run; anonymous rows outside the filter
/// are dropped silently.
pub fn qualifying(events: &[EventRecord]) -> Result<Vec<&EventRecord>> {
    events
        .iter()
        .filter(|e| e.is_qualifying())
        .map(|e| {
            if e.actor_id.is_none() {
                return Err(Error::malformed(
                    "actor_id",
                    format!(
                        "qualifying event at ts {} has no actor_id",
                        e.timestamp_epoch_ms
                    ),
                ));
            }
            Ok(e)
        })
        .collect()
}

/// One row per distinct actor_id among qualifying events
pub fn actor_rows(plays: &[&EventRecord]) -> Vec<ActorRow> {
    dedup_by_key(plays.iter().copied(), |e| e.actor_id.clone())
        .into_iter()
        .map(|e| ActorRow {
            actor_id: e.actor_id.clone().unwrap_or_default(),
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            gender: e.gender.clone(),
            subscription_level: e.subscription_level.clone(),
        })
        .collect()
}

/// One row per distinct timestamp among qualifying events
pub fn time_rows(plays: &[&EventRecord], tz: Tz) -> Result<Vec<TimeRow>> {
    dedup_by_key(plays.iter().copied(), |e| e.timestamp_epoch_ms)
        .into_iter()
        .map(|e| derive_time(e.timestamp_epoch_ms, tz))
        .collect()
}

/// One row per qualifying event, left-outer joined to the catalog.
///
/// Every play survives; a play whose join triple matches no catalog
/// record (or that lacks a join field) carries null item_id/parent_id.
pub fn fact_rows(
    plays: &[&EventRecord],
    catalog: &[CatalogRecord],
    tz: Tz,
) -> Result<Vec<FactRow>> {
    // Duplicate catalog join keys resolve to the first record in reader
    // order, matching the dedup retention policy.
    let mut by_key: HashMap<JoinKey, &CatalogRecord> = HashMap::with_capacity(catalog.len());
    for record in catalog {
        by_key
            .entry(join_key(&record.creator_name, &record.title, record.duration))
            .or_insert(record);
    }

    plays
        .iter()
        .map(|play| {
            let matched = match (&play.creator_name, &play.item_title, play.duration) {
                (Some(creator), Some(title), Some(duration)) => {
                    by_key.get(&join_key(creator, title, duration)).copied()
                }
                _ => None,
            };

            let time = derive_time(play.timestamp_epoch_ms, tz)?;
            Ok(FactRow {
                actor_id: play.actor_id.clone().unwrap_or_default(),
                subscription_level: play.subscription_level.clone(),
                item_id: matched.map(|r| r.item_id.clone()),
                parent_id: matched.map(|r| r.parent_id.clone()),
                session_id: play.session_id,
                location: play.location.clone(),
                user_agent: play.user_agent.clone(),
                year: time.year,
                month: time.month,
            })
        })
        .collect()
}
