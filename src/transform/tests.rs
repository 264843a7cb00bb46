//! Tests for the transformation core

use super::*;
use crate::record::{CatalogRecord, EventRecord};
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn catalog_record(item_id: &str, title: &str, creator: &str, duration: f64) -> CatalogRecord {
    CatalogRecord {
        item_id: item_id.to_string(),
        title: title.to_string(),
        parent_id: format!("P-{item_id}"),
        year: 2018,
        duration,
        creator_name: creator.to_string(),
        location: None,
        latitude: None,
        longitude: None,
    }
}

fn play(actor_id: &str, ts: i64) -> EventRecord {
    EventRecord {
        actor_id: Some(actor_id.to_string()),
        first_name: None,
        last_name: None,
        gender: None,
        subscription_level: Some("free".to_string()),
        timestamp_epoch_ms: ts,
        page: "NextSong".to_string(),
        item_title: None,
        creator_name: None,
        duration: None,
        session_id: Some(1),
        location: None,
        user_agent: None,
    }
}

fn play_of(actor_id: &str, ts: i64, creator: &str, title: &str, duration: f64) -> EventRecord {
    EventRecord {
        item_title: Some(title.to_string()),
        creator_name: Some(creator.to_string()),
        duration: Some(duration),
        ..play(actor_id, ts)
    }
}

// ============================================================================
// Dedup Tests
// ============================================================================

#[test]
fn test_dedup_first_occurrence_wins() {
    let items = vec![("a", 1), ("b", 2), ("a", 3)];
    let kept = dedup_by_key(items, |(k, _)| k.to_string());
    assert_eq!(kept, vec![("a", 1), ("b", 2)]);
}

#[test]
fn test_dedup_output_sorted_by_key() {
    let items = vec![("c", 1), ("a", 2), ("b", 3)];
    let kept = dedup_by_key(items, |(k, _)| k.to_string());
    assert_eq!(kept, vec![("a", 2), ("b", 3), ("c", 1)]);
}

#[test]
fn test_dedup_empty() {
    let kept = dedup_by_key(Vec::<(&str, i32)>::new(), |(k, _)| k.to_string());
    assert!(kept.is_empty());
}

// ============================================================================
// Time Derivation Tests
// ============================================================================

#[test]
fn test_derive_time_utc() {
    // 2018-11-01T21:01:46.796Z, a Thursday
    let row = derive_time(1_541_106_106_796, chrono_tz::UTC).unwrap();
    assert_eq!(row.start_time, 1_541_106_106_796);
    assert_eq!(row.year, 2018);
    assert_eq!(row.month, 11);
    assert_eq!(row.day, 1);
    assert_eq!(row.hour, 21);
    assert_eq!(row.day_of_week, 4);
}

#[test]
fn test_derive_time_injected_zone() {
    // Same instant in New York (EDT, UTC-4 on that date)
    let tz: Tz = "America/New_York".parse().unwrap();
    let row = derive_time(1_541_106_106_796, tz).unwrap();
    assert_eq!(row.hour, 17);
    assert_eq!(row.day, 1);
    assert_eq!(row.month, 11);
}

#[test_case(0, 1970, 1, 1, 0, 4; "epoch start, a thursday")]
#[test_case(1000, 1970, 1, 1, 0, 4; "one second in")]
#[test_case(946_684_800_000, 2000, 1, 1, 0, 6; "y2k, a saturday")]
fn test_derive_time_cases(ms: i64, year: i32, month: i32, day: i32, hour: i32, dow: i32) {
    let row = derive_time(ms, chrono_tz::UTC).unwrap();
    assert_eq!((row.year, row.month, row.day), (year, month, day));
    assert_eq!(row.hour, hour);
    assert_eq!(row.day_of_week, dow);
}

#[test]
fn test_derive_time_is_pure() {
    let a = derive_time(1_541_106_106_796, chrono_tz::UTC).unwrap();
    let b = derive_time(1_541_106_106_796, chrono_tz::UTC).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Catalog Transformer Tests
// ============================================================================

#[test]
fn test_item_rows_dedup_by_item_id() {
    let records = vec![
        catalog_record("S2", "B", "Y", 2.0),
        catalog_record("S1", "A", "X", 1.0),
        catalog_record("S1", "A duplicate", "X", 1.0),
    ];
    let rows = item_rows(&records);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].item_id, "S1");
    // First occurrence retained
    assert_eq!(rows[0].title, "A");
    assert_eq!(rows[1].item_id, "S2");
}

#[test]
fn test_item_count_equals_distinct_ids_without_duplicates() {
    let records = vec![
        catalog_record("S1", "A", "X", 1.0),
        catalog_record("S2", "B", "Y", 2.0),
        catalog_record("S3", "C", "Z", 3.0),
    ];
    assert_eq!(item_rows(&records).len(), 3);
}

#[test]
fn test_attribute_rows_dedup_by_parent_id() {
    let mut first = catalog_record("S1", "A", "X", 1.0);
    first.parent_id = "P1".to_string();
    let mut second = catalog_record("S2", "B", "X", 2.0);
    second.parent_id = "P1".to_string();

    let rows = attribute_rows(&[first, second]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].parent_id, "P1");
    assert_eq!(rows[0].creator_name, "X");
}

// ============================================================================
// Event Transformer Tests
// ============================================================================

#[test]
fn test_qualifying_filters_pages() {
    let mut home = play("u2", 1500);
    home.page = "Home".to_string();
    let events = vec![play("u1", 1000), home, play("u1", 2000)];

    let plays = qualifying(&events).unwrap();
    assert_eq!(plays.len(), 2);
    assert!(plays.iter().all(|e| e.page == "NextSong"));
}

#[test]
fn test_qualifying_rejects_missing_actor() {
    let mut anon = play("u1", 1000);
    anon.actor_id = None;
    let err = qualifying(&[anon]).unwrap_err();
    assert!(err.to_string().contains("actor_id"));
}

#[test]
fn test_spec_scenario_actor_time_fact_counts() {
    // events [u1/NextSong/1000, u1/NextSong/2000, u2/Home/1500]
    let mut home = play("u2", 1500);
    home.page = "Home".to_string();
    let events = vec![play("u1", 1000), play("u1", 2000), home];

    let plays = qualifying(&events).unwrap();
    let actors = actor_rows(&plays);
    let times = time_rows(&plays, chrono_tz::UTC).unwrap();
    let facts = fact_rows(&plays, &[], chrono_tz::UTC).unwrap();

    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].actor_id, "u1");
    assert_eq!(times.len(), 2);
    assert_eq!(facts.len(), 2);
}

#[test]
fn test_time_rows_dedup_by_timestamp() {
    let events = vec![play("u1", 1000), play("u2", 1000), play("u3", 2000)];
    let plays = qualifying(&events).unwrap();
    let times = time_rows(&plays, chrono_tz::UTC).unwrap();

    assert_eq!(times.len(), 2);
    assert_eq!(times[0].start_time, 1000);
    assert_eq!(times[1].start_time, 2000);
}

#[test]
fn test_spec_scenario_join_match() {
    // catalog S1/"Song A"/"Artist X"/200.0 matched by an exact play
    let catalog = vec![catalog_record("S1", "Song A", "Artist X", 200.0)];
    let event = play_of("u1", 1_541_106_106_796, "Artist X", "Song A", 200.0);

    let plays = vec![&event];
    let facts = fact_rows(&plays, &catalog, chrono_tz::UTC).unwrap();

    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].item_id.as_deref(), Some("S1"));
    assert_eq!(facts[0].parent_id.as_deref(), Some("P-S1"));
}

#[test]
fn test_join_miss_preserves_row_with_nulls() {
    let catalog = vec![catalog_record("S1", "Song A", "Artist X", 200.0)];
    // Same title and creator, different duration: no match
    let event = play_of("u1", 1000, "Artist X", "Song A", 199.9);

    let plays = vec![&event];
    let facts = fact_rows(&plays, &catalog, chrono_tz::UTC).unwrap();

    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].item_id, None);
    assert_eq!(facts[0].parent_id, None);
    assert_eq!(facts[0].actor_id, "u1");
}

#[test]
fn test_join_requires_all_three_fields() {
    let catalog = vec![catalog_record("S1", "Song A", "Artist X", 200.0)];
    // Missing duration on the event side never matches
    let mut event = play_of("u1", 1000, "Artist X", "Song A", 200.0);
    event.duration = None;

    let plays = vec![&event];
    let facts = fact_rows(&plays, &catalog, chrono_tz::UTC).unwrap();
    assert_eq!(facts[0].item_id, None);
}

#[test]
fn test_fact_year_month_from_start_time() {
    let event = play("u1", 1_541_106_106_796);
    let plays = vec![&event];
    let facts = fact_rows(&plays, &[], chrono_tz::UTC).unwrap();
    let time = derive_time(1_541_106_106_796, chrono_tz::UTC).unwrap();

    assert_eq!(facts[0].year, time.year);
    assert_eq!(facts[0].month, time.month);
}

#[test]
fn test_actor_rows_outside_filter_never_appear() {
    let mut home = play("u9", 1500);
    home.page = "Home".to_string();
    let events = vec![play("u1", 1000), home];

    let plays = qualifying(&events).unwrap();
    let actors = actor_rows(&plays);
    assert!(actors.iter().all(|a| a.actor_id != "u9"));
}
