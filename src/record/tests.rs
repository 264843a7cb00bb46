//! Tests for record parsing

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Catalog Record Tests
// ============================================================================

#[test]
fn test_catalog_record_canonical_names() {
    let value = json!({
        "item_id": "S1",
        "title": "Song A",
        "parent_id": "P1",
        "year": 1984,
        "duration": 200.5,
        "creator_name": "Artist X",
        "location": "Berlin",
        "latitude": 52.5,
        "longitude": 13.4
    });

    let record = CatalogRecord::from_json(&value).unwrap();
    assert_eq!(record.item_id, "S1");
    assert_eq!(record.parent_id, "P1");
    assert_eq!(record.year, 1984);
    assert_eq!(record.duration, 200.5);
    assert_eq!(record.location.as_deref(), Some("Berlin"));
}

#[test]
fn test_catalog_record_legacy_wire_names() {
    let value = json!({
        "song_id": "SOABC123",
        "title": "Setanta matins",
        "artist_id": "ARXYZ789",
        "artist_name": "Elena",
        "duration": 269.58,
        "year": 0,
        "artist_location": "",
        "artist_latitude": null,
        "artist_longitude": null
    });

    let record = CatalogRecord::from_json(&value).unwrap();
    assert_eq!(record.item_id, "SOABC123");
    assert_eq!(record.parent_id, "ARXYZ789");
    assert_eq!(record.creator_name, "Elena");
    assert_eq!(record.year, 0);
    // Empty and null optionals propagate as None
    assert_eq!(record.location, None);
    assert_eq!(record.latitude, None);
}

#[test]
fn test_catalog_record_missing_key_is_strict() {
    let value = json!({
        "title": "No Id",
        "parent_id": "P1",
        "duration": 100.0,
        "creator_name": "A"
    });

    let err = CatalogRecord::from_json(&value).unwrap_err();
    assert!(err.is_input_error());
    assert!(err.to_string().contains("item_id"));
}

#[test]
fn test_catalog_record_missing_year_defaults_to_zero() {
    let value = json!({
        "item_id": "S1",
        "title": "T",
        "parent_id": "P1",
        "duration": 10.0,
        "creator_name": "A"
    });

    let record = CatalogRecord::from_json(&value).unwrap();
    assert_eq!(record.year, 0);
}

#[test]
fn test_catalog_record_untypeable_duration() {
    let value = json!({
        "item_id": "S1",
        "title": "T",
        "parent_id": "P1",
        "duration": "not a number",
        "creator_name": "A"
    });

    let err = CatalogRecord::from_json(&value).unwrap_err();
    assert!(err.to_string().contains("duration"));
}

#[test]
fn test_catalog_record_rejects_non_object() {
    let err = CatalogRecord::from_json(&json!([1, 2, 3])).unwrap_err();
    assert!(err.to_string().contains("expected JSON object"));
}

// ============================================================================
// Event Record Tests
// ============================================================================

#[test]
fn test_event_record_legacy_wire_names() {
    let value = json!({
        "userId": "26",
        "firstName": "Ryan",
        "lastName": "Smith",
        "gender": "M",
        "level": "free",
        "ts": 1_541_106_106_796_i64,
        "page": "NextSong",
        "song": "Sehr kosmisch",
        "artist": "Harmonia",
        "length": 655.77,
        "sessionId": 583,
        "location": "San Jose-Sunnyvale-Santa Clara, CA",
        "userAgent": "Mozilla/5.0"
    });

    let record = EventRecord::from_json(&value).unwrap();
    assert_eq!(record.actor_id.as_deref(), Some("26"));
    assert_eq!(record.subscription_level.as_deref(), Some("free"));
    assert_eq!(record.timestamp_epoch_ms, 1_541_106_106_796);
    assert_eq!(record.session_id, Some(583));
    assert!(record.is_qualifying());
}

#[test]
fn test_event_record_numeric_actor_id() {
    let value = json!({"userId": 26, "ts": 1000, "page": "NextSong"});
    let record = EventRecord::from_json(&value).unwrap();
    assert_eq!(record.actor_id.as_deref(), Some("26"));
}

#[test]
fn test_event_record_anonymous_row() {
    // Logged-out rows carry an empty userId; they parse but never qualify
    let value = json!({"userId": "", "ts": 1500, "page": "Home"});
    let record = EventRecord::from_json(&value).unwrap();
    assert_eq!(record.actor_id, None);
    assert!(!record.is_qualifying());
}

#[test]
fn test_event_record_missing_timestamp_is_strict() {
    let value = json!({"userId": "1", "page": "NextSong"});
    let err = EventRecord::from_json(&value).unwrap_err();
    assert!(err.to_string().contains("timestamp_epoch_ms"));
}

#[test]
fn test_event_record_missing_page_is_strict() {
    let value = json!({"userId": "1", "ts": 1000});
    let err = EventRecord::from_json(&value).unwrap_err();
    assert!(err.to_string().contains("page"));
}

#[test]
fn test_event_record_missing_join_fields_still_parses() {
    let value = json!({"userId": "9", "ts": 2000, "page": "NextSong"});
    let record = EventRecord::from_json(&value).unwrap();
    assert_eq!(record.item_title, None);
    assert_eq!(record.creator_name, None);
    assert_eq!(record.duration, None);
}
