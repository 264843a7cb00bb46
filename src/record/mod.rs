//! Input record types
//!
//! Typed views over the two semi-structured record streams: the item
//! catalog and the activity log. Parsing is strict for key and join
//! fields and lenient (null-propagating) for everything else.

mod catalog;
mod event;

pub use catalog::CatalogRecord;
pub use event::EventRecord;

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// The page value that marks an activity event as a qualifying play
pub const QUALIFYING_PAGE: &str = "NextSong";

// ============================================================================
// Field extraction helpers
// ============================================================================

/// Look up a field under any of its accepted names.
///
/// Sources written by the legacy collector use camelCase wire names; the
/// first alias is the canonical name used in error messages.
fn lookup<'a>(obj: &'a JsonObject, aliases: &[&str]) -> Option<&'a JsonValue> {
    aliases
        .iter()
        .find_map(|name| obj.get(*name))
        .filter(|v| !v.is_null())
}

fn require<'a>(obj: &'a JsonObject, aliases: &[&str]) -> Result<&'a JsonValue> {
    lookup(obj, aliases).ok_or_else(|| Error::malformed(aliases[0], "missing required field"))
}

fn req_str(obj: &JsonObject, aliases: &[&str]) -> Result<String> {
    let value = require(obj, aliases)?;
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| Error::malformed(aliases[0], format!("expected non-empty string, got {value}")))
}

fn req_f64(obj: &JsonObject, aliases: &[&str]) -> Result<f64> {
    let value = require(obj, aliases)?;
    value
        .as_f64()
        .ok_or_else(|| Error::malformed(aliases[0], format!("expected number, got {value}")))
}

fn req_i64(obj: &JsonObject, aliases: &[&str]) -> Result<i64> {
    let value = require(obj, aliases)?;
    value
        .as_i64()
        .ok_or_else(|| Error::malformed(aliases[0], format!("expected integer, got {value}")))
}

fn opt_str(obj: &JsonObject, aliases: &[&str]) -> Option<String> {
    lookup(obj, aliases)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn opt_f64(obj: &JsonObject, aliases: &[&str]) -> Option<f64> {
    lookup(obj, aliases).and_then(JsonValue::as_f64)
}

fn opt_i64(obj: &JsonObject, aliases: &[&str]) -> Option<i64> {
    lookup(obj, aliases).and_then(JsonValue::as_i64)
}

/// Identifier fields arrive as strings or numbers depending on the
/// collector version; empty strings mean absent.
fn opt_id(obj: &JsonObject, aliases: &[&str]) -> Option<String> {
    match lookup(obj, aliases)? {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_object<'a>(value: &'a JsonValue, what: &str) -> Result<&'a JsonObject> {
    value
        .as_object()
        .ok_or_else(|| Error::malformed(what, format!("expected JSON object, got {value}")))
}

#[cfg(test)]
mod tests;
