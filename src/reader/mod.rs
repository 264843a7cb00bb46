//! Record source reader
//!
//! Lists objects under a glob-like path pattern on an object store and
//! decodes their bodies into records. Bodies may be a single JSON object,
//! a JSON array, or JSON Lines; all three occur across collector versions.
//!
//! Sources are read in lexicographic path order and line order is
//! preserved within a source, so downstream deduplication sees a
//! reproducible sequence for a given input set.

mod glob;

pub use glob::GlobPattern;

use crate::error::{Error, Result};
use crate::record::{CatalogRecord, EventRecord};
use crate::session::StoreHandle;
use crate::types::JsonValue;
use futures::TryStreamExt;
use object_store::ObjectStore;
use tracing::debug;

/// Reads one record source (a store handle plus a glob pattern)
pub struct SourceReader<'a> {
    handle: &'a StoreHandle,
    pattern: GlobPattern,
}

impl<'a> SourceReader<'a> {
    /// Create a reader for a pattern under the given store handle
    pub fn new(handle: &'a StoreHandle, pattern: &str) -> Result<Self> {
        Ok(Self {
            handle,
            pattern: GlobPattern::compile(pattern)?,
        })
    }

    /// List matching object paths, sorted lexicographically
    pub async fn list_sources(&self) -> Result<Vec<String>> {
        let root = self.handle.resolve(self.pattern.prefix());
        let listing = if root.as_ref().is_empty() {
            self.handle.store().list(None)
        } else {
            self.handle.store().list(Some(&root))
        };

        let metas: Vec<_> = listing.try_collect().await.map_err(|e| {
            Error::input_access(root.to_string(), format!("listing failed: {e}"))
        })?;

        let base = self.handle.resolve("").to_string();
        let mut paths: Vec<String> = metas
            .into_iter()
            .map(|meta| meta.location.to_string())
            .filter(|path| self.pattern.matches(relative_to(path, &base)))
            .collect();
        paths.sort();

        debug!(count = paths.len(), "listed record sources");
        Ok(paths)
    }

    /// Read and decode every matching source into raw JSON values
    pub async fn read_values(&self) -> Result<Vec<JsonValue>> {
        let mut records = Vec::new();
        for path in self.list_sources().await? {
            let object_path = object_store::path::Path::from(path.as_str());
            let body = self
                .handle
                .store()
                .get(&object_path)
                .await
                .map_err(|e| Error::input_access(&path, e.to_string()))?
                .bytes()
                .await
                .map_err(|e| Error::input_access(&path, e.to_string()))?;

            let text = std::str::from_utf8(&body)
                .map_err(|e| Error::input_access(&path, format!("not UTF-8: {e}")))?;

            decode_body(text, &path, &mut records)?;
        }
        Ok(records)
    }

    /// Read catalog records
    pub async fn read_catalog(&self) -> Result<Vec<CatalogRecord>> {
        self.read_values()
            .await?
            .iter()
            .map(CatalogRecord::from_json)
            .collect()
    }

    /// Read activity records
    pub async fn read_events(&self) -> Result<Vec<EventRecord>> {
        self.read_values()
            .await?
            .iter()
            .map(EventRecord::from_json)
            .collect()
    }
}

fn relative_to<'p>(path: &'p str, base: &str) -> &'p str {
    if base.is_empty() {
        path
    } else {
        path.strip_prefix(base)
            .map_or(path, |rest| rest.trim_start_matches('/'))
    }
}

/// Decode a source body: whole-document JSON first (object or array),
/// falling back to JSON Lines.
fn decode_body(text: &str, path: &str, records: &mut Vec<JsonValue>) -> Result<()> {
    match serde_json::from_str::<JsonValue>(text) {
        Ok(JsonValue::Array(items)) => {
            records.extend(items);
            Ok(())
        }
        Ok(value) => {
            records.push(value);
            Ok(())
        }
        Err(_) => {
            for (line_num, line) in text.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let value: JsonValue = serde_json::from_str(line).map_err(|e| {
                    Error::input_access(
                        path,
                        format!("invalid JSON at line {}: {e}", line_num + 1),
                    )
                })?;
                records.push(value);
            }
            Ok(())
        }
    }
}
