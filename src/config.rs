//! Pipeline configuration
//!
//! This module contains the configuration structures used to define a
//! pipeline run in YAML format. Storage credentials are explicit config
//! values handed to the session at construction time; nothing here reads
//! process-wide environment state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-Level Pipeline Config
// ============================================================================

/// Complete pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Kind of config (always "pipeline")
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Config version
    #[serde(default = "default_version")]
    pub version: String,

    /// Base URL of the input record sources
    /// (local path, s3://bucket/prefix, gs://bucket/prefix, az://container/prefix)
    pub input_url: String,

    /// Base URL of the output dataset root
    pub output_url: String,

    /// Glob pattern selecting catalog record files under the input root
    #[serde(default = "default_catalog_pattern")]
    pub catalog_pattern: String,

    /// Glob pattern selecting activity record files under the input root
    #[serde(default = "default_events_pattern")]
    pub events_pattern: String,

    /// IANA time zone name used for every derived time column.
    /// Injected explicitly; the host zone is never consulted.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Storage credentials, per backend
    #[serde(default)]
    pub storage: StorageCredentials,
}

fn default_kind() -> String {
    "pipeline".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_catalog_pattern() -> String {
    "catalog/**/*.json".to_string()
}

fn default_events_pattern() -> String {
    "activity/**/*.json".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl PipelineConfig {
    /// Load a pipeline config from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read config {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_yaml(&text)
    }

    /// Parse a pipeline config from a YAML string
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.input_url.is_empty() {
            return Err(Error::missing_field("input_url"));
        }
        if self.output_url.is_empty() {
            return Err(Error::missing_field("output_url"));
        }
        if self.catalog_pattern.is_empty() {
            return Err(Error::missing_field("catalog_pattern"));
        }
        if self.events_pattern.is_empty() {
            return Err(Error::missing_field("events_pattern"));
        }
        self.tz()?;
        Ok(())
    }

    /// Resolve the configured time zone
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| Error::config(format!("Unknown time zone: {}", self.timezone)))
    }
}

// ============================================================================
// Storage Credentials
// ============================================================================

/// Explicit storage credentials, one optional block per backend.
///
/// A backend block is only required when the input or output URL uses
/// that backend's scheme. Local filesystem paths need none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageCredentials {
    /// AWS S3 / S3-compatible credentials
    #[serde(default)]
    pub s3: Option<S3Credentials>,

    /// Google Cloud Storage credentials
    #[serde(default)]
    pub gcs: Option<GcsCredentials>,

    /// Azure Blob Storage credentials
    #[serde(default)]
    pub azure: Option<AzureCredentials>,
}

/// AWS S3 credentials and connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Credentials {
    /// Access key id
    pub access_key_id: String,

    /// Secret access key
    pub secret_access_key: String,

    /// Bucket region
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint (S3-compatible stores)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Allow plain-HTTP endpoints (test stores)
    #[serde(default)]
    pub allow_http: bool,
}

/// Google Cloud Storage credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcsCredentials {
    /// Service account key JSON, inline
    pub service_account_key: String,
}

/// Azure Blob Storage credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureCredentials {
    /// Storage account name
    pub account: String,

    /// Storage account access key
    pub access_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r"
input_url: /data/in
output_url: /data/out
";

    #[test]
    fn test_minimal_config_defaults() {
        let config = PipelineConfig::from_yaml(MINIMAL).unwrap();
        assert_eq!(config.kind, "pipeline");
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.catalog_pattern, "catalog/**/*.json");
        assert_eq!(config.events_pattern, "activity/**/*.json");
        assert_eq!(config.tz().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn test_full_config() {
        let yaml = r"
input_url: s3://raw/streams
output_url: s3://lake/star
catalog_pattern: 'song_data/A/A/A/*.json'
events_pattern: 'log-data/*/*/*.json'
timezone: America/New_York
storage:
  s3:
    access_key_id: AKIATEST
    secret_access_key: secret
    region: us-west-2
";
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.tz().unwrap(), chrono_tz::America::New_York);
        let s3 = config.storage.s3.unwrap();
        assert_eq!(s3.access_key_id, "AKIATEST");
        assert_eq!(s3.region.as_deref(), Some("us-west-2"));
        assert!(!s3.allow_http);
    }

    #[test]
    fn test_missing_output_url() {
        let err = PipelineConfig::from_yaml("input_url: /in\noutput_url: ''\n").unwrap_err();
        assert!(err.to_string().contains("output_url"));
    }

    #[test]
    fn test_bad_timezone() {
        let yaml = "input_url: /in\noutput_url: /out\ntimezone: Mars/Olympus\n";
        let err = PipelineConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("Unknown time zone"));
    }
}
