//! Data-access session
//!
//! The pre-established context both transformers run against: one object
//! store handle for the input record sources and one for the output
//! dataset root. Stores are built from explicit configuration values
//! passed in at construction time; ambient process environment is never
//! consulted.
//!
//! Supported URL formats:
//! - `s3://bucket/path/` - AWS S3 (and S3-compatible endpoints)
//! - `gs://bucket/path/` - Google Cloud Storage
//! - `az://container/path/` - Azure Blob Storage
//! - `/local/path/` or `file:///local/path/` - Local filesystem

use crate::config::{PipelineConfig, StorageCredentials};
use crate::error::{Error, Result};
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// A resolved store plus the path prefix addressed by its URL
#[derive(Debug, Clone)]
pub struct StoreHandle {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl StoreHandle {
    /// Resolve a URL into a store handle using the supplied credentials
    pub fn connect(url: &str, credentials: &StorageCredentials) -> Result<Self> {
        if let Some(rest) = url.strip_prefix("s3://") {
            Self::connect_s3(rest, credentials)
        } else if let Some(rest) = url.strip_prefix("gs://") {
            Self::connect_gcs(rest, credentials)
        } else if let Some(rest) = url.strip_prefix("az://") {
            Self::connect_azure(rest, credentials)
        } else {
            Self::connect_local(url)
        }
    }

    fn split_bucket(rest: &str) -> (&str, String) {
        match rest.find('/') {
            Some(idx) => (&rest[..idx], rest[idx + 1..].trim_matches('/').to_string()),
            None => (rest, String::new()),
        }
    }

    fn connect_s3(rest: &str, credentials: &StorageCredentials) -> Result<Self> {
        let creds = credentials
            .s3
            .as_ref()
            .ok_or_else(|| Error::config("s3:// URL given but no storage.s3 credentials"))?;
        let (bucket, prefix) = Self::split_bucket(rest);

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_access_key_id(&creds.access_key_id)
            .with_secret_access_key(&creds.secret_access_key);

        if let Some(region) = &creds.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &creds.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if creds.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create s3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    fn connect_gcs(rest: &str, credentials: &StorageCredentials) -> Result<Self> {
        let creds = credentials
            .gcs
            .as_ref()
            .ok_or_else(|| Error::config("gs:// URL given but no storage.gcs credentials"))?;
        let (bucket, prefix) = Self::split_bucket(rest);

        let store = GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket)
            .with_service_account_key(&creds.service_account_key)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "gs".to_string(),
        })
    }

    fn connect_azure(rest: &str, credentials: &StorageCredentials) -> Result<Self> {
        let creds = credentials
            .azure
            .as_ref()
            .ok_or_else(|| Error::config("az:// URL given but no storage.azure credentials"))?;
        let (container, prefix) = Self::split_bucket(rest);

        let store = MicrosoftAzureBuilder::new()
            .with_container_name(container)
            .with_account(&creds.account)
            .with_access_key(&creds.access_key)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "az".to_string(),
        })
    }

    fn connect_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud store (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The underlying object store
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Resolve a path relative to this handle's prefix
    pub fn resolve(&self, relative: &str) -> ObjectPath {
        let relative = relative.trim_matches('/');
        if self.prefix.is_empty() {
            ObjectPath::from(relative)
        } else if relative.is_empty() {
            ObjectPath::from(self.prefix.as_str())
        } else {
            ObjectPath::from(format!("{}/{relative}", self.prefix))
        }
    }
}

/// The data-access context for one pipeline run
#[derive(Debug, Clone)]
pub struct Session {
    input: StoreHandle,
    output: StoreHandle,
    tz: chrono_tz::Tz,
}

impl Session {
    /// Establish a session from pipeline configuration
    pub fn connect(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            input: StoreHandle::connect(&config.input_url, &config.storage)?,
            output: StoreHandle::connect(&config.output_url, &config.storage)?,
            tz: config.tz()?,
        })
    }

    /// The input record source store
    pub fn input(&self) -> &StoreHandle {
        &self.input
    }

    /// The output dataset store
    pub fn output(&self) -> &StoreHandle {
        &self.output
    }

    /// The time zone every derived time column uses
    pub fn tz(&self) -> chrono_tz::Tz {
        self.tz
    }
}

#[cfg(test)]
mod tests;
