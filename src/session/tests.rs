//! Tests for session construction

use super::*;
use crate::config::{S3Credentials, StorageCredentials};
use tempfile::tempdir;

#[test]
fn test_connect_local_path() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().to_str().unwrap();
    let handle = StoreHandle::connect(path, &StorageCredentials::default()).unwrap();
    assert_eq!(handle.scheme(), "file");
    assert!(!handle.is_cloud());
}

#[test]
fn test_connect_file_url() {
    let temp_dir = tempdir().unwrap();
    let url = format!("file://{}", temp_dir.path().display());
    let handle = StoreHandle::connect(&url, &StorageCredentials::default()).unwrap();
    assert_eq!(handle.scheme(), "file");
}

#[test]
fn test_s3_requires_explicit_credentials() {
    // No ambient environment fallback: missing credentials is a config error
    let err = StoreHandle::connect("s3://bucket/prefix", &StorageCredentials::default())
        .unwrap_err();
    assert!(err.to_string().contains("storage.s3"));
}

#[test]
fn test_s3_with_credentials() {
    let credentials = StorageCredentials {
        s3: Some(S3Credentials {
            access_key_id: "AKIATEST".to_string(),
            secret_access_key: "secret".to_string(),
            region: Some("us-east-1".to_string()),
            endpoint: None,
            allow_http: false,
        }),
        ..Default::default()
    };
    let handle = StoreHandle::connect("s3://bucket/raw/streams", &credentials).unwrap();
    assert_eq!(handle.scheme(), "s3");
    assert!(handle.is_cloud());
    assert_eq!(handle.resolve("catalog").as_ref(), "raw/streams/catalog");
}

#[test]
fn test_resolve_without_prefix() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().to_str().unwrap();
    let handle = StoreHandle::connect(path, &StorageCredentials::default()).unwrap();
    assert_eq!(handle.resolve("catalog/items").as_ref(), "catalog/items");
    assert_eq!(handle.resolve("/catalog/items/").as_ref(), "catalog/items");
}
