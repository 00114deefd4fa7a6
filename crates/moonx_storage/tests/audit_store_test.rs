//! Tests for the filesystem audit store.

use chrono::{FixedOffset, TimeZone};
use moonx_storage::{AuditStore, POST_METADATA_PREFIX, RAW_ASTRONOMY_FILE, timestamped_name};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_overwrite_replaces_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let store = AuditStore::new(temp_dir.path()).unwrap();

    store
        .write_overwrite(RAW_ASTRONOMY_FILE, &json!({"moon_phase": "NEW_MOON"}))
        .await
        .unwrap();
    let path = store
        .write_overwrite(RAW_ASTRONOMY_FILE, &json!({"moon_phase": "FULL_MOON"}))
        .await
        .unwrap();

    assert_eq!(path, temp_dir.path().join(RAW_ASTRONOMY_FILE));
    let stored = store.read(RAW_ASTRONOMY_FILE).await.unwrap();
    assert_eq!(stored["moon_phase"], "FULL_MOON");

    // Only the audit file itself remains, no temp leftovers
    let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_unique_never_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let store = AuditStore::new(temp_dir.path()).unwrap();

    let first = store
        .write_unique("tweet_metadata_20250101_000000.json", &json!({"id": "1"}))
        .await
        .unwrap();
    let second = store
        .write_unique("tweet_metadata_20250101_000000.json", &json!({"id": "2"}))
        .await
        .unwrap();

    assert_ne!(first, second);
    assert!(second.ends_with("tweet_metadata_20250101_000000_1.json"));
    assert_eq!(store.read("tweet_metadata_20250101_000000.json").await.unwrap()["id"], "1");
    assert_eq!(
        store.read("tweet_metadata_20250101_000000_1.json").await.unwrap()["id"],
        "2"
    );
}

#[tokio::test]
async fn test_rejects_names_outside_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = AuditStore::new(temp_dir.path()).unwrap();

    assert!(store.write_overwrite("../escape.json", &json!({})).await.is_err());
    assert!(store.write_unique("nested/file.json", &json!({})).await.is_err());
    assert!(store.read("").await.is_err());
}

#[tokio::test]
async fn test_creates_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("audit").join("runs");
    let store = AuditStore::new(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(store.base_path(), nested.as_path());
}

#[test]
fn test_timestamped_name_uses_local_time() {
    let gmt7 = FixedOffset::east_opt(7 * 3600).unwrap();
    let at = gmt7.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
    assert_eq!(
        timestamped_name(POST_METADATA_PREFIX, &at),
        "tweet_metadata_20241231_235959.json"
    );
}
