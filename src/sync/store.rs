//! Validated writes to the grab output file

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config;

/// Body of the placeholder file created at setup time
pub const PLACEHOLDER_NOTE: &str = "Ready to grab!";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("failed to encode element data")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Single-slot store behind the sync endpoint.
///
/// Every accepted grab replaces `.grabbed_element` wholesale. Payloads
/// are validated before anything touches the filesystem, so a rejected
/// grab never clobbers the previous one.
pub struct GrabStore {
    path: PathBuf,
}

impl GrabStore {
    pub fn new(project_root: &Path) -> Self {
        Self {
            path: config::grab_file_path(project_root),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate a grab payload and persist it.
    ///
    /// The payload must be a JSON object with a non-empty string
    /// `tagName`. Unknown fields pass through untouched; `timestamp` is
    /// always replaced with the arrival time.
    pub fn record(&self, mut payload: Value) -> Result<(), SyncError> {
        let object = payload
            .as_object_mut()
            .ok_or_else(|| SyncError::InvalidPayload("expected a JSON object".to_string()))?;

        let tag_ok = object
            .get("tagName")
            .and_then(Value::as_str)
            .is_some_and(|tag| !tag.is_empty());
        if !tag_ok {
            return Err(SyncError::InvalidPayload(
                "missing or empty tagName".to_string(),
            ));
        }

        object.insert("timestamp".to_string(), Value::String(iso_timestamp()));

        let body = serde_json::to_string_pretty(&payload)?;
        self.write(&body)
    }

    /// Create the placeholder file if it does not exist yet.
    /// Returns whether a file was created.
    pub fn write_placeholder(&self) -> Result<bool, SyncError> {
        if self.path.exists() {
            return Ok(false);
        }
        let body = serde_json::to_string_pretty(&json!({ "note": PLACEHOLDER_NOTE }))?;
        self.write(&body)?;
        Ok(true)
    }

    fn write(&self, body: &str) -> Result<(), SyncError> {
        fs::write(&self.path, body).map_err(|source| SyncError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn store() -> (tempfile::TempDir, GrabStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GrabStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_record_writes_pretty_json() {
        let (_dir, store) = store();
        store
            .record(json!({ "tagName": "BUTTON", "id": "cta" }))
            .unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("\n  \"tagName\": \"BUTTON\""));

        let value: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["id"], "cta");
    }

    #[test]
    fn test_record_stamps_arrival_time() {
        let (_dir, store) = store();
        store
            .record(json!({ "tagName": "DIV", "timestamp": "1999-01-01T00:00:00.000Z" }))
            .unwrap();

        let value: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let stamp = value["timestamp"].as_str().unwrap();
        assert_ne!(stamp, "1999-01-01T00:00:00.000Z");
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_record_preserves_unknown_fields() {
        let (_dir, store) = store();
        store
            .record(json!({
                "tagName": "A",
                "customNote": "from a future client",
                "nested": { "a": [1, 2, 3] }
            }))
            .unwrap();

        let value: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value["customNote"], "from a future client");
        assert_eq!(value["nested"]["a"][2], 3);
    }

    #[test]
    fn test_rejects_payload_without_tag_name() {
        let (_dir, store) = store();
        let err = store.record(json!({ "id": "cta" })).unwrap_err();
        assert!(matches!(err, SyncError::InvalidPayload(_)));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_rejects_empty_or_non_string_tag_name() {
        let (_dir, store) = store();
        assert!(store.record(json!({ "tagName": "" })).is_err());
        assert!(store.record(json!({ "tagName": 42 })).is_err());
        assert!(store.record(json!(["BUTTON"])).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_rejected_grab_keeps_previous_contents() {
        let (_dir, store) = store();
        store.record(json!({ "tagName": "BUTTON" })).unwrap();
        store.record(json!({ "notTagName": true })).unwrap_err();

        let value: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value["tagName"], "BUTTON");
    }

    #[test]
    fn test_record_overwrites_previous_grab() {
        let (_dir, store) = store();
        store.record(json!({ "tagName": "BUTTON" })).unwrap();
        store.record(json!({ "tagName": "NAV" })).unwrap();

        let value: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value["tagName"], "NAV");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_placeholder_only_created_once() {
        let (_dir, store) = store();
        assert!(store.write_placeholder().unwrap());
        assert!(!store.write_placeholder().unwrap());

        let value: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value["note"], PLACEHOLDER_NOTE);
    }

    #[test]
    fn test_placeholder_never_clobbers_grab() {
        let (_dir, store) = store();
        store.record(json!({ "tagName": "BUTTON" })).unwrap();
        assert!(!store.write_placeholder().unwrap());

        let value: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value["tagName"], "BUTTON");
    }
}
