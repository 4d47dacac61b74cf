//! Storage notification event model
//!
//! Mirrors the S3 event notification schema. Only `s3.bucket.name` and
//! `s3.object.key` are required; everything else is optional and used for
//! logging.

use serde::{Deserialize, Serialize};

/// A storage-change notification delivered to the handler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

impl NotificationEvent {
    /// Event with one record for `container`/`raw_key`
    pub fn single(container: impl Into<String>, raw_key: impl Into<String>) -> Self {
        Self {
            records: vec![NotificationRecord::new(container, raw_key)],
        }
    }
}

/// One created object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    pub s3: StorageEntity,
}

impl NotificationRecord {
    pub fn new(container: impl Into<String>, raw_key: impl Into<String>) -> Self {
        Self {
            event_name: None,
            s3: StorageEntity {
                bucket: BucketEntity {
                    name: container.into(),
                },
                object: ObjectEntity {
                    key: raw_key.into(),
                    size: None,
                },
            },
        }
    }

    /// Name of the container holding the new object
    pub fn container_name(&self) -> &str {
        &self.s3.bucket.name
    }

    /// Object key as delivered, still form-encoded
    pub fn raw_key(&self) -> &str {
        &self.s3.object.key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageEntity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntity {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}
