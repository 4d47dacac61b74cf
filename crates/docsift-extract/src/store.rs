//! Object store capability and the in-memory backend

use crate::error::StoreError;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::RwLock;

/// Streaming body of a fetched object.
///
/// Dropping the body releases the underlying connection.
pub struct ObjectBody {
    reader: Pin<Box<dyn AsyncRead + Send>>,
    content_length: Option<u64>,
}

impl ObjectBody {
    pub fn new(reader: impl AsyncRead + Send + 'static, content_length: Option<u64>) -> Self {
        Self {
            reader: Box::pin(reader),
            content_length,
        }
    }

    /// Body backed by an in-memory buffer
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len() as u64;
        Self::new(std::io::Cursor::new(bytes), Some(len))
    }

    /// Length advertised by the store, if any
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Read the whole body, consuming it
    pub async fn into_bytes(mut self) -> std::io::Result<Vec<u8>> {
        let capacity = self.content_length.unwrap_or(0) as usize;
        let mut buffer = Vec::with_capacity(capacity);
        self.reader.read_to_end(&mut buffer).await?;
        Ok(buffer)
    }
}

impl std::fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectBody")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Get/put access to a container-and-key object store
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Open the object at `container`/`key` for reading
    async fn get(&self, container: &str, key: &str) -> Result<ObjectBody, StoreError>;

    /// Write `bytes` to `container`/`key`, declaring `content_length` bytes
    async fn put(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        content_length: u64,
    ) -> Result<(), StoreError>;
}

/// Object written to a [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_length: u64,
}

/// In-process object store keyed by `(container, key)`
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without counting it as a put
    pub async fn insert(&self, container: &str, key: &str, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        let content_length = bytes.len() as u64;
        self.objects.write().await.insert(
            (container.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_length,
            },
        );
    }

    pub async fn object(&self, container: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(container.to_string(), key.to_string()))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Number of `get` calls served
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `put` calls served
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, container: &str, key: &str) -> Result<ObjectBody, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let object = self
            .object(container, key)
            .await
            .ok_or_else(|| StoreError::NotFound {
                container: container.to_string(),
                key: key.to_string(),
            })?;
        Ok(ObjectBody::from_bytes(object.bytes))
    }

    async fn put(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        content_length: u64,
    ) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.objects.write().await.insert(
            (container.to_string(), key.to_string()),
            StoredObject {
                bytes,
                content_length,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        assert_ok!(store.put("bucket", "a.txt", b"hello".to_vec(), 5).await);

        let body = store.get("bucket", "a.txt").await.unwrap();
        assert_eq!(body.content_length(), Some(5));
        assert_eq!(body.into_bytes().await.unwrap(), b"hello");
        assert_eq!(store.put_count(), 1);
        assert_eq!(store.get_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_object() {
        let store = MemoryStore::new();
        let err = assert_err!(store.get("bucket", "nope").await);
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_insert_is_not_counted() {
        let store = MemoryStore::new();
        store.insert("bucket", "seed.txt", "seed").await;
        assert_eq!(store.put_count(), 0);
        assert_eq!(store.len().await, 1);
    }
}
