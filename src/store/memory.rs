//! In-process object store.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{error::Result, types::StoredObject};

use super::ObjectStore;

/// Object store backed by a `HashMap`, nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
}

impl MemoryObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` calls served so far.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.lock().await.contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        Ok(self.objects.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: Some(content_type.to_string()),
            },
        );
        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        Ok(format!("memory://{key}?expires_in={}", expires_in.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_and_exists() {
        let store = MemoryObjectStore::new();
        assert!(!store.exists("posters/tt1.jpg").await.expect("exists"));

        store
            .put("posters/tt1.jpg", vec![1, 2, 3], "image/png")
            .await
            .expect("put");

        assert!(store.exists("posters/tt1.jpg").await.expect("exists"));
        let object = store
            .get("posters/tt1.jpg")
            .await
            .expect("get")
            .expect("present");
        assert_eq!(object.bytes, vec![1, 2, 3]);
        assert_eq!(object.content_type.as_deref(), Some("image/png"));
        assert_eq!(store.put_count(), 1);
    }

    #[tokio::test]
    async fn put_overwrites() {
        let store = MemoryObjectStore::new();
        store.put("a", vec![1], "image/jpeg").await.expect("put");
        store.put("a", vec![2], "image/jpeg").await.expect("put");

        let object = store.get("a").await.expect("get").expect("present");
        assert_eq!(object.bytes, vec![2]);
        assert_eq!(store.keys().await, vec!["a".to_string()]);
        assert_eq!(store.put_count(), 2);
    }

    #[tokio::test]
    async fn missing_object_reads_as_none() {
        let store = MemoryObjectStore::new();
        assert!(store.get("nope").await.expect("get").is_none());
    }
}
