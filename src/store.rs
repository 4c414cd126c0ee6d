//! Object storage for cached posters and metadata.

mod memory;
mod s3_store;

use std::time::Duration;

use async_trait::async_trait;

use crate::{error::Result, types::StoredObject};

pub use memory::MemoryObjectStore;
pub use s3_store::S3ObjectStore;

/// Key-addressed binary storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether an object exists.
    ///
    /// `Ok(false)` means the object is genuinely absent; any other failure of
    /// the check is an error.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Read an object, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>>;

    /// Write an object, replacing any previous content under the same key.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Create a time-limited read URL for an object.
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String>;
}
