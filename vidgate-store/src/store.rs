use async_trait::async_trait;

use crate::{ByteRange, ByteStream, ObjectEntry, ObjectMeta, StoreResult};

/// Core object storage operations - must be implemented by all storage backends
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Get object metadata without transferring the body
    async fn head(&self, key: &str) -> StoreResult<ObjectMeta>;

    /// Open the object body as a stream, optionally scoped to a byte range
    async fn get(&self, key: &str, range: Option<ByteRange>) -> StoreResult<ByteStream>;

    /// List objects under a prefix
    async fn list(&self, prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>>;

    /// Generate a time-limited signed URL for reading an object
    async fn sign_get(&self, key: &str, expires_in_secs: u64) -> StoreResult<String>;
}
