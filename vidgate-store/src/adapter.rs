use std::sync::Arc;

use tokio::time::timeout;

use crate::{
    AdapterConfig, ByteRange, ByteStream, MediaStore, ObjectEntry, ObjectMeta, StoreError,
    StoreResult,
};

/// The main media adapter - this is what the gateway embeds.
///
/// Wraps any [`MediaStore`] with the call policy the streaming core needs:
/// a bounded per-call timeout and a small retry ceiling for transient
/// metadata faults. Holds no per-request state; one instance is shared by
/// all concurrent requests.
pub struct MediaAdapter {
    store: Arc<dyn MediaStore>,
    config: AdapterConfig,
}

impl MediaAdapter {
    /// Create a new media adapter
    pub fn new<S: MediaStore + 'static>(store: S, config: AdapterConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Create from an already-shared store
    pub fn from_arc(store: Arc<dyn MediaStore>, config: AdapterConfig) -> Self {
        Self { store, config }
    }

    /// Resolve object metadata, retrying transient faults.
    ///
    /// At most `retry.max_attempts` attempts in total; not-found and
    /// access-denied surface immediately. Fetched fresh on every call,
    /// never cached.
    pub async fn metadata(&self, key: &str) -> StoreResult<ObjectMeta> {
        let mut attempt = 1;
        loop {
            let outcome = self.bounded(self.store.head(key)).await;
            match outcome {
                Ok(meta) => return Ok(meta),
                Err(err) if err.is_transient() && attempt < self.config.retry.max_attempts => {
                    tracing::warn!(key, attempt, error = %err, "transient metadata fault, retrying");
                    tokio::time::sleep(self.config.retry.backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Open an object body, optionally scoped to a byte range.
    ///
    /// Not retried: once any byte of the stream may have been handed to a
    /// client, a second attempt could interleave stale data. The timeout
    /// covers opening the stream, not the transfer itself.
    pub async fn open(&self, key: &str, range: Option<ByteRange>) -> StoreResult<ByteStream> {
        self.bounded(self.store.get(key, range)).await
    }

    /// List objects under a prefix
    pub async fn list(&self, prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>> {
        self.bounded(self.store.list(prefix)).await
    }

    /// Issue a time-limited signed URL for an object
    pub async fn sign_get(&self, key: &str, expires_in_secs: u64) -> StoreResult<String> {
        self.bounded(self.store.sign_get(key, expires_in_secs)).await
    }

    /// Get configuration
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match timeout(self.config.op_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Store that fails a scripted number of times before succeeding
    struct FlakyStore {
        failures: u32,
        permanent: bool,
        calls: AtomicU32,
    }

    impl FlakyStore {
        fn transient(failures: u32) -> Self {
            Self {
                failures,
                permanent: false,
                calls: AtomicU32::new(0),
            }
        }

        fn permanent() -> Self {
            Self {
                failures: u32::MAX,
                permanent: true,
                calls: AtomicU32::new(0),
            }
        }

        fn meta() -> ObjectMeta {
            ObjectMeta {
                size_bytes: 1000,
                content_type: Some("video/mp4".to_string()),
                etag: None,
                last_modified: None,
            }
        }
    }

    #[async_trait]
    impl MediaStore for FlakyStore {
        async fn head(&self, key: &str) -> StoreResult<ObjectMeta> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                if self.permanent {
                    return Err(StoreError::not_found(key));
                }
                return Err(StoreError::Timeout);
            }
            Ok(Self::meta())
        }

        async fn get(&self, _key: &str, _range: Option<ByteRange>) -> StoreResult<ByteStream> {
            let empty = futures_util::stream::empty::<Result<bytes::Bytes, std::io::Error>>();
            Ok(Box::pin(empty))
        }

        async fn list(&self, _prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>> {
            Ok(Vec::new())
        }

        async fn sign_get(&self, key: &str, _expires_in_secs: u64) -> StoreResult<String> {
            Ok(format!("https://signed.example/{key}"))
        }
    }

    fn fast_config() -> AdapterConfig {
        AdapterConfig::new()
            .with_max_attempts(3)
            .with_backoff(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn metadata_retries_transient_faults() {
        let adapter = MediaAdapter::new(FlakyStore::transient(2), fast_config());
        let meta = adapter.metadata("clip.mp4").await.unwrap();
        assert_eq!(meta.size_bytes, 1000);
    }

    #[tokio::test]
    async fn metadata_stops_at_the_retry_ceiling() {
        let store = FlakyStore::transient(5);
        let adapter = MediaAdapter::new(store, fast_config());
        let err = adapter.metadata("clip.mp4").await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout));
    }

    #[tokio::test]
    async fn metadata_does_not_retry_permanent_faults() {
        let store = Arc::new(FlakyStore::permanent());
        let adapter = MediaAdapter::from_arc(store.clone(), fast_config());
        let err = adapter.metadata("clip.mp4").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_ceiling_counts_total_attempts() {
        let store = Arc::new(FlakyStore::transient(5));
        let adapter = MediaAdapter::from_arc(store.clone(), fast_config().with_max_attempts(2));
        let _ = adapter.metadata("clip.mp4").await;
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn slow_store_hits_the_call_timeout() {
        struct StallingStore;

        #[async_trait]
        impl MediaStore for StallingStore {
            async fn head(&self, _key: &str) -> StoreResult<ObjectMeta> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                unreachable!()
            }

            async fn get(&self, _key: &str, _range: Option<ByteRange>) -> StoreResult<ByteStream> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                unreachable!()
            }

            async fn list(&self, _prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>> {
                Ok(Vec::new())
            }

            async fn sign_get(&self, _key: &str, _secs: u64) -> StoreResult<String> {
                Ok(String::new())
            }
        }

        let adapter = MediaAdapter::new(
            StallingStore,
            AdapterConfig::new()
                .with_max_attempts(1)
                .with_op_timeout(Duration::from_millis(10)),
        );
        let err = match adapter.open("clip.mp4", None).await {
            Ok(_) => panic!("expected open to fail with Timeout"),
            Err(e) => e,
        };
        assert!(matches!(err, StoreError::Timeout));
    }
}
