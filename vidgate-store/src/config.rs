use std::time::Duration;

use crate::{StoreError, StoreResult};

/// Connection settings for an S3-compatible backend.
///
/// Credentials may be left unset, in which case the ambient AWS credential
/// chain (environment, profile, instance role) is used instead.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bucket holding the media objects
    pub bucket: String,

    /// Backend region
    pub region: String,

    /// Custom endpoint for non-AWS backends (Wasabi, MinIO, ...).
    /// Implies path-style addressing.
    pub endpoint: Option<String>,

    /// Static access key, if not using the ambient credential chain
    pub access_key_id: Option<String>,

    /// Static secret key, paired with `access_key_id`
    pub secret_access_key: Option<String>,
}

impl StoreConfig {
    /// Create a new config for a bucket in a region
    pub fn new<B: Into<String>, R: Into<String>>(bucket: B, region: R) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// `S3_BUCKET_NAME` is required; `AWS_REGION`, `S3_ENDPOINT`,
    /// `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` are optional.
    pub fn from_env() -> StoreResult<Self> {
        let bucket = std::env::var("S3_BUCKET_NAME")
            .map_err(|_| StoreError::config("S3_BUCKET_NAME is not set"))?;
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        let mut config = Self::new(bucket, region);
        if let Ok(endpoint) = std::env::var("S3_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }
        if let Ok(key) = std::env::var("AWS_ACCESS_KEY_ID") {
            config.access_key_id = Some(key);
        }
        if let Ok(secret) = std::env::var("AWS_SECRET_ACCESS_KEY") {
            config.secret_access_key = Some(secret);
        }
        Ok(config)
    }

    /// Set a custom endpoint
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set static credentials
    pub fn with_credentials<K: Into<String>, S: Into<String>>(mut self, key: K, secret: S) -> Self {
        self.access_key_id = Some(key.into());
        self.secret_access_key = Some(secret.into());
        self
    }
}

/// Retry behavior for transient backend faults
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

/// Settings for the [`MediaAdapter`](crate::MediaAdapter)
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Retry policy for metadata lookups. Transient faults only; permanent
    /// faults surface immediately.
    pub retry: RetryPolicy,

    /// Upper bound on a single backend call. Distinct from any overall
    /// request deadline the caller may enforce.
    pub op_timeout: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            op_timeout: Duration::from_secs(10),
        }
    }
}

impl AdapterConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment
    /// (`S3_RETRY_ATTEMPTS`, `S3_OP_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(attempts) = std::env::var("S3_RETRY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.retry.max_attempts = attempts.max(1);
        }
        if let Some(secs) = std::env::var("S3_OP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.op_timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Set the retry ceiling
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    /// Set the pause between retry attempts
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.retry.backoff = backoff;
        self
    }

    /// Set the per-call timeout
    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }
}
