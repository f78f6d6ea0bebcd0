use std::time::Duration;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use tokio_util::io::ReaderStream;

use crate::{
    ByteRange, ByteStream, MediaStore, ObjectEntry, ObjectMeta, StoreConfig, StoreError,
    StoreResult,
};

const IO_BUFFER_SIZE: usize = 64 * 1024;

/// [`MediaStore`] backed by any S3-compatible service (AWS, Wasabi, MinIO).
///
/// Uses path-style addressing and carries its own connection pool; cheap to
/// clone and share. SDK-level retry is disabled so the retry ceiling is
/// enforced in exactly one place (the adapter).
#[derive(Clone)]
pub struct S3MediaStore {
    client: Client,
    bucket: String,
}

impl S3MediaStore {
    /// Connect using explicit configuration.
    ///
    /// Static credentials are used when present in the config; otherwise the
    /// ambient AWS credential chain applies.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        let builder = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key), Some(secret)) => {
                let credentials =
                    Credentials::new(key.clone(), secret.clone(), None, None, "vidgate-store");
                aws_sdk_s3::config::Builder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .credentials_provider(credentials)
            }
            (None, None) => {
                let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
            _ => {
                return Err(StoreError::config(
                    "access_key_id and secret_access_key must be set together",
                ))
            }
        };

        let mut builder = builder
            .retry_config(RetryConfig::disabled())
            .force_path_style(true);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket,
        })
    }

    /// Bucket this store reads from
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn head(&self, key: &str) -> StoreResult<ObjectMeta> {
        let out = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| classify_sdk_error(key, err))?;

        Ok(ObjectMeta {
            size_bytes: out.content_length().unwrap_or(0).max(0) as u64,
            content_type: out.content_type().map(str::to_string),
            etag: out.e_tag().map(str::to_string),
            last_modified: out.last_modified().map(|t| t.secs()),
        })
    }

    async fn get(&self, key: &str, range: Option<ByteRange>) -> StoreResult<ByteStream> {
        let mut request = self.client.get_object().bucket(&self.bucket).key(key);
        if let Some(range) = range {
            request = request.range(range.to_header_value());
        }
        let out = request
            .send()
            .await
            .map_err(|err| classify_sdk_error(key, err))?;

        let reader = out.body.into_async_read();
        Ok(Box::pin(ReaderStream::with_capacity(reader, IO_BUFFER_SIZE)))
    }

    async fn list(&self, prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(prefix.map(str::to_string))
            .into_paginator()
            .send();

        let mut entries = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| classify_sdk_error(prefix.unwrap_or_default(), err))?;
            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                entries.push(ObjectEntry {
                    key: key.to_string(),
                    size_bytes: object.size().unwrap_or(0).max(0) as u64,
                    last_modified: object.last_modified().map(|t| t.secs()),
                });
            }
        }
        Ok(entries)
    }

    async fn sign_get(&self, key: &str, expires_in_secs: u64) -> StoreResult<String> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))
            .map_err(StoreError::backend)?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|err| classify_sdk_error(key, err))?;
        Ok(request.uri().to_string())
    }
}

/// Translate an SDK failure into the store error taxonomy.
///
/// Service responses are classified by HTTP status first (HEAD failures
/// carry no parseable body, only the status); timeouts and connector
/// failures are the transient class.
fn classify_sdk_error<E>(key: &str, err: SdkError<E>) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    if let SdkError::ServiceError(context) = &err {
        match context.raw().status().as_u16() {
            404 => return StoreError::not_found(key),
            403 => return StoreError::access_denied(key),
            _ => {}
        }
    }
    match err {
        SdkError::TimeoutError(_) => StoreError::Timeout,
        err @ SdkError::DispatchFailure(_) => StoreError::Transport {
            source: Box::new(err),
        },
        err => StoreError::backend(err),
    }
}
