//! # vidgate-store: object storage layer for the vidgate media gateway
//!
//! `vidgate-store` talks to an S3-compatible backend (AWS, Wasabi, MinIO) on
//! behalf of the streaming gateway. It owns the concerns the HTTP layer
//! should never see: SDK configuration, path-style addressing, fault
//! classification, bounded retry, and per-call timeouts.
//!
//! ## Key pieces
//!
//! - [`MediaStore`]: the storage trait - metadata, ranged reads, listing,
//!   signed URLs. Implement it to substitute a backend in tests.
//! - [`S3MediaStore`]: the production implementation over `aws-sdk-s3`.
//! - [`MediaAdapter`]: what services embed. Adds the call policy (retry
//!   ceiling for transient faults, op timeouts) on top of any store.
//!
//! ## Quick start
//!
//! ```no_run
//! use vidgate_store::{AdapterConfig, MediaAdapter, S3MediaStore, StoreConfig};
//!
//! # async fn run() -> Result<(), vidgate_store::StoreError> {
//! let config = StoreConfig::from_env()?;
//! let store = S3MediaStore::connect(config).await?;
//! let adapter = MediaAdapter::new(store, AdapterConfig::from_env());
//!
//! let meta = adapter.metadata("videos/clip.mp4").await?;
//! println!("{} bytes", meta.size_bytes);
//! # Ok(())
//! # }
//! ```

mod adapter;
mod config;
mod error;
mod s3_store;
pub mod store;
mod types;

// Re-export main types for clean API
pub use adapter::MediaAdapter;
pub use config::{AdapterConfig, RetryPolicy, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use s3_store::S3MediaStore;
pub use store::MediaStore;
pub use types::{ByteRange, ByteStream, ObjectEntry, ObjectMeta};
