use std::sync::Arc;

use vidgate_store::{MediaAdapter, StoreError};

use crate::GatewayError;

/// Shared state for all gateway handlers.
///
/// The adapter (and the backend connection pool behind it) is the only
/// resource shared between concurrent requests; everything else is
/// per-request.
#[derive(Clone)]
pub struct GatewayState {
    pub adapter: Arc<MediaAdapter>,
    pub settings: GatewaySettings,
}

impl GatewayState {
    pub fn new(adapter: MediaAdapter, settings: GatewaySettings) -> Self {
        Self {
            adapter: Arc::new(adapter),
            settings,
        }
    }

    /// Map a store fault, attaching diagnostics outside production
    pub fn store_fault(&self, err: StoreError) -> GatewayError {
        GatewayError::from_store(err, !self.settings.production)
    }

    /// Diagnostic string for 500-class bodies, gated on production mode
    pub fn detail<E: std::fmt::Display>(&self, err: &E) -> Option<String> {
        (!self.settings.production).then(|| err.to_string())
    }
}

/// Tunables for the HTTP surface
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Production mode strips diagnostic details from error bodies
    pub production: bool,

    /// `Cache-Control: public, max-age=<this>` on stream responses
    pub cache_max_age_secs: u32,

    /// Expiry for the signed URLs embedded in listings
    pub list_url_ttl_secs: u64,

    /// Expiry for URLs from the dedicated signing endpoint
    pub signed_url_ttl_secs: u64,

    /// Key prefix the listing endpoint enumerates
    pub list_prefix: Option<String>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            production: false,
            cache_max_age_secs: 3600,
            list_url_ttl_secs: 3600,
            signed_url_ttl_secs: 3 * 3600,
            list_prefix: None,
        }
    }
}

impl GatewaySettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment
    /// (`APP_ENV`, `S3_FOLDER_NAME`).
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.production = std::env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        if let Ok(prefix) = std::env::var("S3_FOLDER_NAME") {
            if !prefix.is_empty() {
                settings.list_prefix = Some(prefix);
            }
        }
        settings
    }

    /// Enable production mode
    pub fn production(mut self) -> Self {
        self.production = true;
        self
    }

    /// Set the listing prefix
    pub fn with_list_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.list_prefix = Some(prefix.into());
        self
    }

    /// Set the stream response cache lifetime
    pub fn with_cache_max_age(mut self, secs: u32) -> Self {
        self.cache_max_age_secs = secs;
        self
    }
}
