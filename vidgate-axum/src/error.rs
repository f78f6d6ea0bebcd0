use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use vidgate_store::StoreError;

/// Gateway fault taxonomy; every variant maps to one HTTP status and one
/// stable client-facing message.
///
/// The `detail` fields carry backend diagnostics and are populated by the
/// handlers only in non-production mode - production responses expose the
/// stable message alone.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("file parameter is required")]
    MissingFile,

    #[error("file key is missing")]
    MissingKey,

    #[error("object not found")]
    NotFound,

    #[error("access to the object was denied")]
    AccessDenied,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("requested range not satisfiable")]
    RangeNotSatisfiable,

    #[error("no objects under the configured prefix")]
    EmptyListing,

    #[error("bucket does not exist")]
    BucketMissing,

    #[error("listing failed")]
    Listing { detail: Option<String> },

    #[error("signed URL issue failed")]
    SignUrl { detail: Option<String> },

    #[error("upstream store failure")]
    Upstream { detail: Option<String> },
}

/// JSON error body: stable `error` message, optional diagnostic `details`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GatewayError {
    /// Map a store fault onto the gateway taxonomy.
    ///
    /// `verbose` attaches the backend diagnostic; pass `false` in
    /// production so backend topology never leaks to clients.
    pub fn from_store(err: StoreError, verbose: bool) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::AccessDenied { .. } => Self::AccessDenied,
            err => Self::Upstream {
                detail: verbose.then(|| err.to_string()),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::MissingKey => StatusCode::BAD_REQUEST,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::NotFound | Self::EmptyListing | Self::BucketMissing => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RangeNotSatisfiable => StatusCode::RANGE_NOT_SATISFIABLE,
            Self::Listing { .. } | Self::SignUrl { .. } | Self::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The stable message clients can match on
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingFile => "File parameter is required",
            Self::MissingKey => "Missing file key",
            Self::NotFound => "File not found",
            Self::AccessDenied => "Access denied",
            Self::MethodNotAllowed => "Method not allowed",
            Self::RangeNotSatisfiable => "Requested range not satisfiable",
            Self::EmptyListing => "No files found in the specified folder",
            Self::BucketMissing => "Bucket does not exist",
            Self::Listing { .. } => "Failed to retrieve files",
            Self::SignUrl { .. } => "Failed to generate signed URL",
            Self::Upstream { .. } => "Failed to stream file",
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Listing { detail } | Self::SignUrl { detail } | Self::Upstream { detail } => {
                detail.clone()
            }
            _ => None,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
            details: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}
