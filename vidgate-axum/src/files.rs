use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vidgate_store::StoreError;

use crate::{GatewayError, GatewayState};

/// One listed object with its time-limited direct link
#[derive(Debug, Serialize)]
pub struct FileLink {
    pub key: String,
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

#[derive(Debug, Serialize)]
pub struct FileListing {
    pub files: Vec<FileLink>,
}

/// `GET /api/files` - enumerate objects under the configured prefix and
/// attach a signed GET URL to each.
pub async fn list_files(
    State(state): State<GatewayState>,
) -> Result<Json<FileListing>, GatewayError> {
    let prefix = state.settings.list_prefix.as_deref();
    let entries = state.adapter.list(prefix).await.map_err(|err| match err {
        StoreError::NotFound { .. } => GatewayError::BucketMissing,
        err => GatewayError::Listing {
            detail: state.detail(&err),
        },
    })?;

    // Prefix placeholders list as zero-byte objects named like directories
    let entries: Vec<_> = entries
        .into_iter()
        .filter(|entry| !(entry.size_bytes == 0 && entry.key.ends_with('/')))
        .collect();

    if entries.is_empty() {
        return Err(GatewayError::EmptyListing);
    }

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let signed_url = state
            .adapter
            .sign_get(&entry.key, state.settings.list_url_ttl_secs)
            .await
            .map_err(|err| GatewayError::Listing {
                detail: state.detail(&err),
            })?;
        files.push(FileLink {
            key: entry.key,
            signed_url,
        });
    }

    tracing::info!(count = files.len(), "listed objects");
    Ok(Json(FileListing { files }))
}

#[derive(Debug, Deserialize)]
pub struct SignQuery {
    pub file: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignedUrl {
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

/// `GET /api/getSignedUrl?file=<key>` - issue one time-limited direct URL.
pub async fn signed_url(
    State(state): State<GatewayState>,
    Query(query): Query<SignQuery>,
) -> Result<Json<SignedUrl>, GatewayError> {
    let key = query
        .file
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(GatewayError::MissingKey)?;

    let signed_url = state
        .adapter
        .sign_get(key, state.settings.signed_url_ttl_secs)
        .await
        .map_err(|err| GatewayError::SignUrl {
            detail: state.detail(&err),
        })?;

    tracing::info!(key, "issued signed URL");
    Ok(Json(SignedUrl { signed_url }))
}
