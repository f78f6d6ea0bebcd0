use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::Response;
use futures_util::TryStreamExt;
use serde::Deserialize;
use vidgate_store::ByteRange;

use crate::media_type::content_type_for;
use crate::range::{negotiate, parse_range_header, RangeOutcome};
use crate::{GatewayError, GatewayState};

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Object key; percent-decoded exactly once, by the extractor
    pub file: Option<String>,
}

/// The stream pump: one request in, one full or partial body out.
///
/// The order here is load-bearing: metadata resolution precedes the range
/// decision, which precedes header emission, which precedes body streaming -
/// every header value depends on something decided before it.
pub async fn stream_object(
    State(state): State<GatewayState>,
    method: Method,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let key = query
        .file
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(GatewayError::MissingFile)?;

    let meta = state
        .adapter
        .metadata(key)
        .await
        .map_err(|err| state.store_fault(err))?;

    let requested = parse_range_header(headers.get(header::RANGE).and_then(|v| v.to_str().ok()));
    let outcome = negotiate(requested, meta.size_bytes);

    let (status, range) = match outcome {
        RangeOutcome::Unsatisfiable { size } => {
            tracing::info!(key, size, "requested range outside object bounds");
            return Err(GatewayError::RangeNotSatisfiable);
        }
        RangeOutcome::Full { .. } => (StatusCode::OK, None),
        RangeOutcome::Partial { start, end, .. } => {
            (StatusCode::PARTIAL_CONTENT, Some(ByteRange::new(start, end)))
        }
    };
    let content_length = outcome.content_length();

    // The serving type comes from the extension, never from the backend;
    // stored types are unreliable for video uploads.
    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type_for(key))
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_LENGTH, content_length)
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.settings.cache_max_age_secs),
        )
        .header(header::CONTENT_DISPOSITION, "inline");
    if let RangeOutcome::Partial { start, end, size } = outcome {
        builder = builder.header(header::CONTENT_RANGE, format!("bytes {start}-{end}/{size}"));
    }

    let body = if method == Method::HEAD {
        // HEAD carries the negotiated headers and nothing else; the backend
        // body is never opened.
        Body::empty()
    } else {
        let stream = state
            .adapter
            .open(key, range)
            .await
            .map_err(|err| state.store_fault(err))?;

        // Past this point the status line is flushed: a fault can only
        // abort the connection and be logged, never rewrite the response.
        let log_key = key.to_string();
        let stream = stream.inspect_err(move |err| {
            tracing::warn!(key = %log_key, error = %err, "stream aborted after headers were sent");
        });
        Body::from_stream(stream)
    };

    tracing::info!(
        key,
        status = status.as_u16(),
        content_length,
        "serving object"
    );

    builder.body(body).map_err(|err| GatewayError::Upstream {
        detail: state.detail(&err),
    })
}

/// JSON 405 for methods the API endpoints do not accept
pub async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

/// Terminal 200 for bare OPTIONS probes; real preflights are answered by
/// the CORS layer before they reach this handler.
pub async fn options_ok() -> StatusCode {
    StatusCode::OK
}
