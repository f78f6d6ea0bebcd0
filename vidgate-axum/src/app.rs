use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{files, stream, GatewayState};

/// Assemble the gateway router.
///
/// CORS is attached unconditionally so cross-origin `<video>` embedding
/// works; the layer also short-circuits OPTIONS preflights with an empty
/// 200. Methods other than GET/HEAD land on the JSON 405 fallback.
pub fn router(state: GatewayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::RANGE, header::CONTENT_TYPE])
        .expose_headers([
            header::CONTENT_RANGE,
            header::CONTENT_LENGTH,
            header::ACCEPT_RANGES,
        ]);

    Router::new()
        .route(
            "/api/stream",
            get(stream::stream_object)
                .options(stream::options_ok)
                .fallback(stream::method_not_allowed),
        )
        .route(
            "/api/files",
            get(files::list_files)
                .options(stream::options_ok)
                .fallback(stream::method_not_allowed),
        )
        .route(
            "/api/getSignedUrl",
            get(files::signed_url)
                .options(stream::options_ok)
                .fallback(stream::method_not_allowed),
        )
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn listen<A>(addr: A, router: Router) -> anyhow::Result<()>
where
    A: ToSocketAddrs,
{
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
