use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vidgate_axum::{router, GatewaySettings, GatewayState};
use vidgate_store::{
    AdapterConfig, ByteRange, ByteStream, MediaAdapter, MediaStore, ObjectEntry, ObjectMeta,
    StoreError, StoreResult,
};

/// Backend exposing only the listing/signing side of the store
struct ListingStore {
    entries: Vec<ObjectEntry>,
    fail_list: bool,
}

impl ListingStore {
    fn with_keys(keys: &[&str]) -> Self {
        Self {
            entries: keys
                .iter()
                .map(|key| ObjectEntry {
                    key: key.to_string(),
                    size_bytes: if key.ends_with('/') { 0 } else { 1024 },
                    last_modified: None,
                })
                .collect(),
            fail_list: false,
        }
    }

    fn failing() -> Self {
        Self {
            entries: Vec::new(),
            fail_list: true,
        }
    }
}

#[async_trait]
impl MediaStore for ListingStore {
    async fn head(&self, key: &str) -> StoreResult<ObjectMeta> {
        Err(StoreError::not_found(key))
    }

    async fn get(&self, key: &str, _range: Option<ByteRange>) -> StoreResult<ByteStream> {
        Err(StoreError::not_found(key))
    }

    async fn list(&self, prefix: Option<&str>) -> StoreResult<Vec<ObjectEntry>> {
        if self.fail_list {
            return Err(StoreError::Timeout);
        }
        let prefix = prefix.unwrap_or_default();
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn sign_get(&self, key: &str, expires_in_secs: u64) -> StoreResult<String> {
        Ok(format!("https://signed.example/{key}?expires={expires_in_secs}"))
    }
}

fn app_with(store: ListingStore, settings: GatewaySettings) -> Router {
    let adapter = MediaAdapter::new(store, AdapterConfig::default());
    router(GatewayState::new(adapter, settings))
}

fn app(store: ListingStore) -> Router {
    app_with(store, GatewaySettings::default())
}

async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn listing_returns_a_signed_url_per_object() {
    let app = app(ListingStore::with_keys(&["videos/a.mp4", "videos/b.webm"]));

    let res = get(app, "/api/files").await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["key"], "videos/a.mp4");
    assert!(files[0]["signedUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://signed.example/videos/a.mp4"));
}

#[tokio::test]
async fn empty_listing_is_404() {
    let app = app(ListingStore::with_keys(&[]));

    let res = get(app, "/api/files").await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["error"], "No files found in the specified folder");
}

#[tokio::test]
async fn folder_placeholders_do_not_count_as_files() {
    let app = app(ListingStore::with_keys(&["videos/"]));

    let res = get(app, "/api/files").await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_respects_the_configured_prefix() {
    let store = ListingStore::with_keys(&["videos/a.mp4", "other/b.mp4"]);
    let app = app_with(
        store,
        GatewaySettings::default().with_list_prefix("videos/"),
    );

    let res = get(app, "/api/files").await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["key"], "videos/a.mp4");
}

#[tokio::test]
async fn listing_failure_is_500_with_details_in_dev() {
    let app = app(ListingStore::failing());

    let res = get(app, "/api/files").await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Failed to retrieve files");
    assert!(body.get("details").is_some());
}

#[tokio::test]
async fn production_mode_strips_details() {
    let app = app_with(ListingStore::failing(), GatewaySettings::new().production());

    let res = get(app, "/api/files").await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Failed to retrieve files");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn signed_url_for_a_key() {
    let app = app(ListingStore::with_keys(&[]));

    let res = get(app, "/api/getSignedUrl?file=videos/a.mp4").await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    // 3 hour expiry, matching the player's buffering horizon
    assert_eq!(
        body["signedUrl"],
        "https://signed.example/videos/a.mp4?expires=10800"
    );
}

#[tokio::test]
async fn signed_url_without_a_key_is_400() {
    let app = app(ListingStore::with_keys(&[]));

    let res = get(app, "/api/getSignedUrl").await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Missing file key");
}

#[tokio::test]
async fn non_get_methods_are_405() {
    for uri in ["/api/files", "/api/getSignedUrl?file=a.mp4"] {
        let app = app(ListingStore::with_keys(&["videos/a.mp4"]));
        let res = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "uri: {uri}");
        let body = json_body(res).await;
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn health_answers_ok() {
    let app = app(ListingStore::with_keys(&[]));

    let res = get(app, "/health").await;

    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}
