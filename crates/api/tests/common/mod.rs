//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! `main.rs` (CORS, request ID, timeout, tracing, panic recovery), but with
//! a fake generation backend and a temp uploads directory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use gamecraft_api::auth::AllowAll;
use gamecraft_api::config::ServerConfig;
use gamecraft_api::state::AppState;
use gamecraft_api::{handlers, routes};
use gamecraft_core::publish::Publisher;
use gamecraft_core::uploads::UploadStore;
use gamecraft_generator::{GameGenerator, GeneratorError};

/// Public base URL used by test configs.
pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Fake generation backend with scripted behaviour.
pub enum FakeGenerator {
    /// Returns a well-formed fenced document that embeds the prompt and the
    /// baseline, so tests can assert on both.
    Valid,
    /// Returns prose with no HTML code block.
    Unusable,
    /// Fails like an upstream API error.
    Fail,
}

#[async_trait]
impl GameGenerator for FakeGenerator {
    async fn generate(
        &self,
        prompt: &str,
        baseline_html: &str,
        _owner_key: &str,
    ) -> Result<String, GeneratorError> {
        match self {
            FakeGenerator::Valid => Ok(format!(
                "Here you go:\n```html\n<!DOCTYPE html>\n<html><head><title>{prompt}</title></head>\
                 <body><div id=\"game-container\">{prompt}</div>\
                 <!-- baseline was: {baseline_html} --></body></html>\n```"
            )),
            FakeGenerator::Unusable => Ok("I'm sorry, I cannot build that game.".to_string()),
            FakeGenerator::Fail => Err(GeneratorError::Api {
                status: 500,
                body: "model unavailable".to_string(),
            }),
        }
    }
}

/// A fully wired test application.
///
/// Keep the struct alive for the duration of the test: dropping it removes
/// the temp uploads directory.
pub struct TestApp {
    router: Router,
    pub uploads_dir: tempfile::TempDir,
}

impl TestApp {
    /// A fresh clone of the router, ready for `oneshot`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Path of the owner's published artifact.
    pub fn artifact_path(&self, owner_key: &str) -> std::path::PathBuf {
        self.uploads_dir.path().join(owner_key).join("game.html")
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(uploads_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_BASE_URL.to_string()],
        request_timeout_secs: 30,
        uploads_dir: uploads_dir.to_path_buf(),
        public_base_url: TEST_BASE_URL.to_string(),
        generator_model: "fake-model".to_string(),
    }
}

/// Build the application with the default (valid-output) fake generator.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, Arc::new(FakeGenerator::Valid))
}

/// Build the application with a specific generation backend.
pub fn build_test_app_with(pool: PgPool, generator: Arc<dyn GameGenerator>) -> TestApp {
    let uploads_dir = tempfile::TempDir::new().expect("temp uploads dir");
    let config = test_config(uploads_dir.path());

    let state = AppState {
        pool,
        config: Arc::new(config),
        generator,
        publisher: Arc::new(Publisher::new(uploads_dir.path(), TEST_BASE_URL)),
        uploads: Arc::new(UploadStore::new(uploads_dir.path())),
        access: Arc::new(AllowAll),
    };

    let cors = CorsLayer::new()
        .allow_origin([TEST_BASE_URL.parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .route(
            "/uploads/{owner_key}/{filename}",
            axum::routing::get(handlers::uploads::serve_file),
        )
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    TestApp { router, uploads_dir }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn patch_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PATCH)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
