use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::context::{GlossService, TranslationOutcome};
use crate::landmarks::Frame;
use crate::telemetry::{self, DiagnosticError, TelemetrySnapshot};

/// Upper bound on request bodies; long captures of full pose + hands add up.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub service: Arc<GlossService>,
}

impl HttpState {
    pub fn new(service: Arc<GlossService>) -> Self {
        Self { service }
    }
}

/// Request payload for `/api/translate`.
///
/// A missing or `null` frame list is treated the same as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub frames: Option<Vec<Frame>>,
}

/// HTTP error variants mapped to JSON responses.
#[derive(Debug)]
pub enum HttpServerError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Health endpoint response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub signatures: usize,
    pub translator: &'static str,
}

/// Build the Axum router with all handlers.
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/api/health", get(health))
        .route("/api/metrics", get(metrics))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP server loop until Ctrl-C.
pub async fn run_http_server(service: Arc<GlossService>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding HTTP listener on {addr}"))?;
    tracing::info!("Gloss HTTP server listening on {}", addr);

    let router = build_router(HttpState::new(service));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP router")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn translate(
    State(state): State<HttpState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslationOutcome>, HttpServerError> {
    let Json(request) = payload.map_err(|rejection| {
        let message = rejection.body_text();
        tracing::warn!("Rejected translate payload: {}", message);
        telemetry::hub().record_error(DiagnosticError::InvalidRequest, message.clone());
        HttpServerError::BadRequest(message)
    })?;

    let frames = match request.frames {
        Some(frames) if !frames.is_empty() => frames,
        _ => {
            telemetry::hub().record_error(DiagnosticError::InvalidRequest, "empty frame list");
            return Err(HttpServerError::BadRequest("No frames provided".to_string()));
        }
    };

    let service = Arc::clone(&state.service);
    let outcome = tokio::task::spawn_blocking(move || service.translate_frames(&frames))
        .await
        .map_err(|err| HttpServerError::Internal(format!("recognition task failed: {err}")))?;

    Ok(Json(outcome))
}

pub async fn health(State(state): State<HttpState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Sign Language API is running",
        signatures: state.service.signature_count(),
        translator: state.service.translator_name(),
    })
}

pub async fn metrics() -> Json<TelemetrySnapshot> {
    Json(telemetry::hub().snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{HandShape, SequenceRecognizer};
    use crate::signatures::{GestureSignature, SignatureDatabase, SignatureFeatures};
    use crate::translation::SimpleTranslator;
    use axum::body::{to_bytes, Body};
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN,
    };
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn make_router() -> Router {
        let db = SignatureDatabase::from_signatures(vec![GestureSignature::new(
            "YES",
            SignatureFeatures {
                hand_shape: Some(HandShape::Fist),
                two_hands: Some(false),
                ..SignatureFeatures::default()
            },
        )]);
        let service = GlossService::new(
            SequenceRecognizer::with_defaults(Arc::new(db)),
            Box::new(SimpleTranslator::new()),
        );
        build_router(HttpState::new(Arc::new(service)))
    }

    async fn response_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body bytes");
        let json = serde_json::from_slice::<Value>(&bytes).expect("JSON body");
        (status, json)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("translate request")
    }

    /// Frames in the capture client's array-of-arrays format
    fn fist_frames_json(count: usize) -> String {
        let hand = vec![[0.4, 0.5, 0.2]; 21];
        let frame = serde_json::json!({
            "timestamp": 1234567890,
            "frame_id": 1,
            "pose_landmarks": vec![[0.5, 0.3, 0.1]; 33],
            "left_hand": hand,
        });
        serde_json::json!({ "frames": vec![frame; count] }).to_string()
    }

    #[tokio::test]
    async fn health_reports_signature_count() {
        let (status, json) = response_json(
            make_router()
                .oneshot(
                    Request::builder()
                        .uri("/api/health")
                        .body(Body::empty())
                        .expect("health request"),
                )
                .await
                .expect("health call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["signatures"], 1);
        assert_eq!(json["translator"], "simple");
    }

    #[tokio::test]
    async fn translate_recognizes_frames() {
        let (status, json) = response_json(
            make_router()
                .oneshot(post_json("/api/translate", fist_frames_json(30)))
                .await
                .expect("translate call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["words"], serde_json::json!(["YES"]));
        assert_eq!(json["translation"], "Yes.");
        assert_eq!(json["frame_count"], 30);
        assert_eq!(json["windows_considered"], 3);
        assert_eq!(json["fallback"], false);
    }

    #[tokio::test]
    async fn translate_short_input_uses_fallback() {
        let (status, json) = response_json(
            make_router()
                .oneshot(post_json("/api/translate", fist_frames_json(3)))
                .await
                .expect("translate call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["words"], serde_json::json!(["HELLO"]));
        assert_eq!(json["fallback"], true);
        assert_eq!(json["confidence"], 0.0);
    }

    #[tokio::test]
    async fn translate_rejects_empty_frames() {
        for body in [r#"{ "frames": [] }"#, r#"{ "frames": null }"#, "{}"] {
            let (status, json) = response_json(
                make_router()
                    .oneshot(post_json("/api/translate", body.to_string()))
                    .await
                    .expect("translate call"),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "No frames provided");
        }
    }

    #[tokio::test]
    async fn translate_accepts_pose_visibility_and_fractional_timestamps() {
        let hand = vec![[0.4, 0.5, 0.2]; 21];
        let frame = serde_json::json!({
            "timestamp": 16.667,
            "pose_landmarks": vec![[0.5, 0.3, 0.1, 0.99]; 33],
            "left_hand": hand,
        });
        let body = serde_json::json!({ "frames": vec![frame; 10] }).to_string();

        let (status, json) = response_json(
            make_router()
                .oneshot(post_json("/api/translate", body))
                .await
                .expect("translate call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["words"], serde_json::json!(["YES"]));
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed() {
        let response = make_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .expect("health request"),
            )
            .await
            .expect("health call");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn cors_preflight_allows_translate_post() {
        let response = make_router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/translate")
                    .header(ORIGIN, "http://localhost:3000")
                    .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .expect("preflight request"),
            )
            .await
            .expect("preflight call");

        assert!(response.status().is_success());
        assert!(response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(response.headers().contains_key(ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn translate_rejects_malformed_json() {
        let (status, json) = response_json(
            make_router()
                .oneshot(post_json("/api/translate", "{ \"frames\": [".to_string()))
                .await
                .expect("translate call"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn metrics_return_snapshot() {
        let router = make_router();
        let _ = router
            .clone()
            .oneshot(post_json("/api/translate", fist_frames_json(10)))
            .await
            .expect("translate call");

        let (status, json) = response_json(
            router
                .oneshot(
                    Request::builder()
                        .uri("/api/metrics")
                        .body(Body::empty())
                        .expect("metrics request"),
                )
                .await
                .expect("metrics call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["recent"].is_array());
        assert!(json["recognitions"].as_u64().unwrap_or_default() >= 1);
    }
}
