//! HTTP gateway for the ImageClass frontend.
//!
//! Serves the built frontend, checks uploads and forwards them to the
//! upstream prediction service.
//!
//! # API Endpoints
//!
//! | Method | Path        | Description                               |
//! |--------|-------------|-------------------------------------------|
//! | GET    | `/health`   | Upstream model health                     |
//! | POST   | `/predict`  | Upload an image (`image` multipart part)  |
//! | GET    | `/*`        | Static frontend files                     |

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, services::ServeDir};
use uuid::Uuid;

use super::types::{error_response, PredictReply};
use crate::client::{HealthStatus, PredictionClient, IMAGE_FIELD};
use crate::config::GatewayConfig;
use crate::error::{ServerResult, UploadError, UploadResult};
use crate::models::ImageUpload;
use crate::validation::{allowed_file, content_type_for, validate_upload};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub client: PredictionClient,
    pub config: Arc<GatewayConfig>,
}

/// Build the gateway router.
pub fn router(config: GatewayConfig) -> Router {
    // Permissive CORS for the dev server on another port
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let body_limit = (config.max_upload_bytes + MULTIPART_OVERHEAD) as usize;
    let static_files = ServeDir::new(&config.static_dir);
    let state = AppState {
        client: PredictionClient::new(&config.upstream_url),
        config: Arc::new(config),
    };

    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: GatewayConfig) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("🚀 ImageClass gateway running on http://localhost:{}", config.port);
    log::info!("   POST /predict - Classify an image");
    log::info!("   GET  /health  - Model health");
    log::info!("   GET  /        - Frontend from {}", config.static_dir.display());
    log::info!("📡 Forwarding predictions to {}", config.upstream_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(config)).await?;

    Ok(())
}

/// Load [`GatewayConfig`] from the environment and start the server.
pub async fn serve_from_env(port: Option<u16>) -> ServerResult<()> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    start_server(config).await
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    match state.client.health().await {
        Ok(status) => Json(status),
        Err(e) => {
            log::warn!("⚠️ Health check failed: {}", e);
            Json(HealthStatus::error(format!("Prediction service unreachable: {}", e)))
        }
    }
}

/// Prediction endpoint
async fn predict(State(state): State<AppState>, multipart: Multipart) -> PredictReply {
    let request_id = Uuid::new_v4();

    let upload = match read_upload(multipart, state.config.max_upload_bytes).await {
        Ok(upload) => upload,
        Err(e) => {
            log::warn!("[{}] ⚠️ Rejected upload: {}", request_id, e);
            return error_response(e.status_code(), e.to_string());
        }
    };

    log::info!(
        "[{}] 📄 {} ({} bytes, {})",
        request_id,
        upload.file_name,
        upload.bytes.len(),
        upload.content_type
    );

    match state.client.predict(&upload).await {
        Ok(reply) if reply.body.success => {
            let body = reply.body.ranked(state.config.top_k);
            log::info!(
                "[{}] ✅ {} ({:.2}%)",
                request_id,
                body.prediction.as_deref().unwrap_or("?"),
                body.confidence.unwrap_or_default()
            );
            (StatusCode::OK, Json(body))
        }
        Ok(reply) => {
            log::warn!(
                "[{}] ❌ Upstream refused ({}): {}",
                request_id,
                reply.status,
                reply.body.error.as_deref().unwrap_or("no message")
            );
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(reply.body))
        }
        Err(e) => {
            log::error!("[{}] ❌ Upstream error: {}", request_id, e);
            error_response(
                StatusCode::BAD_GATEWAY,
                format!("An error occurred during prediction: {}", e),
            )
        }
    }
}

/// Pull the `image` part out of the multipart body and check it.
async fn read_upload(mut multipart: Multipart, limit: u64) -> UploadResult<ImageUpload> {
    let read_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge { limit }
        } else {
            UploadError::Unreadable(e.body_text())
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let declared_type = field.content_type().map(str::to_string);

        // Check the name before buffering the body
        if file_name.is_empty() {
            return Err(UploadError::EmptyFileName);
        }
        if !allowed_file(&file_name) {
            return Err(UploadError::InvalidType);
        }

        let bytes = field.bytes().await.map_err(read_error)?;
        validate_upload(&file_name, bytes.len() as u64, limit)?;

        let content_type = declared_type
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or_else(|| content_type_for(&file_name).to_string());

        return Ok(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(UploadError::MissingImage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body, Bytes};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "imageclass-test-boundary";

    fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn predict_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Serve a fixed `/predict` and `/health` reply on an ephemeral port.
    async fn spawn_upstream(status: StatusCode, reply: Value) -> String {
        let health = json!({"status": "healthy", "model_status": "Model already loaded"});
        let app = Router::new()
            .route(
                "/predict",
                post(move |_body: Bytes| {
                    let reply = reply.clone();
                    async move { (status, Json(reply)) }
                }),
            )
            .route(
                "/health",
                get(move || {
                    let health = health.clone();
                    async move { Json(health) }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn gateway(upstream: &str) -> Router {
        router(GatewayConfig::default().with_upstream(upstream))
    }

    #[tokio::test]
    async fn test_predict_ranks_and_truncates() {
        let upstream = spawn_upstream(
            StatusCode::OK,
            json!({
                "success": true,
                "prediction": "cat",
                "confidence": 81.5,
                "all_predictions": [
                    {"class": "dog", "confidence": 10.0},
                    {"class": "cat", "confidence": 81.5},
                    {"class": "frog", "confidence": 0.5},
                    {"class": "deer", "confidence": 8.0}
                ]
            }),
        )
        .await;

        let body = multipart_body("image", "cat.png", "image/png", b"\x89PNG");
        let response = gateway(&upstream).oneshot(predict_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["prediction"], "cat");
        let classes: Vec<&str> = json["all_predictions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["class"].as_str().unwrap())
            .collect();
        assert_eq!(classes, vec!["cat", "dog", "deer"]);
    }

    #[tokio::test]
    async fn test_predict_passes_upstream_failure_through() {
        let upstream = spawn_upstream(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"success": false, "error": "model unavailable"}),
        )
        .await;

        let body = multipart_body("image", "cat.jpg", "image/jpeg", b"\xff\xd8");
        let response = gateway(&upstream).oneshot(predict_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = json_body(response).await;
        assert_eq!(json, json!({"success": false, "error": "model unavailable"}));
    }

    #[tokio::test]
    async fn test_predict_rejects_wrong_extension() {
        let body = multipart_body("image", "notes.txt", "text/plain", b"hello");
        let response = gateway("http://127.0.0.1:9")
            .oneshot(predict_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "Invalid file type. Please upload PNG, JPG, JPEG, GIF, BMP, or WEBP files."
        );
    }

    #[tokio::test]
    async fn test_predict_requires_image_field() {
        let body = multipart_body("file", "cat.png", "image/png", b"\x89PNG");
        let response = gateway("http://127.0.0.1:9")
            .oneshot(predict_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No image file provided");
    }

    #[tokio::test]
    async fn test_predict_requires_file_name() {
        let body = multipart_body("image", "", "image/png", b"\x89PNG");
        let response = gateway("http://127.0.0.1:9")
            .oneshot(predict_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No file selected");
    }

    #[tokio::test]
    async fn test_predict_upstream_unreachable() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let body = multipart_body("image", "ship.bmp", "image/bmp", b"BM");
        let response = gateway(&format!("http://{}", addr))
            .oneshot(predict_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("An error occurred during prediction:"));
    }

    #[tokio::test]
    async fn test_health_reports_upstream() {
        let upstream = spawn_upstream(StatusCode::OK, json!({"success": true})).await;

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = gateway(&upstream).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["model_status"], "Model already loaded");
    }

    #[tokio::test]
    async fn test_health_when_upstream_down() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = gateway(&format!("http://{}", addr)).oneshot(request).await.unwrap();

        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
    }

    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    async fn predict_with_size(size: usize) -> (StatusCode, Value) {
        let upstream = closed_port_url().await;
        let body = multipart_body("image", "a.png", "image/png", &vec![0u8; size]);
        let response = gateway(&upstream).oneshot(predict_request(body)).await.unwrap();
        let status = response.status();
        (status, json_body(response).await)
    }

    #[tokio::test]
    async fn test_predict_rejects_one_byte_over_limit() {
        let limit = GatewayConfig::default().max_upload_bytes as usize;

        let (status, json) = predict_with_size(limit + 1).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            json,
            json!({"success": false, "error": "File size must be less than 16MB."})
        );
    }

    #[tokio::test]
    async fn test_predict_rejects_body_over_request_limit() {
        // Past the multipart allowance, so the body limit layer trips first
        let limit = GatewayConfig::default().max_upload_bytes as usize;

        let (status, json) = predict_with_size(limit + 1024 * 1024).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            json,
            json!({"success": false, "error": "File size must be less than 16MB."})
        );
    }

    #[tokio::test]
    async fn test_predict_accepts_exact_limit() {
        let limit = GatewayConfig::default().max_upload_bytes as usize;

        let (status, json) = predict_with_size(limit).await;
        // Checks pass and the request reaches the (closed) upstream
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("An error occurred during prediction:"));
    }
}
