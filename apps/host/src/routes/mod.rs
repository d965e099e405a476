pub mod health;
pub mod index;

use axum::{http::Uri, routing::get, Router};
use tower_http::services::ServeDir;

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    Router::new()
        .route("/", get(index::index_handler))
        .route("/ping", get(health::ping_handler))
        .nest_service("/static", static_files)
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn test_state() -> AppState {
        AppState::new(Config {
            port: 0,
            rust_log: "info".to_string(),
            env: "test".to_string(),
            static_dir: env!("CARGO_MANIFEST_DIR").to_string() + "/static",
            upload_action: "https://backend.example/upload_file".to_string(),
            customers: vec!["metro".to_string(), "sysco".to_string()],
            max_upload_bytes: 16 * 1024 * 1024,
        })
    }

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_ping_reports_env() {
        let (status, body) = get_body("/ping").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "pong");
        assert_eq!(json["env"], "test");
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"action="https://backend.example/upload_file""#));
        assert!(body.contains(r#"<option value="sysco">sysco</option>"#));
        assert!(body.contains(r#"id="submitBtn" disabled"#));
        assert!(body.contains("start_index_page("));
    }

    #[tokio::test]
    async fn test_static_assets_are_served() {
        let (status, body) = get_body("/static/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(".drop-area"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get_body("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "No route for /nope");
    }
}
