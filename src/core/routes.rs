// HTTP routes configuration

use crate::core::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(crate::handlers::dashboard::dashboard_handler))
        // 404 for everything else
        .fallback(crate::handlers::fallback::fallback_handler)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::test_config;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn router() -> Router {
        build_router(Arc::new(AppState::new(test_config())))
    }

    #[tokio::test]
    async fn test_root_serves_dashboard() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Media Dash/Monitor"));
        assert!(html.contains("No upcoming episodes"));
    }

    #[tokio::test]
    async fn test_other_routes_are_not_found() {
        for uri in ["/health", "/api/v3/calendar", "/index.html"] {
            let response = router()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_post_to_root_not_allowed() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
