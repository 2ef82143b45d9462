use crate::core::state::AppState;
use crate::render::page::render_page;
use axum::{extract::State, response::Html};
use std::sync::Arc;

/// Dashboard page
///
/// GET /
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let snapshot = state.snapshot.read().await;
    Html(render_page(&snapshot, state.config.refresh.interval_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::test_config;
    use crate::render::cards::{CardLine, LineStyle};
    use crate::render::DashboardSnapshot;
    use axum::response::IntoResponse;
    use axum::http::StatusCode;
    use axum::body::Body;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_dashboard_renders_latest_snapshot() {
        let mut config = test_config();
        config.refresh.interval_secs = 15;
        let state = Arc::new(AppState::new(config));

        state
            .publish(DashboardSnapshot {
                movies: vec![CardLine {
                    text: "Dune - 2d 3h 4m".to_string(),
                    style: LineStyle::Default,
                }],
                ..Default::default()
            })
            .await;

        let response = dashboard_handler(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = Body::new(response.into_body());
        let bytes = body.collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(html.contains("Dune - 2d 3h 4m"));
        assert!(html.contains("content=\"15\""));
    }
}
