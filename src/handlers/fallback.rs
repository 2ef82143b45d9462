use crate::core::error::DashboardError;
use axum::{http::Uri, response::Response};
use axum::response::IntoResponse;
use tracing::debug;

/// Only `/` is served; everything else is a 404
pub async fn fallback_handler(uri: Uri) -> Response {
    debug!(path = %uri.path(), "Unknown route requested");
    DashboardError::NotFound.into_response()
}
