pub mod calendar;
pub mod qbittorrent;

use crate::core::error::FetchError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build the HTTP client shared by the upstream fetchers.
///
/// The timeout bounds every request; nothing is retried on timeout.
pub fn build_http_client(timeout: Duration, cookie_store: bool) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .cookie_store(cookie_store)
        .user_agent(concat!("media-dash/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Join a base URL such as `http://host:8989/api/v3` with an endpoint path
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decode a JSON body, treating anything but 200 OK as a failure
pub async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, FetchError> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status { service, status });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| FetchError::Decode { service, source })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("http://localhost:8989/api/v3", "calendar"),
            "http://localhost:8989/api/v3/calendar"
        );
        assert_eq!(
            endpoint("http://localhost:8080/api/v2/", "/torrents/info"),
            "http://localhost:8080/api/v2/torrents/info"
        );
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Duration::from_secs(5), false).is_ok());
        assert!(build_http_client(Duration::from_secs(5), true).is_ok());
    }
}
