use crate::api::{build_http_client, endpoint, read_json};
use crate::core::config::QbittorrentConfig;
use crate::core::error::FetchError;
use crate::models::{torrent::TorrentStatus, transfer::TransferInfo};
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const QBITTORRENT: &str = "qBittorrent";

/// Result of one qBittorrent poll
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QbittorrentStats {
    pub torrents: Vec<TorrentStatus>,
    pub transfer: TransferInfo,
}

/// qBittorrent Web API client.
///
/// The `SID` cookie lives in the client's cookie store and is reused across
/// polls. A 401/403 answer triggers one fresh login and one retry.
pub struct QbittorrentClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    authenticated: bool,
}

impl QbittorrentClient {
    pub fn new(config: &QbittorrentConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout, true)?,
            base_url: config.url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            authenticated: false,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// POST /auth/login
    ///
    /// qBittorrent answers 200 with `Ok.` on success and `Fails.` on bad credentials.
    pub async fn login(&mut self) -> Result<(), FetchError> {
        self.authenticated = false;

        let response = self
            .client
            .post(endpoint(&self.base_url, "auth/login"))
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::transport(QBITTORRENT, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                service: QBITTORRENT,
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(QBITTORRENT, e))?;

        if body.trim() == "Fails." {
            return Err(FetchError::LoginRejected {
                service: QBITTORRENT,
            });
        }

        self.authenticated = true;
        Ok(())
    }

    /// Log in and record the outcome; a failed login is not fatal
    async fn login_logged(&mut self) {
        match self.login().await {
            Ok(()) => info!(service = QBITTORRENT, "Logged in"),
            Err(e) => warn!(service = QBITTORRENT, error = %e, "Login failed, requests will likely fail"),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, path))
            .send()
            .await
            .map_err(|e| FetchError::transport(QBITTORRENT, e))?;

        read_json(QBITTORRENT, response).await
    }

    /// GET with at most one re-login per poll when the session has expired
    async fn get_authenticated<T: DeserializeOwned>(
        &mut self,
        path: &str,
        relogin_allowed: &mut bool,
    ) -> Result<T, FetchError> {
        match self.get_json(path).await {
            Err(e) if e.is_unauthorized() && *relogin_allowed => {
                *relogin_allowed = false;
                debug!(service = QBITTORRENT, path, "Session rejected, logging in again");
                self.login_logged().await;
                self.get_json(path).await
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.authenticated = false;
                }
                Err(e)
            }
            result => result,
        }
    }

    async fn try_torrents(&mut self, relogin_allowed: &mut bool) -> Result<Vec<TorrentStatus>, FetchError> {
        self.get_authenticated("torrents/info", relogin_allowed).await
    }

    async fn try_transfer_info(&mut self, relogin_allowed: &mut bool) -> Result<TransferInfo, FetchError> {
        self.get_authenticated("transfer/info", relogin_allowed).await
    }

    /// Fetch the torrent list and global transfer rates.
    ///
    /// Each half falls back independently: an empty list or zero rates.
    pub async fn fetch_stats(&mut self) -> QbittorrentStats {
        let mut relogin_allowed = true;
        if !self.authenticated {
            self.login_logged().await;
            relogin_allowed = false;
        }

        let torrents = match self.try_torrents(&mut relogin_allowed).await {
            Ok(torrents) => torrents,
            Err(e) => {
                warn!(service = QBITTORRENT, error = %e, "Torrent list fetch failed, showing no torrents");
                Vec::new()
            }
        };

        let transfer = match self.try_transfer_info(&mut relogin_allowed).await {
            Ok(transfer) => transfer,
            Err(e) => {
                warn!(service = QBITTORRENT, error = %e, "Transfer info fetch failed, recording zero speed");
                TransferInfo::default()
            }
        };

        QbittorrentStats { torrents, transfer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use axum::{
        extract::State,
        http::{header, HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Form, Json, Router,
    };
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeQbit {
        logins: AtomicUsize,
        /// Session id handed out by the latest login
        session: AtomicUsize,
    }

    #[derive(Deserialize)]
    struct LoginForm {
        username: String,
        password: String,
    }

    fn has_session(state: &FakeQbit, headers: &HeaderMap) -> bool {
        let expected = format!("SID={}", state.session.load(Ordering::SeqCst));
        headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|cookies| cookies.split("; ").any(|c| c == expected))
            .unwrap_or(false)
    }

    fn fake_router(state: Arc<FakeQbit>) -> Router {
        Router::new()
            .route(
                "/api/v2/auth/login",
                post(|State(state): State<Arc<FakeQbit>>, Form(form): Form<LoginForm>| async move {
                    if form.username != "admin" || form.password != "adminadmin" {
                        return "Fails.".into_response();
                    }
                    state.logins.fetch_add(1, Ordering::SeqCst);
                    let sid = state.session.fetch_add(1, Ordering::SeqCst) + 1;
                    (
                        [(header::SET_COOKIE, format!("SID={}; path=/", sid))],
                        "Ok.",
                    )
                        .into_response()
                }),
            )
            .route(
                "/api/v2/torrents/info",
                get(|State(state): State<Arc<FakeQbit>>, headers: HeaderMap| async move {
                    if !has_session(&state, &headers) {
                        return StatusCode::FORBIDDEN.into_response();
                    }
                    Json(serde_json::json!([
                        {"name": "debian.iso", "progress": 0.5, "state": "downloading", "size": 1024}
                    ]))
                    .into_response()
                }),
            )
            .route(
                "/api/v2/transfer/info",
                get(|State(state): State<Arc<FakeQbit>>, headers: HeaderMap| async move {
                    if !has_session(&state, &headers) {
                        return StatusCode::FORBIDDEN.into_response();
                    }
                    Json(serde_json::json!({"dl_info_speed": 2097152, "up_info_speed": 1048576}))
                        .into_response()
                }),
            )
            .with_state(state)
    }

    fn config(url: String, password: &str) -> QbittorrentConfig {
        QbittorrentConfig {
            url,
            username: "admin".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_stats_logs_in_and_reuses_session() {
        let state = Arc::new(FakeQbit::default());
        let base = test_server::spawn(fake_router(Arc::clone(&state))).await;
        let mut client =
            QbittorrentClient::new(&config(format!("{}/api/v2", base), "adminadmin"), Duration::from_secs(2)).unwrap();

        let stats = client.fetch_stats().await;
        assert!(client.is_authenticated());
        assert_eq!(stats.torrents.len(), 1);
        assert_eq!(stats.torrents[0].name, "debian.iso");
        assert_eq!(stats.transfer.dl_info_speed, 2_097_152);

        // Second poll reuses the cookie
        let stats = client.fetch_stats().await;
        assert_eq!(stats.torrents.len(), 1);
        assert_eq!(state.logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_session_triggers_single_relogin() {
        let state = Arc::new(FakeQbit::default());
        let base = test_server::spawn(fake_router(Arc::clone(&state))).await;
        let mut client =
            QbittorrentClient::new(&config(format!("{}/api/v2", base), "adminadmin"), Duration::from_secs(2)).unwrap();

        client.fetch_stats().await;
        // Invalidate the session server-side
        state.session.fetch_add(100, Ordering::SeqCst);

        let stats = client.fetch_stats().await;
        assert_eq!(stats.torrents.len(), 1);
        assert_eq!(stats.transfer.up_info_speed, 1_048_576);
        assert_eq!(state.logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rejected_login_falls_back_to_empty() {
        let state = Arc::new(FakeQbit::default());
        let base = test_server::spawn(fake_router(Arc::clone(&state))).await;
        let mut client =
            QbittorrentClient::new(&config(format!("{}/api/v2", base), "wrong"), Duration::from_secs(2)).unwrap();

        let err = client.login().await.unwrap_err();
        assert!(matches!(err, FetchError::LoginRejected { .. }));

        let stats = client.fetch_stats().await;
        assert!(!client.is_authenticated());
        assert_eq!(stats, QbittorrentStats::default());
    }

    #[tokio::test]
    async fn test_unreachable_client_falls_back_to_empty() {
        let base = test_server::closed_port().await;
        let mut client =
            QbittorrentClient::new(&config(base, "adminadmin"), Duration::from_secs(2)).unwrap();

        let stats = client.fetch_stats().await;
        assert!(stats.torrents.is_empty());
        assert_eq!(stats.transfer, TransferInfo::default());
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_half() {
        let router = Router::new()
            .route("/auth/login", post(|| async { "Ok." }))
            .route(
                "/torrents/info",
                get(|| async { Json(serde_json::json!([{"name": "a", "progress": 1.0}])) }),
            )
            .route(
                "/transfer/info",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );
        let base = test_server::spawn(router).await;
        let mut client =
            QbittorrentClient::new(&config(base, "adminadmin"), Duration::from_secs(2)).unwrap();

        let stats = client.fetch_stats().await;
        assert_eq!(stats.torrents.len(), 1);
        assert_eq!(stats.transfer, TransferInfo::default());
    }
}
