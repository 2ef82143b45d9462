use crate::api::{build_http_client, endpoint, read_json};
use crate::core::config::ApiKeyServiceConfig;
use crate::core::error::FetchError;
use crate::models::{episode::UpcomingEpisode, movie::UpcomingMovie};
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

pub const SONARR: &str = "Sonarr";
pub const RADARR: &str = "Radarr";

/// Client for a `*arr` style `calendar` endpoint authenticated by `apikey`
pub struct CalendarClient {
    client: reqwest::Client,
    service: &'static str,
    base_url: String,
    api_key: String,
    lookahead_days: i64,
}

impl CalendarClient {
    pub fn new(
        service: &'static str,
        config: &ApiKeyServiceConfig,
        timeout: StdDuration,
        lookahead_days: i64,
    ) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout, false)?,
            service,
            base_url: config.url.clone(),
            api_key: config.api_key.clone(),
            lookahead_days,
        })
    }

    /// Fetch the calendar window `[now, now + lookahead]`
    pub async fn try_fetch<T: DeserializeOwned>(&self, now: DateTime<Utc>) -> Result<Vec<T>, FetchError> {
        let window_end = TimeDelta::try_days(self.lookahead_days)
            .and_then(|lookahead| now.checked_add_signed(lookahead))
            .ok_or(FetchError::WindowOutOfRange {
                service: self.service,
                days: self.lookahead_days,
            })?;

        let start = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let end = window_end.to_rfc3339_opts(SecondsFormat::Secs, true);

        let response = self
            .client
            .get(endpoint(&self.base_url, "calendar"))
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::transport(self.service, e))?;

        read_json(self.service, response).await
    }

    /// Like [`try_fetch`](Self::try_fetch) but any failure becomes an empty list
    pub async fn fetch<T: DeserializeOwned>(&self, now: DateTime<Utc>) -> Vec<T> {
        match self.try_fetch(now).await {
            Ok(items) => {
                debug!(service = self.service, items = items.len(), "Calendar fetched");
                items
            }
            Err(e) => {
                warn!(service = self.service, error = %e, "Calendar fetch failed, showing no entries");
                Vec::new()
            }
        }
    }

    pub async fn fetch_episodes(&self, now: DateTime<Utc>) -> Vec<UpcomingEpisode> {
        self.fetch(now).await
    }

    pub async fn fetch_movies(&self, now: DateTime<Utc>) -> Vec<UpcomingMovie> {
        self.fetch(now).await
    }
}
