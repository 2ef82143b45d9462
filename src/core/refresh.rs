// Periodic refresh: poll upstreams, update speed history, publish a snapshot

use crate::api::calendar::{CalendarClient, RADARR, SONARR};
use crate::api::qbittorrent::QbittorrentClient;
use crate::core::config::Config;
use crate::core::state::AppState;
use crate::models::transfer::TransferSample;
use crate::render::DashboardSnapshot;
use crate::stores::speed_history::SpeedHistory;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Owns the upstream clients and the transfer history.
///
/// Only the refresh task holds a `Poller`, so none of this needs locking.
pub struct Poller {
    sonarr: CalendarClient,
    radarr: CalendarClient,
    qbittorrent: QbittorrentClient,
    history: SpeedHistory,
}

impl Poller {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.refresh.request_timeout_secs);
        let lookahead = config.refresh.lookahead_days;

        Ok(Self {
            sonarr: CalendarClient::new(SONARR, &config.sonarr, timeout, lookahead)?,
            radarr: CalendarClient::new(RADARR, &config.radarr, timeout, lookahead)?,
            qbittorrent: QbittorrentClient::new(&config.qbittorrent, timeout)?,
            history: SpeedHistory::new(config.refresh.history_capacity),
        })
    }

    pub fn history(&self) -> &SpeedHistory {
        &self.history
    }

    /// Run one refresh cycle.
    ///
    /// The three sources are independent and fetched concurrently; each one
    /// degrades to an empty result on failure, so a tick always completes.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> DashboardSnapshot {
        let (episodes, movies, stats) = tokio::join!(
            self.sonarr.fetch_episodes(now),
            self.radarr.fetch_movies(now),
            self.qbittorrent.fetch_stats(),
        );

        self.history.record(TransferSample::from(stats.transfer));

        debug!(
            episodes = episodes.len(),
            movies = movies.len(),
            torrents = stats.torrents.len(),
            download_mbps = ?self.history.download().latest(),
            upload_mbps = ?self.history.upload().latest(),
            history_len = self.history.len(),
            "Refresh tick completed"
        );

        DashboardSnapshot::build(&episodes, &movies, &stats.torrents, &self.history, now)
    }
}

/// Spawn the refresh loop.
///
/// The first tick fires immediately. Ticks never overlap: a slow cycle pushes
/// the next one back instead of running concurrently.
pub fn spawn_refresh_task(mut poller: Poller, state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_seconds = period.as_secs(), "Refresh task started");

        loop {
            interval.tick().await;

            let snapshot = poller.tick(Utc::now()).await;
            state.publish(snapshot).await;
        }
    })
}
