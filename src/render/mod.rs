pub mod cards;
pub mod chart;
pub mod page;

use crate::models::{episode::UpcomingEpisode, movie::UpcomingMovie, torrent::TorrentStatus};
use crate::stores::speed_history::SpeedHistory;
use cards::CardLine;
use chrono::{DateTime, Utc};

/// Everything one tick produced, ready to be turned into HTML
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub episodes: Vec<CardLine>,
    pub movies: Vec<CardLine>,
    pub torrents: Vec<CardLine>,
    /// MB/s, oldest first
    pub download: Vec<f64>,
    /// MB/s, oldest first
    pub upload: Vec<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn build(
        episodes: &[UpcomingEpisode],
        movies: &[UpcomingMovie],
        torrents: &[TorrentStatus],
        history: &SpeedHistory,
        now: DateTime<Utc>,
    ) -> Self {
        let naive_now = now.naive_utc();

        Self {
            episodes: cards::episode_lines(episodes, naive_now),
            movies: cards::movie_lines(movies, naive_now),
            torrents: cards::torrent_lines(torrents),
            download: history.download().to_vec(),
            upload: history.upload().to_vec(),
            updated_at: Some(now),
        }
    }
}

impl Default for DashboardSnapshot {
    /// Placeholder-only snapshot served until the first tick completes
    fn default() -> Self {
        Self {
            episodes: cards::episode_lines(&[], Utc::now().naive_utc()),
            movies: cards::movie_lines(&[], Utc::now().naive_utc()),
            torrents: cards::torrent_lines(&[]),
            download: Vec::new(),
            upload: Vec::new(),
            updated_at: None,
        }
    }
}
