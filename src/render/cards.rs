use crate::api::calendar::{RADARR, SONARR};
use crate::models::episode::UpcomingEpisode;
use crate::models::movie::UpcomingMovie;
use crate::models::torrent::{ProgressTreatment, TorrentStatus};
use crate::utils::time::time_until_release;
use chrono::NaiveDateTime;
use tracing::{debug, warn};

pub const NO_EPISODES: &str = "No upcoming episodes";
pub const NO_MOVIES: &str = "No upcoming movies";
pub const NO_TORRENTS: &str = "No active torrents";
pub const RELEASE_TIME_UNAVAILABLE: &str = "Release time unavailable";

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Default,
    InProgress,
    Complete,
    /// Greyed-out text shown when a category has nothing to list
    Placeholder,
}

impl LineStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            LineStyle::Default => "item",
            LineStyle::InProgress => "item item-progress",
            LineStyle::Complete => "item item-complete",
            LineStyle::Placeholder => "placeholder",
        }
    }
}

impl From<ProgressTreatment> for LineStyle {
    fn from(treatment: ProgressTreatment) -> Self {
        match treatment {
            ProgressTreatment::Complete => LineStyle::Complete,
            ProgressTreatment::InProgress => LineStyle::InProgress,
            ProgressTreatment::NotStarted => LineStyle::Default,
        }
    }
}

/// One rendered row of a card
#[derive(Debug, Clone, PartialEq)]
pub struct CardLine {
    pub text: String,
    pub style: LineStyle,
}

impl CardLine {
    fn item(text: String) -> Self {
        Self {
            text,
            style: LineStyle::Default,
        }
    }

    fn placeholder(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: LineStyle::Placeholder,
        }
    }
}

fn or_placeholder(lines: Vec<CardLine>, placeholder: &str) -> Vec<CardLine> {
    if lines.is_empty() {
        vec![CardLine::placeholder(placeholder)]
    } else {
        lines
    }
}

/// Countdown text for one item; a bad timestamp only affects that item
fn countdown(service: &'static str, title: &str, release: Option<&str>, now: NaiveDateTime) -> String {
    let Some(release) = release else {
        warn!(service, title, "Entry has no release time");
        return RELEASE_TIME_UNAVAILABLE.to_string();
    };

    match time_until_release(release, now) {
        Ok(remaining) => remaining,
        Err(e) => {
            warn!(service, title, error = %e, "Skipping countdown for entry");
            RELEASE_TIME_UNAVAILABLE.to_string()
        }
    }
}

fn number_or_na(value: Option<u32>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// `Season {season}x{episode} - {title} - {countdown}`
pub fn episode_lines(episodes: &[UpcomingEpisode], now: NaiveDateTime) -> Vec<CardLine> {
    let lines = episodes
        .iter()
        .map(|episode| {
            let title = episode.title.as_deref().unwrap_or(UNKNOWN_TITLE);
            CardLine::item(format!(
                "Season {}x{} - {} - {}",
                number_or_na(episode.season_number),
                number_or_na(episode.episode_number),
                title,
                countdown(SONARR, title, episode.air_date_utc.as_deref(), now),
            ))
        })
        .collect();

    or_placeholder(lines, NO_EPISODES)
}

/// `{title} - {countdown}`
pub fn movie_lines(movies: &[UpcomingMovie], now: NaiveDateTime) -> Vec<CardLine> {
    let lines = movies
        .iter()
        .map(|movie| {
            let title = movie.title.as_deref().unwrap_or(UNKNOWN_TITLE);
            CardLine::item(format!(
                "{} - {}",
                title,
                countdown(RADARR, title, movie.release_time(), now),
            ))
        })
        .collect();

    or_placeholder(lines, NO_MOVIES)
}

/// `{name} - {percent:.2}% complete`, styled by progress.
///
/// Torrents carrying stray markup in any displayed field are dropped.
pub fn torrent_lines(torrents: &[TorrentStatus]) -> Vec<CardLine> {
    let lines = torrents
        .iter()
        .filter(|torrent| {
            let rejected = torrent.contains_markup();
            if rejected {
                debug!(name = %torrent.name, "Dropping torrent with markup in its fields");
            }
            !rejected
        })
        .map(|torrent| CardLine {
            text: format!("{} - {:.2}% complete", torrent.name, torrent.progress * 100.0),
            style: torrent.treatment().into(),
        })
        .collect();

    or_placeholder(lines, NO_TORRENTS)
}
