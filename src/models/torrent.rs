use serde::Deserialize;
use serde_json::Value;

/// A torrent as listed by qBittorrent's `torrents/info`
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TorrentStatus {
    #[serde(default)]
    pub name: String,
    /// Completion fraction in [0, 1]
    #[serde(default)]
    pub progress: f64,
    /// qBittorrent calls this field `state`
    #[serde(default, alias = "state")]
    pub status: Option<String>,
    /// Kept loosely typed, the value is only ever displayed or inspected as text
    #[serde(default)]
    pub size: Value,
}

/// Visual emphasis for a torrent line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressTreatment {
    Complete,
    InProgress,
    NotStarted,
}

impl TorrentStatus {
    pub fn treatment(&self) -> ProgressTreatment {
        if self.progress >= 1.0 {
            ProgressTreatment::Complete
        } else if self.progress > 0.0 {
            ProgressTreatment::InProgress
        } else {
            ProgressTreatment::NotStarted
        }
    }

    pub fn size_text(&self) -> String {
        match &self.size {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// True when any displayed field carries a stray table-cell fragment
    pub fn contains_markup(&self) -> bool {
        const MARKUP: &str = "td";

        self.name.contains(MARKUP)
            || self.status.as_deref().unwrap_or_default().contains(MARKUP)
            || self.size_text().contains(MARKUP)
    }
}
