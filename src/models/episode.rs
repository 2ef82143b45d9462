use serde::Deserialize;

/// An entry from the Sonarr calendar
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEpisode {
    pub season_number: Option<u32>,
    pub episode_number: Option<u32>,
    pub title: Option<String>,
    /// ISO-8601 UTC air time, e.g. `2024-05-01T20:00:00Z`
    pub air_date_utc: Option<String>,
}
