use serde::Deserialize;

/// An entry from the Radarr calendar
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMovie {
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub digital_release: Option<String>,
    pub physical_release: Option<String>,
    pub in_cinemas: Option<String>,
}

impl UpcomingMovie {
    /// The release timestamp to count down to.
    ///
    /// Older Radarr builds only expose the per-medium dates, so fall back to
    /// the digital, physical and cinema dates in that order.
    pub fn release_time(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.digital_release.as_deref())
            .or(self.physical_release.as_deref())
            .or(self.in_cinemas.as_deref())
    }
}
