use crate::core::error::ReleaseTimeError;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

pub const RELEASED: &str = "Released";

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Parse an upstream release timestamp such as `2024-05-01T20:00:00Z`.
///
/// The last character is always dropped as the zone marker before parsing,
/// so `2024-05-01T20:00:00Z` and `2024-05-01T20:00:00.000Z` both parse as UTC.
pub fn parse_release_time(release: &str) -> Result<NaiveDateTime, ReleaseTimeError> {
    let mut chars = release.chars();
    if chars.next_back().is_none() {
        return Err(ReleaseTimeError::Empty);
    }
    let trimmed = chars.as_str();

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ReleaseTimeError::Invalid(release.to_string()))
}

/// Remaining time until `release` as `{days}d {hours}h {minutes}m`,
/// or `Released` once it lies in the past. Seconds are truncated.
pub fn time_until_release(release: &str, now: NaiveDateTime) -> Result<String, ReleaseTimeError> {
    let release_time = parse_release_time(release)?;
    let remaining = release_time - now;

    // Sub-second remainders count: 500ms in the past is already released
    if remaining < TimeDelta::zero() {
        return Ok(RELEASED.to_string());
    }

    Ok(format_remaining(remaining.num_seconds()))
}

pub fn format_remaining(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return RELEASED.to_string();
    }

    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    format!("{}d {}h {}m", days, hours, minutes)
}
