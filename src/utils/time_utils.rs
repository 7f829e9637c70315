use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, NaiveDate, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const S_IN_MIN: i64 = 60;
    pub const S_IN_H: i64 = Self::S_IN_MIN * 60;
    pub const S_IN_6_H: i64 = Self::S_IN_H * 6;
    pub const S_IN_D: i64 = Self::S_IN_H * 24;
    pub const S_IN_W: i64 = Self::S_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const LONG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// Convert a sampling interval in seconds to GDAX-style shorthand (e.g. `1h`, `1d`).
    pub fn interval_to_string(interval_secs: i64) -> &'static str {
        match interval_secs {
            Self::S_IN_MIN => "1m",
            Self::S_IN_H => "1h",
            Self::S_IN_6_H => "6h",
            Self::S_IN_D => "1d",
            Self::S_IN_W => "1w",
            _ => "unknown",
        }
    }
}

/// Calendar-day step used by the simulator and window generator (UTC, so always 86 400 s).
pub fn add_days(dt: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    dt + Duration::days(days)
}

pub fn epoch_to_datetime(epoch_sec: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(epoch_sec, 0)
}

pub fn epoch_sec_to_date_string(epoch_sec: i64) -> String {
    // Used for display purposes
    match epoch_to_datetime(epoch_sec) {
        Some(dt) => dt.format(TimeUtils::LONG_TIME_FORMAT).to_string(),
        None => format!("<invalid epoch {}>", epoch_sec),
    }
}

/// Accepts RFC 3339 (`2017-06-29T20:00:00-04:00`) or a bare date (`2017-06-30`, midnight UTC).
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(text, TimeUtils::STANDARD_TIME_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("Unrecognised date '{}' (expected RFC 3339 or YYYY-MM-DD)", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_days_moves_by_whole_utc_days() {
        let start = epoch_to_datetime(1_500_336_000).unwrap();
        assert_eq!(add_days(start, 2).timestamp(), 1_500_508_800);
        assert_eq!(add_days(start, -6).timestamp(), 1_500_336_000 - 6 * TimeUtils::S_IN_D);
    }

    #[test]
    fn parses_both_date_shapes() {
        let offset = parse_datetime("2017-01-01T20:00:00-04:00").unwrap();
        let bare = parse_datetime("2017-01-02").unwrap();
        assert_eq!(offset, bare);
        assert_eq!(bare.timestamp(), 1_483_315_200);
        assert!(parse_datetime("next tuesday").is_err());
    }

    #[test]
    fn interval_names() {
        assert_eq!(TimeUtils::interval_to_string(3600), "1h");
        assert_eq!(TimeUtils::interval_to_string(86_400), "1d");
        assert_eq!(TimeUtils::interval_to_string(42), "unknown");
    }
}
