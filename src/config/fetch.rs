//! Market data fetch pacing

use crate::utils::TimeUtils;

pub struct FetchDefaults {
    /// Span covered by one request. The upstream candle API caps results per call
    /// (200 rows), so 5 days of hourly candles fits.
    pub chunk_secs: i64,
    /// Pause between consecutive requests (public endpoint rate limit).
    pub request_pause_ms: u64,
    pub granularity_secs: i64,
    /// Where an empty store starts back-filling from (2016-07-01T00:00:00Z).
    pub history_start_epoch: i64,
}

pub const FETCH: FetchDefaults = FetchDefaults {
    chunk_secs: TimeUtils::S_IN_D * 5,
    request_pause_ms: 1250,
    granularity_secs: TimeUtils::S_IN_H,
    history_start_epoch: 1_467_331_200,
};
