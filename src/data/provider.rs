//! Chunked, paced fetching of historical candles.

use {
    crate::{
        config::{DF, FETCH},
        domain::{PricePoint, RawCandle},
        utils::epoch_sec_to_date_string,
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    std::time::Duration,
};

/// Source of historical candles (an exchange REST endpoint in production).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Candles covering `[start, end]` (epoch seconds), in either time order.
    async fn fetch_candles(
        &self,
        start: i64,
        end: i64,
        granularity_secs: i64,
    ) -> Result<Vec<RawCandle>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub chunk_secs: i64,
    pub request_pause_ms: u64,
    pub granularity_secs: i64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            chunk_secs: FETCH.chunk_secs,
            request_pause_ms: FETCH.request_pause_ms,
            granularity_secs: FETCH.granularity_secs,
        }
    }
}

/// Points gathered so far by a multi-request fetch. Passed by value through
/// each step and consumed at the end.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FetchAccumulator {
    points: Vec<PricePoint>,
    requests: usize,
}

impl FetchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one response in. Newest-first responses are flipped to oldest-first.
    pub fn absorb(mut self, mut candles: Vec<RawCandle>) -> Self {
        if let (Some(first), Some(last)) = (candles.first(), candles.last())
            && first.0 > last.0
        {
            candles.reverse();
        }
        self.points.extend(candles.into_iter().map(PricePoint::from));
        self.requests += 1;
        self
    }

    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn into_points(self) -> Vec<PricePoint> {
        sorted_unique(self.points)
    }
}

/// Ascending by time, one point per timestamp (the last one seen wins).
pub fn sorted_unique(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    points.sort_by_key(|p| p.time);
    let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
    for p in points {
        match out.last_mut() {
            Some(last) if last.time == p.time => *last = p,
            _ => out.push(p),
        }
    }
    out
}

/// Consecutive `[from, to]` request ranges covering `[start, end]`. Adjacent
/// chunks share their boundary second; the overlap is deduplicated later.
pub fn plan_chunks(start: i64, end: i64, chunk_secs: i64) -> Vec<(i64, i64)> {
    if start > end {
        return Vec::new();
    }
    if chunk_secs <= 0 {
        return vec![(start, end)];
    }

    let mut chunks = Vec::new();
    let mut from = start;
    loop {
        let to = from.saturating_add(chunk_secs).min(end);
        chunks.push((from, to));
        if to >= end {
            break;
        }
        from = to;
    }
    chunks
}

pub async fn fetch_range(
    provider: &dyn MarketDataProvider,
    start: i64,
    end: i64,
    config: &FetchConfig,
) -> Result<Vec<PricePoint>> {
    let chunks = plan_chunks(start, end, config.chunk_secs);
    let mut acc = FetchAccumulator::new();

    for (i, &(from, to)) in chunks.iter().enumerate() {
        if i > 0 && config.request_pause_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.request_pause_ms)).await;
        }

        let candles = provider
            .fetch_candles(from, to, config.granularity_secs)
            .await
            .with_context(|| {
                format!(
                    "fetching candles {} to {}",
                    epoch_sec_to_date_string(from),
                    epoch_sec_to_date_string(to)
                )
            })?;

        if DF.log_fetch {
            log::info!(
                "Fetched {} candles for {} ({}/{})",
                candles.len(),
                epoch_sec_to_date_string(from),
                i + 1,
                chunks.len()
            );
        }
        acc = acc.absorb(candles);
    }

    log::info!(
        "Fetched {} candles in {} requests",
        acc.len(),
        acc.requests()
    );
    Ok(acc.into_points())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_cover_the_range() {
        assert_eq!(plan_chunks(0, 10, 4), vec![(0, 4), (4, 8), (8, 10)]);
        assert_eq!(plan_chunks(0, 8, 4), vec![(0, 4), (4, 8)]);
        assert_eq!(plan_chunks(5, 5, 4), vec![(5, 5)]);
        assert!(plan_chunks(6, 5, 4).is_empty());
        assert_eq!(plan_chunks(0, 10, 0), vec![(0, 10)]);
    }

    #[test]
    fn accumulator_orders_and_dedups() {
        let newest_first = vec![
            RawCandle(7200, 1.0, 1.0, 3.0, 1.0, 0.0),
            RawCandle(3600, 1.0, 1.0, 2.0, 1.0, 0.0),
        ];
        let overlap = vec![
            RawCandle(7200, 1.0, 1.0, 9.0, 1.0, 0.0),
            RawCandle(10800, 1.0, 1.0, 4.0, 1.0, 0.0),
        ];

        let acc = FetchAccumulator::new().absorb(newest_first).absorb(overlap);
        assert_eq!(acc.requests(), 2);
        assert_eq!(acc.len(), 4);

        let points = acc.into_points();
        let times: Vec<i64> = points.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![3600, 7200, 10800]);
        assert_eq!(points[1].open, 9.0);
    }
}
