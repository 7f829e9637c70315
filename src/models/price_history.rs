use {
    crate::{
        domain::{PriceField, PricePoint},
        utils::{TimeUtils, epoch_sec_to_date_string},
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Ascending, gap-tolerant price history for one asset.
///
/// Stored column-wise. Timestamps are unique and strictly increasing; nothing
/// mutates a series after construction, so callers can share it freely
/// between the simulator, the window generator and every bot.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    interval_secs: i64,
    timestamps: Vec<i64>,
    low_prices: Vec<f64>,
    high_prices: Vec<f64>,
    open_prices: Vec<f64>,
    close_prices: Vec<f64>,
    volumes: Vec<f64>,
}

impl PriceHistory {
    /// Build from a batch of points. The batch is expected to be sorted and
    /// deduplicated already; if it isn't, it gets sorted and the last point
    /// for each timestamp wins.
    pub fn from_points(interval_secs: i64, mut points: Vec<PricePoint>) -> Self {
        let already_sorted = points.windows(2).all(|w| w[0].time < w[1].time);
        if !already_sorted {
            let before = points.len();
            // Stable sort keeps input order among equal timestamps, so "last wins" below holds.
            points.sort_by_key(|p| p.time);
            let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
            for p in points {
                match deduped.last_mut() {
                    Some(last) if last.time == p.time => *last = p,
                    _ => deduped.push(p),
                }
            }
            log::warn!(
                "Price history batch was unsorted or had duplicates ({} points in, {} kept)",
                before,
                deduped.len()
            );
            points = deduped;
        }

        let len = points.len();
        let mut series = Self {
            interval_secs,
            timestamps: Vec::with_capacity(len),
            low_prices: Vec::with_capacity(len),
            high_prices: Vec::with_capacity(len),
            open_prices: Vec::with_capacity(len),
            close_prices: Vec::with_capacity(len),
            volumes: Vec::with_capacity(len),
        };

        for p in &points {
            series.timestamps.push(p.time);
            series.low_prices.push(p.low);
            series.high_prices.push(p.high);
            series.open_prices.push(p.open);
            series.close_prices.push(p.close);
            series.volumes.push(p.volume);
        }

        series
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }

    /// Index steps per calendar day at this series' native granularity
    /// (24 for hourly data, 1 for daily). Never zero.
    pub fn samples_per_day(&self) -> usize {
        if self.interval_secs <= 0 || self.interval_secs >= TimeUtils::S_IN_D {
            return 1;
        }
        (TimeUtils::S_IN_D / self.interval_secs) as usize
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn first_time(&self) -> Option<i64> {
        self.timestamps.first().copied()
    }

    pub fn last_time(&self) -> Option<i64> {
        self.timestamps.last().copied()
    }

    pub fn time_at(&self, idx: usize) -> Option<i64> {
        self.timestamps.get(idx).copied()
    }

    /// Exact-match index of `epoch`. A missing timestamp is a routine data gap,
    /// so this returns `None` rather than failing.
    pub fn lookup_index(&self, epoch: i64) -> Option<usize> {
        // Timestamps are unique, so the match (if any) is also the last match.
        self.timestamps.binary_search(&epoch).ok()
    }

    pub fn index_of(&self, dt: DateTime<Utc>) -> Option<usize> {
        self.lookup_index(dt.timestamp())
    }

    pub fn field_at_index(&self, idx: usize, field: PriceField) -> Option<f64> {
        let column = match field {
            PriceField::Open => &self.open_prices,
            PriceField::High => &self.high_prices,
            PriceField::Low => &self.low_prices,
            PriceField::Close => &self.close_prices,
            PriceField::Volume => &self.volumes,
        };
        column.get(idx).copied()
    }

    /// Exact lookup of one field at `dt`; `None` when the series has a gap there.
    pub fn price_at(&self, dt: DateTime<Utc>, field: PriceField) -> Option<f64> {
        self.index_of(dt)
            .and_then(|idx| self.field_at_index(idx, field))
    }

    /// Everything at or before `dt`. This is the look-ahead boundary: a bot
    /// deciding at `dt` only ever sees this prefix.
    pub fn slice_up_to_inclusive(&self, dt: DateTime<Utc>) -> PriceHistory {
        let cutoff = dt.timestamp();
        let n = self.timestamps.partition_point(|&t| t <= cutoff);
        self.truncate_to(n)
    }

    /// Clone of `[0, end_idx)`.
    fn truncate_to(&self, end_idx: usize) -> PriceHistory {
        let n = end_idx.min(self.len());
        PriceHistory {
            interval_secs: self.interval_secs,
            timestamps: self.timestamps[..n].to_vec(),
            low_prices: self.low_prices[..n].to_vec(),
            high_prices: self.high_prices[..n].to_vec(),
            open_prices: self.open_prices[..n].to_vec(),
            close_prices: self.close_prices[..n].to_vec(),
            volumes: self.volumes[..n].to_vec(),
        }
    }

    /// One-line description for logs.
    pub fn describe(&self) -> String {
        match (self.first_time(), self.last_time()) {
            (Some(first), Some(last)) => format!(
                "{} points @ {} from {} to {}",
                self.len(),
                TimeUtils::interval_to_string(self.interval_secs),
                epoch_sec_to_date_string(first),
                epoch_sec_to_date_string(last)
            ),
            _ => "empty series".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::epoch_to_datetime;

    const T0: i64 = 1_483_315_200;
    const H: i64 = TimeUtils::S_IN_H;

    fn hourly(prices: &[f64]) -> PriceHistory {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::flat(T0 + i as i64 * H, p))
            .collect();
        PriceHistory::from_points(H, points)
    }

    #[test]
    fn lookup_finds_exact_times_only() {
        let series = hourly(&[10.0, 11.0, 12.0]);
        assert_eq!(series.lookup_index(T0), Some(0));
        assert_eq!(series.lookup_index(T0 + 2 * H), Some(2));
        assert_eq!(series.lookup_index(T0 + 1), None);
        assert_eq!(series.lookup_index(T0 + 3 * H), None);
        assert_eq!(PriceHistory::default().lookup_index(T0), None);
    }

    #[test]
    fn price_at_reads_requested_field() {
        let points = vec![PricePoint::new(T0, 1.0, 4.0, 2.0, 3.0, 50.0)];
        let series = PriceHistory::from_points(H, points);
        let at = epoch_to_datetime(T0).unwrap();
        assert_eq!(series.price_at(at, PriceField::Open), Some(2.0));
        assert_eq!(series.price_at(at, PriceField::Close), Some(3.0));
        assert_eq!(series.price_at(at, PriceField::Volume), Some(50.0));
        assert_eq!(
            series.price_at(epoch_to_datetime(T0 + H).unwrap(), PriceField::Open),
            None
        );
    }

    #[test]
    fn slice_is_inclusive_prefix() {
        let series = hourly(&[1.0, 2.0, 3.0, 4.0]);

        let exact = series.slice_up_to_inclusive(epoch_to_datetime(T0 + H).unwrap());
        assert_eq!(exact.timestamps(), &[T0, T0 + H]);

        let between = series.slice_up_to_inclusive(epoch_to_datetime(T0 + H + 30).unwrap());
        assert_eq!(between.len(), 2);

        let before = series.slice_up_to_inclusive(epoch_to_datetime(T0 - 1).unwrap());
        assert!(before.is_empty());
        assert_eq!(before.interval_secs(), H);
    }

    #[test]
    fn unsorted_batches_are_sorted_and_last_duplicate_wins() {
        let points = vec![
            PricePoint::flat(T0 + H, 2.0),
            PricePoint::flat(T0, 1.0),
            PricePoint::flat(T0 + H, 5.0),
        ];
        let series = PriceHistory::from_points(H, points);
        assert_eq!(series.timestamps(), &[T0, T0 + H]);
        assert_eq!(series.field_at_index(1, PriceField::Open), Some(5.0));
    }

    #[test]
    fn samples_per_day_follows_interval() {
        assert_eq!(hourly(&[1.0]).samples_per_day(), 24);
        assert_eq!(PriceHistory::from_points(TimeUtils::S_IN_D, vec![]).samples_per_day(), 1);
        assert_eq!(PriceHistory::from_points(0, vec![]).samples_per_day(), 1);
    }
}
