use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which column of a price point a lookup reads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    #[default]
    Open,
    High,
    Low,
    Close,
    Volume,
}

/// One OHLCV observation. `time` is the candle's open time in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: i64,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    pub fn new(time: i64, low: f64, high: f64, open: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            low,
            high,
            open,
            close,
            volume,
        }
    }

    /// Flat candle where every price is `price`. Handy for synthetic series.
    pub fn flat(time: i64, price: f64) -> Self {
        Self::new(time, price, price, price, price, 0.0)
    }
}

/// Candle as served by the GDAX/Coinbase candles endpoint:
/// `[time, low, high, open, close, volume]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCandle(pub i64, pub f64, pub f64, pub f64, pub f64, pub f64);

impl From<RawCandle> for PricePoint {
    fn from(raw: RawCandle) -> Self {
        let RawCandle(time, low, high, open, close, volume) = raw;
        PricePoint::new(time, low, high, open, close, volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn raw_candle_keeps_gdax_column_order() {
        let raw: RawCandle = serde_json::from_str("[1500000000, 1.0, 4.0, 2.0, 3.0, 99.5]").unwrap();
        let point = PricePoint::from(raw);
        assert_eq!(point.time, 1_500_000_000);
        assert_eq!(point.low, 1.0);
        assert_eq!(point.high, 4.0);
        assert_eq!(point.open, 2.0);
        assert_eq!(point.close, 3.0);
        assert_eq!(point.volume, 99.5);
    }

    #[test]
    fn field_names_parse_lowercase() {
        assert_eq!(PriceField::from_str("close").unwrap(), PriceField::Close);
        assert_eq!(PriceField::Open.to_string(), "open");
        assert!(PriceField::from_str("median").is_err());
    }
}
