use {
    super::sorted_unique,
    crate::domain::{PricePoint, RawCandle},
    anyhow::{Context, Result},
    std::path::Path,
};

/// Parse a JSON array of `[time, low, high, open, close, volume]` candles, in any order.
pub fn parse_candles(json: &str) -> Result<Vec<PricePoint>> {
    let candles: Vec<RawCandle> =
        serde_json::from_str(json).context("expected an array of [time, low, high, open, close, volume]")?;
    Ok(sorted_unique(candles.into_iter().map(PricePoint::from).collect()))
}

pub async fn read_candle_file(path: &Path) -> Result<Vec<PricePoint>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    parse_candles(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unordered_candles() {
        let json = "[[7200, 1, 2, 1.5, 1.8, 10], [3600, 0.5, 1.1, 1.0, 0.9, 4.25]]";
        let points = parse_candles(json).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], PricePoint::new(3600, 0.5, 1.1, 1.0, 0.9, 4.25));
        assert_eq!(points[1].close, 1.8);
    }

    #[test]
    fn rejects_objects() {
        assert!(parse_candles(r#"[{"time": 1}]"#).is_err());
        assert!(parse_candles("not json").is_err());
    }
}
