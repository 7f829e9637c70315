use {
    super::{FetchConfig, MarketDataProvider, PriceHistoryStorage, fetch_range},
    crate::{config::FETCH, models::PriceHistory, utils::epoch_sec_to_date_string},
    anyhow::{Context, Result},
    chrono::{DateTime, Utc},
};

/// Fetch everything newer than the store's latest point up to `now` and store
/// it. An empty store back-fills from the configured history start.
/// Returns the number of new points.
pub async fn update_price_history(
    storage: &dyn PriceHistoryStorage,
    provider: &dyn MarketDataProvider,
    now: DateTime<Utc>,
    config: &FetchConfig,
) -> Result<u64> {
    let start = match storage.latest_time().await? {
        Some(latest) => latest + config.granularity_secs,
        None => FETCH.history_start_epoch,
    };
    let end = now.timestamp();
    if start > end {
        log::info!("Price history already up to date");
        return Ok(0);
    }

    log::info!(
        "Updating price history from {} to {}",
        epoch_sec_to_date_string(start),
        epoch_sec_to_date_string(end)
    );

    let points = fetch_range(provider, start, end, config).await?;
    let inserted = storage
        .insert_points(&points)
        .await
        .context("storing fetched price points")?;

    log::info!("Added {} new price points", inserted);
    Ok(inserted)
}

/// The whole store as a series at `interval_secs`.
pub async fn load_price_history(
    storage: &dyn PriceHistoryStorage,
    interval_secs: i64,
) -> Result<PriceHistory> {
    let points = storage
        .load_points(None)
        .await
        .context("loading price history")?;
    let series = PriceHistory::from_points(interval_secs, points);
    log::info!("Loaded {}", series.describe());
    Ok(series)
}
