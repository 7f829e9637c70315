// Price history persistence and acquisition. Everything here is async and
// runs before a simulation starts, never inside it.
mod import;
mod provider;
mod storage;
mod update;

pub use {
    import::{parse_candles, read_candle_file},
    provider::{
        FetchAccumulator, FetchConfig, MarketDataProvider, fetch_range, plan_chunks, sorted_unique,
    },
    storage::{PriceHistoryStorage, SqliteStorage},
    update::{load_price_history, update_price_history},
};
