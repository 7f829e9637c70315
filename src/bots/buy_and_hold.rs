use {
    super::{BOOTSTRAP_DAY, TradingBot},
    crate::models::PriceHistory,
    chrono::{DateTime, Utc},
};

/// Goes all-in on the first day, then never trades again. The baseline every
/// other strategy is measured against.
#[derive(Debug, Default, Clone)]
pub struct BuyAndHoldBot;

impl BuyAndHoldBot {
    pub fn new() -> Self {
        Self
    }
}

impl TradingBot for BuyAndHoldBot {
    fn name(&self) -> &str {
        "buy-and-hold"
    }

    fn make_decision(&mut self, _history: &PriceHistory, _now: DateTime<Utc>, day: u32) -> f64 {
        if day == BOOTSTRAP_DAY { 1.0 } else { 0.0 }
    }
}
