use {
    crate::{bots::TradingBot, domain::Decision, models::PriceHistory},
    chrono::{DateTime, Utc},
};

/// One bot's simulated account.
///
/// Balances never go negative: a decision only ever moves a fraction in
/// `[0, 1]` of one side into the other.
pub struct BotState {
    bot: Box<dyn TradingBot>,
    base_amount: f64,
    asset_amount: f64,
    /// Pre-trade account value per simulated day, `None` until a price has been seen.
    value_history: Vec<Option<f64>>,
    invalid_decisions: usize,
}

impl BotState {
    pub fn new(bot: Box<dyn TradingBot>, starting_base: f64) -> Self {
        Self {
            bot,
            base_amount: starting_base,
            asset_amount: 0.0,
            value_history: Vec::new(),
            invalid_decisions: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.bot.name()
    }

    pub fn base_amount(&self) -> f64 {
        self.base_amount
    }

    pub fn asset_amount(&self) -> f64 {
        self.asset_amount
    }

    pub fn value_history(&self) -> &[Option<f64>] {
        &self.value_history
    }

    pub fn invalid_decisions(&self) -> usize {
        self.invalid_decisions
    }

    pub fn total_value(&self, price: f64) -> f64 {
        self.base_amount + self.asset_amount * price
    }

    /// One simulated day.
    ///
    /// `price` is today's tradable price (absent on a gap day, when nothing is
    /// traded). `mark_price` values the account and falls back to the last
    /// price seen.
    pub fn step(
        &mut self,
        history: &PriceHistory,
        now: DateTime<Utc>,
        day: u32,
        price: Option<f64>,
        mark_price: Option<f64>,
    ) {
        self.value_history.push(mark_price.map(|p| self.total_value(p)));

        let raw = self.bot.make_decision(history, now, day);
        let decision = match Decision::validate(raw) {
            Ok(decision) => decision,
            Err(e) => {
                self.invalid_decisions += 1;
                log::warn!("{} on day {}: {}, holding instead", self.bot.name(), day, e);
                Decision::HOLD
            }
        };

        if let Some(price) = price {
            self.apply(decision, price);
        }
    }

    /// Negative sells that fraction of the asset, positive spends that fraction of the base.
    pub fn apply(&mut self, decision: Decision, price: f64) {
        if !price.is_finite() || price <= 0.0 {
            return;
        }
        let d = decision.value();
        if d < 0.0 {
            let sold = self.asset_amount * -d;
            self.asset_amount = (self.asset_amount - sold).max(0.0);
            self.base_amount += sold * price;
        } else if d > 0.0 {
            let spent = self.base_amount * d;
            self.base_amount = (self.base_amount - spent).max(0.0);
            self.asset_amount += spent / price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bots::BuyAndHoldBot;

    fn state() -> BotState {
        BotState::new(Box::new(BuyAndHoldBot::new()), 1000.0)
    }

    #[test]
    fn buy_then_partial_sell() {
        let mut s = state();
        s.apply(Decision::ALL_IN, 100.0);
        assert_eq!(s.base_amount(), 0.0);
        assert_eq!(s.asset_amount(), 10.0);

        s.apply(Decision::validate(-0.5).unwrap(), 120.0);
        assert_eq!(s.asset_amount(), 5.0);
        assert_eq!(s.base_amount(), 600.0);
        assert_eq!(s.total_value(120.0), 1200.0);
    }

    #[test]
    fn selling_everything_leaves_zero_not_negative() {
        let mut s = state();
        s.apply(Decision::validate(0.3).unwrap(), 7.0);
        s.apply(Decision::validate(-1.0).unwrap(), 9.0);
        assert_eq!(s.asset_amount(), 0.0);
        assert!(s.base_amount() > 0.0);
    }

    #[test]
    fn unusable_price_is_ignored() {
        let mut s = state();
        s.apply(Decision::ALL_IN, 0.0);
        s.apply(Decision::ALL_IN, f64::NAN);
        assert_eq!(s.base_amount(), 1000.0);
        assert_eq!(s.asset_amount(), 0.0);
    }
}
