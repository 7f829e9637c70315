//! Decision-making strategies driven by the simulator.

mod buy_and_hold;
mod predictor_bot;
mod random;

use {
    crate::{models::PriceHistory, predictor::NeuralPredictor},
    chrono::{DateTime, Utc},
    clap::ValueEnum,
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

pub use {buy_and_hold::BuyAndHoldBot, predictor_bot::PredictorBot, random::RandomBot};

/// First simulated day. Every shipped bot goes all-in here so the simulation
/// starts from a fully invested position.
pub const BOOTSTRAP_DAY: u32 = 1;

pub trait TradingBot: Send {
    fn name(&self) -> &str;

    /// Decision for `now`, in `[-1, 1]`.
    ///
    /// `history` already ends at `now`. `day` counts from [`BOOTSTRAP_DAY`].
    /// Anything outside the range is treated as "hold" by the simulator.
    fn make_decision(&mut self, history: &PriceHistory, now: DateTime<Utc>, day: u32) -> f64;
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BotKind {
    Predictor,
    BuyAndHold,
    Random,
}

/// Boxed bot of the given kind. `seed` only affects [`RandomBot`].
pub fn create_bot(kind: BotKind, seed: Option<u64>) -> Box<dyn TradingBot> {
    match kind {
        BotKind::Predictor => Box::new(PredictorBot::new(NeuralPredictor::default())),
        BotKind::BuyAndHold => Box::new(BuyAndHoldBot::new()),
        BotKind::Random => match seed {
            Some(seed) => Box::new(RandomBot::seeded(seed)),
            None => Box::new(RandomBot::from_entropy()),
        },
    }
}
