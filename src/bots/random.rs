use {
    super::{BOOTSTRAP_DAY, TradingBot},
    crate::models::PriceHistory,
    chrono::{DateTime, Utc},
    rand::{Rng, SeedableRng},
    rand_chacha::ChaCha8Rng,
};

/// Uniform noise in `[-1, 1]` after the bootstrap day. Its only state is the RNG.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: ChaCha8Rng,
}

impl RandomBot {
    /// Reproducible sequence; tests and repeatable runs use this.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl TradingBot for RandomBot {
    fn name(&self) -> &str {
        "random"
    }

    fn make_decision(&mut self, _history: &PriceHistory, _now: DateTime<Utc>, day: u32) -> f64 {
        if day == BOOTSTRAP_DAY {
            return 1.0;
        }
        self.rng.gen_range(-1.0..=1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_bots_agree_and_stay_in_range() {
        let history = PriceHistory::default();
        let now = Utc::now();
        let mut a = RandomBot::seeded(42);
        let mut b = RandomBot::seeded(42);

        assert_eq!(a.make_decision(&history, now, 1), 1.0);
        assert_eq!(b.make_decision(&history, now, 1), 1.0);
        for day in 2..200 {
            let x = a.make_decision(&history, now, day);
            assert_eq!(x, b.make_decision(&history, now, day));
            assert!((-1.0..=1.0).contains(&x));
        }
    }
}
