use {
    super::{BOOTSTRAP_DAY, TradingBot},
    crate::{
        config::PREDICTOR,
        domain::Decision,
        models::PriceHistory,
        predictor::{Predictor, predict_change},
    },
    chrono::{DateTime, Utc},
};

/// Trades on tomorrow's predicted change, retraining from scratch every day on
/// whatever history the simulator hands it.
///
/// A predicted +4% becomes a +0.2 decision at the default sensitivity of 5.
pub struct PredictorBot<P: Predictor> {
    predictor: P,
    sensitivity: f64,
}

impl<P: Predictor> PredictorBot<P> {
    pub fn new(predictor: P) -> Self {
        Self::with_sensitivity(predictor, PREDICTOR.decision_sensitivity)
    }

    pub fn with_sensitivity(predictor: P, sensitivity: f64) -> Self {
        Self {
            predictor,
            sensitivity,
        }
    }
}

impl<P: Predictor> TradingBot for PredictorBot<P> {
    fn name(&self) -> &str {
        "predictor"
    }

    fn make_decision(&mut self, history: &PriceHistory, now: DateTime<Utc>, day: u32) -> f64 {
        if day == BOOTSTRAP_DAY {
            return 1.0;
        }
        match predict_change(&self.predictor, history, now) {
            Some(change) => Decision::clamped(change * self.sensitivity).value(),
            None => Decision::HOLD.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::WINDOW_DAYS,
        domain::PricePoint,
        models::Window,
        predictor::PredictorError,
        utils::{TimeUtils, epoch_to_datetime},
    };

    /// Predicts a fixed normalized value once it has any labelled window.
    struct Fixed(f64);

    impl Predictor for Fixed {
        type Model = ();

        fn train(&self, windows: &[Window]) -> Result<(), PredictorError> {
            if windows.iter().any(Window::is_training) {
                Ok(())
            } else {
                Err(PredictorError::TrainingUnavailable)
            }
        }

        fn predict(&self, _model: &(), _inputs: &[f64; WINDOW_DAYS]) -> f64 {
            self.0
        }
    }

    const T0: i64 = 1_483_315_200;
    const D: i64 = TimeUtils::S_IN_D;

    fn flat_daily(days: i64) -> PriceHistory {
        let points = (0..days).map(|i| PricePoint::flat(T0 + i * D, 10.0)).collect();
        PriceHistory::from_points(D, points)
    }

    #[test]
    fn scales_and_clamps_the_prediction() {
        let series = flat_daily(40);
        let now = epoch_to_datetime(T0 + 39 * D).unwrap();

        // +4% -> 0.2
        let mut bot = PredictorBot::new(Fixed(0.54));
        assert!((bot.make_decision(&series, now, 2) - 0.2).abs() < 1e-9);

        // -60% -> -3.0, clamped
        let mut bear = PredictorBot::new(Fixed(-0.1));
        assert_eq!(bear.make_decision(&series, now, 2), -1.0);
    }

    #[test]
    fn bootstraps_all_in_and_holds_without_data() {
        let mut bot = PredictorBot::new(Fixed(0.9));
        assert_eq!(bot.name(), "predictor");

        let empty = PriceHistory::default();
        let now = epoch_to_datetime(T0).unwrap();
        assert_eq!(bot.make_decision(&empty, now, 1), 1.0);
        assert_eq!(bot.make_decision(&empty, now, 2), 0.0);
    }
}
