//! Window generation and predictor configuration (Immutable Blueprints)

/// Day-over-day changes fed to the predictor per window.
pub const WINDOW_DAYS: usize = 7;

/// Distance from the anchor to the newest training week's start.
/// 13 days puts the newest label day at `anchor - 6 days`, which is also the
/// first day of the evaluation window, so training never reads past the anchor.
pub const TRAINING_ANCHOR_OFFSET_DAYS: i64 = 13;

/// Walk-forward step between consecutive training weeks.
pub const WEEK_STRIDE_DAYS: i64 = 7;

pub struct NetworkDefaults {
    pub hidden_size: usize,
    pub learning_rate: f64,
    /// Upper bound on passes over the training set.
    pub max_epochs: usize,
    /// Training stops once mean squared error falls below this.
    pub error_threshold: f64,
    /// Weight initialisation half-width: weights start in `[-w, w]`.
    pub init_weight: f64,
    pub seed: u64,
}

pub struct PredictorDefaults {
    pub network: NetworkDefaults,
    /// Multiplier turning a predicted fractional change into a trade decision.
    pub decision_sensitivity: f64,
}

pub const PREDICTOR: PredictorDefaults = PredictorDefaults {
    network: NetworkDefaults {
        hidden_size: 4,
        learning_rate: 0.25,
        max_epochs: 250_000,
        error_threshold: 0.001,
        init_weight: 0.2,
        seed: 0x5EED,
    },
    decision_sensitivity: 5.0,
};
