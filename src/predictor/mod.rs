//! Pluggable price-change predictors.
//!
//! A [`Predictor`] turns a set of training windows into a model and a model
//! plus one evaluation window into a normalized prediction. Callers never get
//! a hard failure from this module: "cannot train" and "cannot build today's
//! window" both surface as `None` from [`predict_change`].

mod network;
mod neural;

use {
    crate::{
        analysis::{WindowError, WindowGenerator, denormalize},
        config::WINDOW_DAYS,
        models::{PriceHistory, Window},
        utils::epoch_sec_to_date_string,
    },
    chrono::{DateTime, Utc},
    thiserror::Error,
};

pub use {
    network::FeedForwardNetwork,
    neural::{NetworkConfig, NeuralPredictor},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictorError {
    #[error("no complete training weeks available")]
    TrainingUnavailable,
    #[error("no evaluation window: {0}")]
    NoWindow(#[from] WindowError),
}

pub trait Predictor: Send + Sync {
    type Model: Send;

    /// Fit a model. Must return `TrainingUnavailable` when `windows` holds no labelled window.
    fn train(&self, windows: &[Window]) -> Result<Self::Model, PredictorError>;

    /// Normalized prediction (0.5 = no change) for the day after `inputs`.
    fn predict(&self, model: &Self::Model, inputs: &[f64; WINDOW_DAYS]) -> f64;
}

/// Train on every complete week before `anchor`.
pub fn train_for_anchor<P: Predictor>(
    predictor: &P,
    series: &PriceHistory,
    anchor: DateTime<Utc>,
) -> Result<P::Model, PredictorError> {
    let windows = WindowGenerator::new(series)
        .training_windows(anchor)
        .map_err(|_| PredictorError::TrainingUnavailable)?;
    predictor.train(&windows)
}

/// Predicted fractional price change for the day after `anchor`
/// (e.g. `-0.12` for a 12% drop), using only data in `series`.
pub fn try_predict_change<P: Predictor>(
    predictor: &P,
    series: &PriceHistory,
    anchor: DateTime<Utc>,
) -> Result<f64, PredictorError> {
    // Cheap check first so a gap doesn't cost a full training run.
    let window = WindowGenerator::new(series).evaluation_window(anchor)?;
    let model = train_for_anchor(predictor, series, anchor)?;
    let normalized = predictor.predict(&model, &window.inputs);
    Ok(denormalize(normalized))
}

/// Soft-failing form of [`try_predict_change`].
pub fn predict_change<P: Predictor>(
    predictor: &P,
    series: &PriceHistory,
    anchor: DateTime<Utc>,
) -> Option<f64> {
    match try_predict_change(predictor, series, anchor) {
        Ok(change) => Some(change),
        Err(e) => {
            log::info!(
                "No prediction for {}: {}",
                epoch_sec_to_date_string(anchor.timestamp()),
                e
            );
            None
        }
    }
}
