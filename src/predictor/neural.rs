use {
    super::{FeedForwardNetwork, Predictor, PredictorError},
    crate::{
        config::{DF, PREDICTOR, WINDOW_DAYS},
        models::Window,
    },
    rand::SeedableRng,
    rand_chacha::ChaCha8Rng,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub error_threshold: f64,
    pub init_weight: f64,
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let defaults = &PREDICTOR.network;
        Self {
            hidden_size: defaults.hidden_size,
            learning_rate: defaults.learning_rate,
            max_epochs: defaults.max_epochs,
            error_threshold: defaults.error_threshold,
            init_weight: defaults.init_weight,
            seed: defaults.seed,
        }
    }
}

/// Default predictor: a 7-4-1 sigmoid network fitted from scratch on every
/// call to `train`. The seed is fixed per config, so identical training sets
/// give identical models.
#[derive(Debug, Clone, Default)]
pub struct NeuralPredictor {
    config: NetworkConfig,
}

impl NeuralPredictor {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }
}

impl Predictor for NeuralPredictor {
    type Model = FeedForwardNetwork;

    fn train(&self, windows: &[Window]) -> Result<FeedForwardNetwork, PredictorError> {
        let samples: Vec<(&[f64; WINDOW_DAYS], f64)> = windows
            .iter()
            .filter_map(|w| w.output.map(|target| (&w.inputs, target)))
            .collect();
        if samples.is_empty() {
            return Err(PredictorError::TrainingUnavailable);
        }

        let cfg = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        let mut network =
            FeedForwardNetwork::new(WINDOW_DAYS, cfg.hidden_size, cfg.init_weight, &mut rng);

        let mut epochs = 0;
        let mut mse = f64::INFINITY;
        crate::trace_time!("Network fit", 50_000, {
            while epochs < cfg.max_epochs {
                let total: f64 = samples
                    .iter()
                    .map(|(inputs, target)| {
                        network.train_sample(inputs.as_slice(), *target, cfg.learning_rate)
                    })
                    .sum();
                mse = total / samples.len() as f64;
                epochs += 1;
                if mse < cfg.error_threshold {
                    break;
                }
            }
        });

        if DF.log_training {
            log::info!(
                "Fitted network on {} weeks: {} epochs, mse {:.6}",
                samples.len(),
                epochs,
                mse
            );
        }

        Ok(network)
    }

    fn predict(&self, model: &FeedForwardNetwork, inputs: &[f64; WINDOW_DAYS]) -> f64 {
        model.forward(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> NetworkConfig {
        NetworkConfig {
            max_epochs: 2_000,
            error_threshold: 1e-5,
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn empty_or_label_free_sets_cannot_train() {
        let predictor = NeuralPredictor::new(quick_config());
        assert_eq!(
            predictor.train(&[]).unwrap_err(),
            PredictorError::TrainingUnavailable
        );
        let unlabeled = [Window::evaluation([0.5; WINDOW_DAYS])];
        assert_eq!(
            predictor.train(&unlabeled).unwrap_err(),
            PredictorError::TrainingUnavailable
        );
    }

    #[test]
    fn learns_a_constant_target() {
        let predictor = NeuralPredictor::new(quick_config());
        let windows: Vec<Window> = (0..6)
            .map(|i| {
                let mut inputs = [0.5; WINDOW_DAYS];
                inputs[i] = 0.55;
                Window::training(inputs, 0.6)
            })
            .collect();

        let model = predictor.train(&windows).unwrap();
        let out = predictor.predict(&model, &[0.5; WINDOW_DAYS]);
        assert!((out - 0.6).abs() < 0.05, "prediction {} too far from 0.6", out);
    }

    #[test]
    fn training_is_reproducible() {
        let predictor = NeuralPredictor::new(quick_config());
        let windows = [
            Window::training([0.45; WINDOW_DAYS], 0.52),
            Window::training([0.55; WINDOW_DAYS], 0.48),
        ];
        assert_eq!(
            predictor.train(&windows).unwrap(),
            predictor.train(&windows).unwrap()
        );
    }
}
