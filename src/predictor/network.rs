//! Small fully-connected network: inputs -> sigmoid hidden layer -> one sigmoid output.

use {
    rand::Rng,
    serde::{Deserialize, Serialize},
};

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNetwork {
    /// One row of input weights per hidden unit
    hidden_weights: Vec<Vec<f64>>,
    hidden_biases: Vec<f64>,
    output_weights: Vec<f64>,
    output_bias: f64,
}

impl FeedForwardNetwork {
    /// Weights and biases drawn uniformly from `[-init_weight, init_weight]`.
    pub fn new<R: Rng>(input_size: usize, hidden_size: usize, init_weight: f64, rng: &mut R) -> Self {
        let mut draw = || {
            if init_weight > 0.0 {
                rng.gen_range(-init_weight..=init_weight)
            } else {
                0.0
            }
        };

        let hidden_weights = (0..hidden_size)
            .map(|_| (0..input_size).map(|_| draw()).collect())
            .collect();
        let hidden_biases = (0..hidden_size).map(|_| draw()).collect();
        let output_weights = (0..hidden_size).map(|_| draw()).collect();
        let output_bias = draw();

        Self {
            hidden_weights,
            hidden_biases,
            output_weights,
            output_bias,
        }
    }

    fn hidden_activations(&self, input: &[f64]) -> Vec<f64> {
        self.hidden_weights
            .iter()
            .zip(&self.hidden_biases)
            .map(|(weights, bias)| {
                let sum: f64 = weights.iter().zip(input).map(|(w, x)| w * x).sum();
                sigmoid(sum + bias)
            })
            .collect()
    }

    fn output_activation(&self, hidden: &[f64]) -> f64 {
        let sum: f64 = self
            .output_weights
            .iter()
            .zip(hidden)
            .map(|(w, h)| w * h)
            .sum();
        sigmoid(sum + self.output_bias)
    }

    /// Output in `(0, 1)`. Extra inputs are ignored, missing ones count as zero.
    pub fn forward(&self, input: &[f64]) -> f64 {
        let hidden = self.hidden_activations(input);
        self.output_activation(&hidden)
    }

    /// One gradient-descent step on a single sample. Returns the squared error
    /// measured before the update.
    pub fn train_sample(&mut self, input: &[f64], target: f64, learning_rate: f64) -> f64 {
        let hidden = self.hidden_activations(input);
        let output = self.output_activation(&hidden);

        let error = output - target;
        let output_delta = error * output * (1.0 - output);

        // Hidden deltas use the output weights as they were before this step.
        let hidden_deltas: Vec<f64> = hidden
            .iter()
            .zip(&self.output_weights)
            .map(|(h, w)| output_delta * w * h * (1.0 - h))
            .collect();

        for (w, h) in self.output_weights.iter_mut().zip(&hidden) {
            *w -= learning_rate * output_delta * h;
        }
        self.output_bias -= learning_rate * output_delta;

        for ((weights, bias), delta) in self
            .hidden_weights
            .iter_mut()
            .zip(self.hidden_biases.iter_mut())
            .zip(&hidden_deltas)
        {
            for (w, x) in weights.iter_mut().zip(input) {
                *w -= learning_rate * delta * x;
            }
            *bias -= learning_rate * delta;
        }

        error * error
    }
}
