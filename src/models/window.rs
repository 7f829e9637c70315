use {
    crate::config::WINDOW_DAYS,
    serde::{Deserialize, Serialize},
};

/// Seven normalized day-over-day changes ending at an anchor day, plus the
/// following day's change when the window is used for training.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub inputs: [f64; WINDOW_DAYS],
    pub output: Option<f64>,
}

impl Window {
    pub fn evaluation(inputs: [f64; WINDOW_DAYS]) -> Self {
        Self {
            inputs,
            output: None,
        }
    }

    pub fn training(inputs: [f64; WINDOW_DAYS], output: f64) -> Self {
        Self {
            inputs,
            output: Some(output),
        }
    }

    pub fn is_training(&self) -> bool {
        self.output.is_some()
    }
}
