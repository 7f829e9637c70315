// Feature generation: normalization and walk-forward windows
mod normalize;
mod window_generator;

use thiserror::Error;

pub use {
    normalize::{NO_CHANGE, denormalize, normalize},
    window_generator::WindowGenerator,
};

/// Why a window could not be built. All of these are routine (upstream data
/// has holes) and the caller skips the window rather than failing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    #[error("no price point at epoch {0}")]
    Gap(i64),
    #[error("index {index} is outside the series (len {len})")]
    OutOfRange { index: i64, len: usize },
    #[error("previous price is zero")]
    ZeroPrice,
    #[error("normalized change is not finite")]
    NonFinite,
}
