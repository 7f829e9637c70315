//! Configuration module for the crypto predictor.

// Can all be private now because we have a public re-export.
mod debug;
mod fetch;
mod persistence;
mod predictor;
mod simulation;

// Re-export commonly used items
pub use debug::{DF, LogFlags};
pub use fetch::{FETCH, FetchDefaults};
pub use persistence::{PERSISTENCE, PersistenceConfig};
pub use predictor::{
    NetworkDefaults, PREDICTOR, PredictorDefaults, TRAINING_ANCHOR_OFFSET_DAYS, WEEK_STRIDE_DAYS,
    WINDOW_DAYS,
};
pub use simulation::{SIMULATION, SimulationDefaults};

/// Activates the `trace_time!` macro.
pub const LOG_PERFORMANCE: bool = DF.log_performance;
