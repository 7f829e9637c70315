//! Debugging feature flags.

pub struct LogFlags {
    /// Activate trace_time macro (scope-level timing of training and simulation days)
    pub log_performance: bool,

    /// Per-day balance and trade lines from the simulator.
    pub log_simulation_days: bool,

    /// Weeks skipped by the walk-forward generator (missing anchors, gaps).
    pub log_window_skips: bool,

    /// Epoch count and final error of every network fit.
    pub log_training: bool,

    pub log_storage: bool,

    pub log_fetch: bool,
}

pub const DF: LogFlags = LogFlags {
    log_window_skips: true,
    log_fetch: true,

    log_performance: false,
    log_simulation_days: false,
    log_training: false,
    log_storage: false,
};
