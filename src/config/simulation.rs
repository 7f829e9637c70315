//! Simulation defaults

pub struct SimulationDefaults {
    /// Base currency every bot starts with.
    pub starting_base: f64,
    /// 2017-01-02T00:00:00Z
    pub start_epoch: i64,
    /// 2017-03-16T00:00:00Z
    pub end_epoch: i64,
    /// Native sampling interval of stored price history.
    pub interval_secs: i64,
}

pub const SIMULATION: SimulationDefaults = SimulationDefaults {
    starting_base: 1000.0,
    start_epoch: 1_483_315_200,
    end_epoch: 1_489_622_400,
    interval_secs: 3600,
};
