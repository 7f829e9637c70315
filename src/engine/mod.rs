mod report;
mod simulator;
mod state;

pub use {
    report::{BotReport, SimulationReport},
    simulator::{SimulationConfig, Simulator},
    state::BotState,
};
