// Core modules
pub mod analysis;
pub mod bots;
mod commands;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod predictor;
pub mod utils;

pub use {
    bots::{BotKind, TradingBot, create_bot},
    commands::run_cli,
    config::{PERSISTENCE, SIMULATION},
    engine::{SimulationConfig, SimulationReport, Simulator},
    models::PriceHistory,
    predictor::{NeuralPredictor, Predictor, predict_change},
};

// CLI argument parsing
use {
    chrono::{DateTime, Utc},
    clap::{Parser, Subcommand},
    std::path::PathBuf,
    utils::parse_datetime,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Walk-forward backtesting of ETH trading bots", long_about = None)]
pub struct Cli {
    /// SQLite file holding the price history
    #[arg(long, global = true, default_value = PERSISTENCE.db_path)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Replay stored history day by day and report each bot's account value
    Simulate {
        /// First simulated day (RFC 3339 or YYYY-MM-DD, UTC)
        #[arg(long, value_parser = parse_datetime)]
        start: Option<DateTime<Utc>>,
        /// Stop before this instant
        #[arg(long, value_parser = parse_datetime)]
        end: Option<DateTime<Utc>>,
        #[arg(long, value_enum, value_delimiter = ',', default_values_t = [BotKind::Predictor, BotKind::BuyAndHold, BotKind::Random])]
        bots: Vec<BotKind>,
        /// Seed for the random bot; entropy when absent
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = SIMULATION.starting_base)]
        starting_base: f64,
        /// Evaluate the bots of each day in parallel
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Also write the day-by-day value history as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Predict the next day's price change from the stored history
    Predict {
        #[arg(long, value_parser = parse_datetime)]
        date: DateTime<Utc>,
    },
    /// Train the network on all complete weeks before `date` and export it as JSON
    Train {
        /// Anchor day; defaults to the newest stored point
        #[arg(long, value_parser = parse_datetime)]
        date: Option<DateTime<Utc>>,
        #[arg(long, default_value = PERSISTENCE.model_path)]
        out: PathBuf,
    },
    /// Load a JSON file of [time, low, high, open, close, volume] candles into the store
    Import {
        file: PathBuf,
        /// Empty the store first
        #[arg(long, default_value_t = false)]
        replace: bool,
    },
    /// Show what the store holds
    Status,
}
