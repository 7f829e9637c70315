//! Day-stepping portfolio simulation.

use {
    super::{BotReport, BotState, SimulationReport},
    crate::{
        bots::{BOOTSTRAP_DAY, TradingBot},
        config::{DF, SIMULATION},
        domain::PriceField,
        models::PriceHistory,
        utils::{TimeUtils, add_days, epoch_sec_to_date_string, epoch_to_datetime},
    },
    chrono::{DateTime, Utc},
    rayon::prelude::*,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub start: DateTime<Utc>,
    /// Exclusive: the last simulated day is the last one strictly before `end`.
    pub end: DateTime<Utc>,
    pub starting_base: f64,
    /// Evaluate the bots of one day on the rayon pool. Days stay sequential.
    pub parallel_bots: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: epoch_to_datetime(SIMULATION.start_epoch).unwrap_or_default(),
            end: epoch_to_datetime(SIMULATION.end_epoch).unwrap_or_default(),
            starting_base: SIMULATION.starting_base,
            parallel_bots: false,
        }
    }
}

pub struct Simulator<'a> {
    series: &'a PriceHistory,
    config: SimulationConfig,
}

impl<'a> Simulator<'a> {
    pub fn new(series: &'a PriceHistory, config: SimulationConfig) -> Self {
        Self { series, config }
    }

    /// Replay `[start, end)` one UTC day at a time.
    ///
    /// Every bot sees the same history prefix for a day, ending at that day.
    /// Days without an exact price point are not traded; account values on
    /// those days fall back to the last tradable price.
    pub fn run(&self, bots: Vec<Box<dyn TradingBot>>) -> SimulationReport {
        let cfg = &self.config;
        let mut states: Vec<BotState> = bots
            .into_iter()
            .map(|bot| BotState::new(bot, cfg.starting_base))
            .collect();

        log::info!(
            "Simulating {} bots from {} to {} over {}",
            states.len(),
            epoch_sec_to_date_string(cfg.start.timestamp()),
            epoch_sec_to_date_string(cfg.end.timestamp()),
            self.series.describe()
        );

        let mut current = cfg.start;
        let mut day = BOOTSTRAP_DAY;
        let mut last_price: Option<f64> = None;
        let mut days = Vec::new();

        while current < cfg.end {
            let price = self.tradable_price(current);
            if price.is_none() {
                log::warn!(
                    "No price at {}, not trading today",
                    current.format(TimeUtils::LONG_TIME_FORMAT)
                );
            }
            let mark_price = price.or(last_price);
            last_price = mark_price;

            let history = self.series.slice_up_to_inclusive(current);

            crate::trace_time!("Simulation day", 100_000, {
                if cfg.parallel_bots {
                    states
                        .par_iter_mut()
                        .for_each(|s| s.step(&history, current, day, price, mark_price));
                } else {
                    for s in states.iter_mut() {
                        s.step(&history, current, day, price, mark_price);
                    }
                }
            });

            if DF.log_simulation_days {
                for s in &states {
                    log::info!(
                        "Day {} ({}) {}: base {:.2}, asset {:.6}",
                        day,
                        epoch_sec_to_date_string(current.timestamp()),
                        s.name(),
                        s.base_amount(),
                        s.asset_amount()
                    );
                }
            }

            days.push(current);
            current = add_days(current, 1);
            day += 1;
        }

        let final_price = self.tradable_price(cfg.end).or(last_price);
        let bots = states
            .iter()
            .map(|s| BotReport {
                name: s.name().to_string(),
                final_value: final_price.map(|p| s.total_value(p)),
                base_amount: s.base_amount(),
                asset_amount: s.asset_amount(),
                invalid_decisions: s.invalid_decisions(),
                value_history: s.value_history().to_vec(),
            })
            .collect();

        SimulationReport {
            start: cfg.start,
            end: cfg.end,
            starting_base: cfg.starting_base,
            days,
            bots,
        }
    }

    fn tradable_price(&self, at: DateTime<Utc>) -> Option<f64> {
        self.series
            .price_at(at, PriceField::Open)
            .filter(|p| p.is_finite() && *p > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bots::BuyAndHoldBot, domain::PricePoint};

    const T0: i64 = 1_483_315_200;
    const D: i64 = TimeUtils::S_IN_D;

    /// Records every history length it is shown.
    struct Spy(std::sync::Arc<std::sync::Mutex<Vec<usize>>>);

    impl TradingBot for Spy {
        fn name(&self) -> &str {
            "spy"
        }

        fn make_decision(&mut self, history: &PriceHistory, now: DateTime<Utc>, _day: u32) -> f64 {
            assert!(history.last_time().is_none_or(|t| t <= now.timestamp()));
            if let Ok(mut seen) = self.0.lock() {
                seen.push(history.len());
            }
            0.0
        }
    }

    fn config(days: i64) -> SimulationConfig {
        SimulationConfig {
            start: epoch_to_datetime(T0).unwrap(),
            end: epoch_to_datetime(T0 + days * D).unwrap(),
            starting_base: 1000.0,
            parallel_bots: false,
        }
    }

    #[test]
    fn bots_never_see_the_future() {
        let points = (0..48).map(|h| PricePoint::flat(T0 + h * 3600, 1.0)).collect();
        let series = PriceHistory::from_points(3600, points);
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));

        Simulator::new(&series, config(2)).run(vec![Box::new(Spy(seen.clone()))]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 25]);
    }

    #[test]
    fn empty_range_simulates_nothing() {
        let series = PriceHistory::from_points(D, vec![PricePoint::flat(T0, 5.0)]);
        let report = Simulator::new(&series, config(0)).run(vec![Box::new(BuyAndHoldBot::new())]);
        assert!(report.days.is_empty());
        assert_eq!(report.bots[0].final_value, Some(1000.0));
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let points = (0..10)
            .map(|d| PricePoint::flat(T0 + d * D, 100.0 + d as f64))
            .collect();
        let series = PriceHistory::from_points(D, points);

        let run = |parallel_bots| {
            let cfg = SimulationConfig {
                parallel_bots,
                ..config(8)
            };
            let bots: Vec<Box<dyn TradingBot>> = vec![
                Box::new(BuyAndHoldBot::new()),
                Box::new(crate::bots::RandomBot::seeded(3)),
            ];
            Simulator::new(&series, cfg).run(bots)
        };
        assert_eq!(run(false), run(true));
    }
}
