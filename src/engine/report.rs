use {
    crate::utils::TimeUtils,
    chrono::{DateTime, Utc},
    itertools::Itertools,
    serde::{Deserialize, Serialize},
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotReport {
    pub name: String,
    /// Valued at the end price, or the last tradable price seen. `None` if the
    /// run never saw a price.
    pub final_value: Option<f64>,
    pub base_amount: f64,
    pub asset_amount: f64,
    pub invalid_decisions: usize,
    /// Pre-trade value per simulated day, aligned with [`SimulationReport::days`].
    pub value_history: Vec<Option<f64>>,
}

impl BotReport {
    /// Fractional return over the run, e.g. `0.05` for +5%.
    pub fn total_return(&self, starting_base: f64) -> Option<f64> {
        if starting_base <= 0.0 {
            return None;
        }
        self.final_value.map(|v| v / starting_base - 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub starting_base: f64,
    pub days: Vec<DateTime<Utc>>,
    pub bots: Vec<BotReport>,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Bot")]
    name: String,
    #[tabled(rename = "Final value")]
    final_value: String,
    #[tabled(rename = "Return")]
    total_return: String,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Invalid decisions")]
    invalid: usize,
}

fn fmt_opt(v: Option<f64>, f: impl Fn(f64) -> String) -> String {
    v.map(f).unwrap_or_else(|| "-".to_string())
}

impl SimulationReport {
    pub fn bot(&self, name: &str) -> Option<&BotReport> {
        self.bots.iter().find(|b| b.name == name)
    }

    pub fn summary_table(&self) -> String {
        let rows = self.bots.iter().map(|b| SummaryRow {
            name: b.name.clone(),
            final_value: fmt_opt(b.final_value, |v| format!("{:.2}", v)),
            total_return: fmt_opt(b.total_return(self.starting_base), |r| {
                format!("{:+.2}%", r * 100.0)
            }),
            base: format!("{:.2}", b.base_amount),
            asset: format!("{:.6}", b.asset_amount),
            invalid: b.invalid_decisions,
        });
        Table::new(rows).with(Style::rounded()).to_string()
    }

    /// One row per simulated day, one value column per bot. Unknown values are empty.
    pub fn to_csv(&self) -> String {
        let header = std::iter::once("date".to_string())
            .chain(self.bots.iter().map(|b| b.name.clone()))
            .join(",");

        let rows = self.days.iter().enumerate().map(|(i, day)| {
            std::iter::once(day.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
                .chain(self.bots.iter().map(|b| {
                    b.value_history
                        .get(i)
                        .copied()
                        .flatten()
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_default()
                }))
                .join(",")
        });

        std::iter::once(header).chain(rows).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::epoch_to_datetime;

    fn report() -> SimulationReport {
        let start = epoch_to_datetime(1_483_315_200).unwrap();
        let next = epoch_to_datetime(1_483_315_200 + TimeUtils::S_IN_D).unwrap();
        SimulationReport {
            start,
            end: next,
            starting_base: 1000.0,
            days: vec![start, next],
            bots: vec![
                BotReport {
                    name: "a".into(),
                    final_value: Some(1100.0),
                    base_amount: 0.0,
                    asset_amount: 10.0,
                    invalid_decisions: 0,
                    value_history: vec![None, Some(1000.0)],
                },
                BotReport {
                    name: "b".into(),
                    final_value: None,
                    base_amount: 1000.0,
                    asset_amount: 0.0,
                    invalid_decisions: 2,
                    value_history: vec![None, None],
                },
            ],
        }
    }

    #[test]
    fn csv_has_one_column_per_bot() {
        let csv = report().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["date,a,b", "2017-01-02,,", "2017-01-03,1000.00,"]);
    }

    #[test]
    fn summary_mentions_every_bot() {
        let r = report();
        let table = r.summary_table();
        assert!(table.contains("+10.00%"));
        assert!(table.contains("Invalid decisions"));
        assert!(table.contains(" - "));

        let ret = r.bot("a").and_then(|b| b.total_return(1000.0)).unwrap();
        assert!((ret - 0.1).abs() < 1e-12);
        assert!(r.bot("b").and_then(|b| b.total_return(1000.0)).is_none());
        assert!(r.bot("c").is_none());
    }
}
