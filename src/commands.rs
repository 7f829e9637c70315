use {
    crate::{
        Cli, Command,
        bots::{BotKind, TradingBot, create_bot},
        config::SIMULATION,
        data::{PriceHistoryStorage, SqliteStorage, load_price_history, read_candle_file},
        engine::{SimulationConfig, Simulator},
        models::PriceHistory,
        predictor::{NeuralPredictor, train_for_anchor, try_predict_change},
        utils::{epoch_sec_to_date_string, epoch_to_datetime},
    },
    anyhow::{Context, Result, bail},
    chrono::{DateTime, Utc},
    std::path::{Path, PathBuf},
};

pub async fn run_cli(cli: Cli) -> Result<()> {
    let storage = open_storage(&cli.db).await?;

    match cli.command {
        Command::Simulate {
            start,
            end,
            bots,
            seed,
            starting_base,
            parallel,
            csv,
        } => {
            let defaults = SimulationConfig::default();
            let config = SimulationConfig {
                start: start.unwrap_or(defaults.start),
                end: end.unwrap_or(defaults.end),
                starting_base,
                parallel_bots: parallel,
            };
            simulate(&storage, config, &bots, seed, csv.as_deref()).await
        }
        Command::Predict { date } => predict(&storage, date).await,
        Command::Train { date, out } => train(&storage, date, out).await,
        Command::Import { file, replace } => import(&storage, &file, replace).await,
        Command::Status => status(&storage).await,
    }
}

async fn open_storage(db: &Path) -> Result<SqliteStorage> {
    let path = db.to_string_lossy();
    let storage = SqliteStorage::new(&path).await?;
    storage
        .initialize()
        .await
        .context("creating price history table")?;
    Ok(storage)
}

async fn load_nonempty(storage: &SqliteStorage) -> Result<PriceHistory> {
    let series = load_price_history(storage, SIMULATION.interval_secs).await?;
    if series.is_empty() {
        bail!("the price history store is empty; run `import` first");
    }
    Ok(series)
}

async fn simulate(
    storage: &SqliteStorage,
    config: SimulationConfig,
    kinds: &[BotKind],
    seed: Option<u64>,
    csv: Option<&Path>,
) -> Result<()> {
    if config.end < config.start {
        bail!("simulation end is before its start");
    }
    let series = load_nonempty(storage).await?;
    let bots: Vec<Box<dyn TradingBot>> = kinds.iter().map(|&k| create_bot(k, seed)).collect();

    let report = tokio::task::spawn_blocking(move || Simulator::new(&series, config).run(bots))
        .await
        .context("simulation thread failed")?;

    println!("{}", report.summary_table());
    if let Some(path) = csv {
        tokio::fs::write(path, report.to_csv())
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote value history to {}", path.display());
    }
    Ok(())
}

async fn predict(storage: &SqliteStorage, date: DateTime<Utc>) -> Result<()> {
    let series = load_nonempty(storage).await?.slice_up_to_inclusive(date);
    let day = epoch_sec_to_date_string(date.timestamp());

    let outcome =
        tokio::task::spawn_blocking(move || try_predict_change(&NeuralPredictor::default(), &series, date))
            .await
            .context("prediction thread failed")?;

    match outcome {
        Ok(change) => println!("Predicted change after {}: {:+.2}%", day, change * 100.0),
        Err(e) => println!("No prediction for {}: {}", day, e),
    }
    Ok(())
}

async fn train(storage: &SqliteStorage, date: Option<DateTime<Utc>>, out: PathBuf) -> Result<()> {
    let series = load_nonempty(storage).await?;
    let anchor = match date {
        Some(date) => date,
        None => series
            .last_time()
            .and_then(epoch_to_datetime)
            .context("no usable anchor in the stored history")?,
    };

    let network = tokio::task::spawn_blocking(move || {
        train_for_anchor(&NeuralPredictor::default(), &series, anchor)
    })
    .await
    .context("training thread failed")?
    .with_context(|| format!("training for {}", epoch_sec_to_date_string(anchor.timestamp())))?;

    let json = serde_json::to_string_pretty(&network)?;
    tokio::fs::write(&out, json)
        .await
        .with_context(|| format!("writing {}", out.display()))?;
    println!("Model written to {}", out.display());
    Ok(())
}

async fn import(storage: &SqliteStorage, file: &Path, replace: bool) -> Result<()> {
    let points = read_candle_file(file).await?;
    if replace {
        let removed = storage.delete_all().await?;
        log::info!("Removed {} stored points", removed);
    }
    let inserted = storage
        .insert_points(&points)
        .await
        .context("storing imported points")?;
    println!(
        "Imported {} new points ({} in file)",
        inserted,
        points.len()
    );
    Ok(())
}

async fn status(storage: &SqliteStorage) -> Result<()> {
    let count = storage.count().await?;
    match storage.latest_time().await? {
        Some(latest) => println!(
            "{} points stored, newest {}",
            count,
            epoch_sec_to_date_string(latest)
        ),
        None => println!("Store is empty"),
    }
    Ok(())
}
