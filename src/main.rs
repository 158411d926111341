use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crossover::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "crossover")]
#[command(about = "Backtest a moving average crossover against buy & hold and an index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest
    Run {
        //json configuration, flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        //path to csv price file (date,symbol,adj_close)
        #[arg(long)]
        data: Option<PathBuf>,

        //symbol to trade (eg ALPA4.SA)
        #[arg(long)]
        symbol: Option<String>,

        //benchmark index symbol (eg ^BVSP)
        #[arg(long)]
        benchmark: Option<String>,

        //first date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        //last date, exclusive (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        //fast moving average window
        #[arg(long)]
        fast: Option<usize>,

        //slow moving average window
        #[arg(long)]
        slow: Option<usize>,

        //how benchmark rows are matched to the primary rows
        #[arg(long, value_enum)]
        alignment: Option<AlignmentMode>,

        //output path for the derived series csv
        #[arg(long)]
        output_csv: Option<PathBuf>,
    },

    //write the default configuration as json
    InitConfig {
        #[arg(long, default_value = "crossover.json")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "crossover=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data,
            symbol,
            benchmark,
            start,
            end,
            fast,
            slow,
            alignment,
            output_csv,
        } => {
            let mut configuration = match config {
                Some(path) => BacktestConfiguration::from_json_file(&path)
                    .context(format!("Failed to load configuration from {:?}", path))?,
                None => BacktestConfiguration::default(),
            };

            if let Some(data) = data {
                configuration.data_path = data;
            }
            if let Some(symbol) = symbol {
                configuration.symbol = symbol;
            }
            if let Some(benchmark) = benchmark {
                configuration.benchmark = benchmark;
            }
            if let Some(start) = start {
                configuration.start_date = start;
            }
            if let Some(end) = end {
                configuration.end_date = end;
            }
            if let Some(fast) = fast {
                configuration.fast_window = fast;
            }
            if let Some(slow) = slow {
                configuration.slow_window = slow;
            }
            if let Some(alignment) = alignment {
                configuration.alignment = alignment;
            }
            if output_csv.is_some() {
                configuration.output_csv = output_csv;
            }

            run_backtest(configuration)?;
        }
        Commands::InitConfig { path } => {
            BacktestConfiguration::default()
                .to_json_file(&path)
                .context(format!("Failed to write configuration to {:?}", path))?;
            println!("Default configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn run_backtest(config: BacktestConfiguration) -> Result<()> {
    println!("Moving Average Crossover Backtest");
    println!("=================================\n");

    println!("Symbol: {}", config.symbol);
    println!("Benchmark: {}", config.benchmark);
    println!("Period: {} to {}", config.start_date, config.end_date);
    println!(
        "Windows: fast {} / slow {}\n",
        config.fast_window, config.slow_window
    );

    let source = CsvPriceSource::new(&config.data_path);
    let output_csv = config.output_csv.clone();

    let engine = BacktestEngine::new(config).context("Invalid configuration")?;
    let result = engine
        .run(&source)
        .context(format!("Backtest failed for {}", engine.config().symbol))?;

    TableReporter.report(&result)?;

    if let Some(path) = output_csv {
        CsvReporter::new(&path)
            .report(&result)
            .context(format!("Failed to write {:?}", path))?;
        info!(path = ?path, rows = result.series.len(), "derived series exported");
        println!("\nDerived series saved to {:?}", path);
    }

    Ok(())
}
