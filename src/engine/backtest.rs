use crate::config::BacktestConfiguration;
use crate::data::{PriceSeries, PriceSource};
use crate::engine::aligner::align_benchmark;
use crate::engine::compounder::{compound, strategy_returns};
use crate::error::{BacktestError, Result};
use crate::metrics::SummaryMetrics;
use crate::strategy::{shift_forward, CrossoverSignal, MovingAverages, Position};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

//one warmed-up row of the primary symbol
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StrategyRecord {
    pub date: NaiveDate,
    pub adjusted_close: f64,
    pub fast_ma: f64,
    pub slow_ma: f64,
    pub daily_return: f64,
    pub position: Position,
    pub strategy_return: f64,
    pub cumulative_strategy_return: f64,
    pub cumulative_stock_return: f64,
}

//primary rows that survived the moving average warm-up and the signal lag
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StrategyFrame {
    pub symbol: String,
    pub records: Vec<StrategyRecord>,
}

impl StrategyFrame {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    //joins benchmark returns onto every row, nothing is returned on failure
    pub fn with_benchmark(
        self,
        benchmark: &PriceSeries,
        config: &BacktestConfiguration,
    ) -> Result<DerivedSeries> {
        let columns = align_benchmark(config.alignment, &self.dates(), benchmark)?;

        let records = self
            .records
            .into_iter()
            .zip(columns.returns.into_iter().zip(columns.cumulative))
            .map(|(strategy, (benchmark_return, cumulative_benchmark_return))| DerivedRecord {
                strategy,
                benchmark_return,
                cumulative_benchmark_return,
            })
            .collect();

        Ok(DerivedSeries {
            symbol: self.symbol,
            benchmark: benchmark.symbol().to_string(),
            records,
        })
    }
}

//a complete output row
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DerivedRecord {
    #[serde(flatten)]
    pub strategy: StrategyRecord,
    //undefined when the benchmark has no earlier bar for this row
    pub benchmark_return: Option<f64>,
    pub cumulative_benchmark_return: f64,
}

impl DerivedRecord {
    pub fn date(&self) -> NaiveDate {
        self.strategy.date
    }
}

//the three cumulative return curves on a shared date axis
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DerivedSeries {
    pub symbol: String,
    pub benchmark: String,
    pub records: Vec<DerivedRecord>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date()).collect()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.records.iter().map(|r| r.strategy.position).collect()
    }

    pub fn strategy_returns(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.strategy.strategy_return).collect()
    }

    pub fn cumulative_strategy(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.strategy.cumulative_strategy_return)
            .collect()
    }

    pub fn cumulative_stock(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.strategy.cumulative_stock_return)
            .collect()
    }

    pub fn cumulative_benchmark(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.cumulative_benchmark_return)
            .collect()
    }

    //share of rows where the strategy was long
    pub fn long_exposure(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let long = self
            .records
            .iter()
            .filter(|r| r.strategy.position.is_long())
            .count();
        long as f64 / self.records.len() as f64
    }
}

//result of a backtest
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub series: DerivedSeries,
    pub strategy: SummaryMetrics,
    pub stock: SummaryMetrics,
    pub benchmark: SummaryMetrics,
    //buy and hold over every fetched bar, warm-up included
    pub full_period_return: Option<f64>,
}

impl BacktestResult {
    pub fn from_series(series: DerivedSeries, full_period_return: Option<f64>) -> Self {
        let dates = series.dates();

        let strategy = SummaryMetrics::from_curve(
            "MA Strategy",
            &dates,
            &series.cumulative_strategy(),
        )
        .with_exposure(series.long_exposure());
        let stock = SummaryMetrics::from_curve(
            format!("{} Buy & Hold", series.symbol),
            &dates,
            &series.cumulative_stock(),
        );
        let benchmark = SummaryMetrics::from_curve(
            series.benchmark.clone(),
            &dates,
            &series.cumulative_benchmark(),
        );

        BacktestResult {
            series,
            strategy,
            stock,
            benchmark,
            full_period_return,
        }
    }

    pub fn summaries(&self) -> [SummaryMetrics; 3] {
        [
            self.strategy.clone(),
            self.stock.clone(),
            self.benchmark.clone(),
        ]
    }
}

//main backtest engine
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    config: BacktestConfiguration,
    signal: CrossoverSignal,
}

impl BacktestEngine {
    //creates a new backtest engine, rejecting an invalid configuration
    pub fn new(config: BacktestConfiguration) -> Result<Self> {
        config.validate()?;
        let signal = CrossoverSignal::new(config.fast_window, config.slow_window);
        Ok(BacktestEngine { config, signal })
    }

    pub fn config(&self) -> &BacktestConfiguration {
        &self.config
    }

    //fetches both symbols and runs the full pipeline
    pub fn run(&self, source: &dyn PriceSource) -> Result<BacktestResult> {
        let config = &self.config;

        info!(
            symbol = %config.symbol,
            start = %config.start_date,
            end = %config.end_date,
            "fetching primary series"
        );
        let primary = source.fetch(&config.symbol, config.start_date, config.end_date)?;

        let frame = self.derive(&primary)?;

        //a non-empty frame always has a first date
        let benchmark_start = frame.first_date().unwrap_or(config.start_date);
        info!(
            benchmark = %config.benchmark,
            start = %benchmark_start,
            "fetching benchmark series"
        );
        let benchmark = source.fetch(&config.benchmark, benchmark_start, config.end_date)?;

        let series = frame.with_benchmark(&benchmark, config)?;
        info!(rows = series.len(), "backtest complete");

        Ok(BacktestResult::from_series(series, primary.total_return()))
    }

    //moving averages, lagged positions and compounded returns for the primary series
    pub fn derive(&self, primary: &PriceSeries) -> Result<StrategyFrame> {
        let required = self.config.required_bars();
        if primary.len() < required {
            return Err(BacktestError::InsufficientHistory {
                symbol: primary.symbol().to_string(),
                bars: primary.len(),
                required,
            });
        }

        let averages = MovingAverages::compute(
            primary,
            self.signal.fast_window(),
            self.signal.slow_window(),
        );
        let daily_returns = primary.daily_returns();

        //first row with both means and a daily return
        let warm = averages.first_defined().unwrap_or(primary.len()).max(1);
        debug!(warm_up_rows = warm, "moving averages computed");

        //signals from before the warm-up never reach a position
        let mut raw = self.signal.raw_positions(&averages);
        for value in raw.iter_mut().take(warm) {
            *value = None;
        }
        let held = shift_forward(&raw);

        let mut rows = Vec::with_capacity(primary.len().saturating_sub(warm + 1));
        for (i, bar) in primary.bars().iter().enumerate().skip(warm + 1) {
            if let (Some((fast_ma, slow_ma)), Some(daily_return), Some(position)) =
                (averages.at(i), daily_returns[i], held[i])
            {
                rows.push((bar.date, bar.adjusted_close, fast_ma, slow_ma, daily_return, position));
            }
        }

        let daily: Vec<f64> = rows.iter().map(|r| r.4).collect();
        let positions: Vec<Position> = rows.iter().map(|r| r.5).collect();
        let strategy = strategy_returns(&daily, &positions);
        let cumulative_strategy = compound(&strategy);
        let cumulative_stock = compound(&daily);

        let records = rows
            .into_iter()
            .enumerate()
            .map(
                |(i, (date, adjusted_close, fast_ma, slow_ma, daily_return, position))| {
                    StrategyRecord {
                        date,
                        adjusted_close,
                        fast_ma,
                        slow_ma,
                        daily_return,
                        position,
                        strategy_return: strategy[i],
                        cumulative_strategy_return: cumulative_strategy[i],
                        cumulative_stock_return: cumulative_stock[i],
                    }
                },
            )
            .collect::<Vec<_>>();

        debug!(rows = records.len(), "strategy returns compounded");

        Ok(StrategyFrame {
            symbol: primary.symbol().to_string(),
            records,
        })
    }
}

//pure pipeline over already fetched series
pub fn run_pipeline(
    config: &BacktestConfiguration,
    primary: &PriceSeries,
    benchmark: &PriceSeries,
) -> Result<DerivedSeries> {
    let engine = BacktestEngine::new(config.clone())?;
    engine.derive(primary)?.with_benchmark(benchmark, config)
}
