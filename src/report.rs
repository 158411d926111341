use crate::engine::{BacktestResult, DerivedSeries};
use crate::metrics::summary::pretty_print_comparison;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

//consumer of the three cumulative return curves
pub trait Reporter {
    fn report(&self, result: &BacktestResult) -> Result<(), ReportError>;
}

//prints a side by side summary to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct TableReporter;

impl Reporter for TableReporter {
    fn report(&self, result: &BacktestResult) -> Result<(), ReportError> {
        let series = &result.series;
        if let (Some(first), Some(last)) = (series.records.first(), series.records.last()) {
            println!(
                "Cumulative returns: MA strategy vs. {} vs. {} ({} to {}, {} days)\n",
                series.symbol,
                series.benchmark,
                first.date(),
                last.date(),
                series.len()
            );
        }

        pretty_print_comparison(&result.summaries());

        if let Some(full) = result.full_period_return {
            println!(
                "\n{} buy & hold over the full range, warm-up included: {:.2}%",
                series.symbol,
                full * 100.0
            );
        }

        Ok(())
    }
}

//exports one row per derived record
#[derive(Debug, Clone)]
pub struct CsvReporter {
    path: PathBuf,
}

impl CsvReporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvReporter {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Reporter for CsvReporter {
    fn report(&self, result: &BacktestResult) -> Result<(), ReportError> {
        let file = std::fs::File::create(&self.path)?;
        write_series_csv(&result.series, file)
    }
}

//writes the derived table as csv, undefined benchmark returns are left empty
pub fn write_series_csv<W: Write>(series: &DerivedSeries, writer: W) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "date",
        "adjusted_close",
        "fast_ma",
        "slow_ma",
        "daily_return",
        "position",
        "strategy_return",
        "cumulative_strategy_return",
        "cumulative_stock_return",
        "benchmark_return",
        "cumulative_benchmark_return",
    ])?;

    for record in &series.records {
        let s = &record.strategy;
        writer.write_record([
            s.date.to_string(),
            s.adjusted_close.to_string(),
            s.fast_ma.to_string(),
            s.slow_ma.to_string(),
            s.daily_return.to_string(),
            s.position.to_string(),
            s.strategy_return.to_string(),
            s.cumulative_strategy_return.to_string(),
            s.cumulative_stock_return.to_string(),
            record
                .benchmark_return
                .map(|r| r.to_string())
                .unwrap_or_default(),
            record.cumulative_benchmark_return.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
