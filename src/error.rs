use crate::data::bar::BarError;
use crate::data::series::SeriesError;
use chrono::NaiveDate;
use thiserror::Error;

//failures raised while joining the benchmark onto the primary table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    #[error("Benchmark has {benchmark} returns but the primary series needs {primary}")]
    BenchmarkTooShort { benchmark: usize, primary: usize },
    #[error("Benchmark has no bar on {date}")]
    MissingBenchmarkDate { date: NaiveDate },
}

//every way a backtest run can fail
#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Failed to fetch prices for {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    #[error("No prices for {symbol} between {start} and {end}")]
    EmptyResult {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Insufficient history for {symbol}: {bars} bars, at least {required} required")]
    InsufficientHistory {
        symbol: String,
        bars: usize,
        required: usize,
    },

    #[error("Invalid moving average windows: fast {fast}, slow {slow}")]
    InvalidWindows { fast: usize, slow: usize },

    #[error("Invalid date range: start {start} is not before end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error(transparent)]
    Bar(#[from] BarError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

pub type Result<T> = std::result::Result<T, BacktestError>;
