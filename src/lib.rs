//a Rust-based moving average crossover backtester for equities against a benchmark index

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::BacktestConfiguration;
    pub use crate::data::{CsvPriceSource, InMemoryPriceSource, PriceBar, PriceSeries, PriceSource};
    pub use crate::engine::{
        run_pipeline, AlignmentMode, BacktestEngine, BacktestResult, DerivedRecord, DerivedSeries,
    };
    pub use crate::error::{AlignmentError, BacktestError};
    pub use crate::metrics::SummaryMetrics;
    pub use crate::report::{CsvReporter, Reporter, TableReporter};
    pub use crate::strategy::{CrossoverSignal, MovingAverages, Position};
}
