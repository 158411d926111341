pub mod aligner;
pub mod backtest;
pub mod compounder;

pub use aligner::{align_benchmark, AlignmentMode, BenchmarkColumns};
pub use backtest::{
    run_pipeline, BacktestEngine, BacktestResult, DerivedRecord, DerivedSeries, StrategyFrame,
    StrategyRecord,
};
pub use compounder::{compound, compound_optional, returns_from_cumulative, strategy_returns};
