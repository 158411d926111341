pub mod summary;
pub mod timeseries;

pub use summary::{pretty_print_comparison, SummaryMetrics};
pub use timeseries::{calculate_curve, max_drawdown, CurvePoint};
