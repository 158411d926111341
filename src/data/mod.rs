pub mod bar;
pub mod loader;
pub mod series;

pub use bar::{BarError, PriceBar};
pub use loader::{CsvPriceSource, InMemoryPriceSource, PriceSource};
pub use series::{PriceSeries, SeriesError};
