use crate::data::bar::PriceBar;
use crate::data::series::PriceSeries;
use crate::error::{BacktestError, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

//boundary to whatever supplies daily prices
//start is inclusive, end is exclusive
pub trait PriceSource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries>;
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: String,
    symbol: String,
    adj_close: f64,
}

//reads bars for many symbols from a single csv file
//expected header: date,symbol,adj_close
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvPriceSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_symbol(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| fetch_error(symbol, format!("cannot open {:?}: {}", self.path, e)))?;

        let mut bars = Vec::new();

        for (index, result) in reader.deserialize().enumerate() {
            let record: CsvRecord = result.map_err(|e| {
                fetch_error(symbol, format!("bad record at line {}: {}", index + 2, e))
            })?;

            if record.symbol != symbol {
                continue;
            }

            let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|e| {
                fetch_error(
                    symbol,
                    format!("bad date '{}' at line {}: {}", record.date, index + 2, e),
                )
            })?;

            bars.push(PriceBar::new(date, record.adj_close)?);
        }

        //files are not required to be sorted
        bars.sort_by_key(|b| b.date);

        Ok(bars)
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        debug!(symbol, %start, %end, path = ?self.path, "reading prices from csv");
        let bars = self.read_symbol(symbol)?;
        select_range(symbol, bars, start, end)
    }
}

//prices held in memory, keyed by symbol
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    bars: HashMap<String, Vec<PriceBar>>,
}

impl InMemoryPriceSource {
    pub fn new() -> Self {
        InMemoryPriceSource::default()
    }

    //adds or replaces the history of one symbol
    pub fn insert(&mut self, series: PriceSeries) {
        self.bars
            .insert(series.symbol().to_string(), series.bars().to_vec());
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }
}

impl PriceSource for InMemoryPriceSource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let bars = self
            .bars
            .get(symbol)
            .ok_or_else(|| fetch_error(symbol, "unknown symbol"))?;
        select_range(symbol, bars.clone(), start, end)
    }
}

//keeps bars in [start, end) and rejects an empty result
fn select_range(
    symbol: &str,
    bars: Vec<PriceBar>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries> {
    let selected: Vec<PriceBar> = bars
        .into_iter()
        .filter(|b| b.date >= start && b.date < end)
        .collect();

    if selected.is_empty() {
        return Err(BacktestError::EmptyResult {
            symbol: symbol.to_string(),
            start,
            end,
        });
    }

    Ok(PriceSeries::new(symbol, selected)?)
}

fn fetch_error(symbol: &str, reason: impl Into<String>) -> BacktestError {
    BacktestError::Fetch {
        symbol: symbol.to_string(),
        reason: reason.into(),
    }
}
