use crate::engine::aligner::AlignmentMode;
use crate::error::{BacktestError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

//complete backtest configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestConfiguration {
    //data
    pub data_path: PathBuf,
    pub symbol: String,
    pub benchmark: String,

    //date range, end is exclusive
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    //strategy
    pub fast_window: usize,
    pub slow_window: usize,

    //benchmark join
    pub alignment: AlignmentMode,

    //optional output path
    pub output_csv: Option<PathBuf>,
}

impl Default for BacktestConfiguration {
    fn default() -> Self {
        BacktestConfiguration {
            data_path: PathBuf::from("data.csv"),
            symbol: "ALPA4.SA".to_string(),
            benchmark: "^BVSP".to_string(),
            start_date: NaiveDate::from_ymd_opt(2021, 5, 27).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap_or_default(),
            fast_window: 7,
            slow_window: 40,
            alignment: AlignmentMode::ByDate,
            output_csv: None,
        }
    }
}

impl BacktestConfiguration {
    //load configuration from a JSON file, missing fields take their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BacktestConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    //checks windows and date range before anything is fetched
    pub fn validate(&self) -> Result<()> {
        if self.fast_window == 0 || self.slow_window == 0 || self.fast_window > self.slow_window {
            return Err(BacktestError::InvalidWindows {
                fast: self.fast_window,
                slow: self.slow_window,
            });
        }

        if self.fast_window == self.slow_window {
            warn!(
                window = self.fast_window,
                "fast and slow windows are equal, the strategy will always be short"
            );
        }

        if self.start_date >= self.end_date {
            return Err(BacktestError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }

    //fewest bars that still leave one row after warm-up and the signal lag
    pub fn required_bars(&self) -> usize {
        self.fast_window.max(self.slow_window).max(2) + 1
    }
}
