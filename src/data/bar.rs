use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarError {
    #[error("Invalid adjusted close on {date}: {close} is not a finite positive price")]
    InvalidClose { date: NaiveDate, close: f64 },
}

//a single daily bar, reduced to the dividend and split adjusted close
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub adjusted_close: f64,
}

impl PriceBar {
    //creates a new PriceBar with validation
    pub fn new(date: NaiveDate, adjusted_close: f64) -> Result<Self, BarError> {
        //returns divide by the previous close, so it must be usable as a divisor
        if !adjusted_close.is_finite() || adjusted_close <= 0.0 {
            return Err(BarError::InvalidClose {
                date,
                close: adjusted_close,
            });
        }

        Ok(PriceBar {
            date,
            adjusted_close,
        })
    }

    //creates a PriceBar without validation
    pub fn new_unchecked(date: NaiveDate, adjusted_close: f64) -> Self {
        PriceBar {
            date,
            adjusted_close,
        }
    }

    //simple return from a previous bar to this one
    pub fn return_since(&self, previous: &PriceBar) -> f64 {
        self.adjusted_close / previous.adjusted_close - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn rejects_non_positive_and_nan_closes() {
        assert!(PriceBar::new(day(2), 0.0).is_err());
        assert!(PriceBar::new(day(2), -1.5).is_err());
        assert!(PriceBar::new(day(2), f64::NAN).is_err());
        assert!(PriceBar::new(day(2), f64::INFINITY).is_err());
        assert!(PriceBar::new(day(2), 12.25).is_ok());
    }

    #[test]
    fn return_since_previous_bar() {
        let prev = PriceBar::new_unchecked(day(2), 10.0);
        let next = PriceBar::new_unchecked(day(3), 11.0);
        assert!((next.return_since(&prev) - 0.1).abs() < 1e-12);
    }
}
