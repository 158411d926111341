use crate::data::bar::PriceBar;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Bars for {symbol} are not strictly increasing: {previous} followed by {next}")]
    UnorderedDates {
        symbol: String,
        previous: NaiveDate,
        next: NaiveDate,
    },
}

//ordered daily history for one symbol
//dates are strictly increasing and never change after construction
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    //creates a series, rejecting duplicate or out of order dates
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        let symbol = symbol.into();

        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::UnorderedDates {
                    symbol,
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }

        Ok(PriceSeries { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adjusted_close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    //close-to-close returns, undefined for the first bar
    pub fn daily_returns(&self) -> Vec<Option<f64>> {
        let mut returns = Vec::with_capacity(self.bars.len());
        for (i, bar) in self.bars.iter().enumerate() {
            if i == 0 {
                returns.push(None);
            } else {
                returns.push(Some(bar.return_since(&self.bars[i - 1])));
            }
        }
        returns
    }

    //buy and hold return from the first to the last bar
    pub fn total_return(&self) -> Option<f64> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) if self.bars.len() > 1 => Some(last.return_since(first)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new_unchecked(start + chrono::Days::new(i as u64), c))
            .collect()
    }

    #[test]
    fn rejects_duplicate_dates() {
        let mut b = bars(&[10.0, 11.0]);
        b[1].date = b[0].date;
        let err = PriceSeries::new("ALPA4.SA", b).unwrap_err();
        assert!(matches!(err, SeriesError::UnorderedDates { .. }));
    }

    #[test]
    fn rejects_descending_dates() {
        let mut b = bars(&[10.0, 11.0, 12.0]);
        b.reverse();
        assert!(PriceSeries::new("ALPA4.SA", b).is_err());
    }

    #[test]
    fn daily_returns_start_undefined() {
        let series = PriceSeries::new("X", bars(&[10.0, 11.0, 9.9])).unwrap();
        let returns = series.daily_returns();
        assert_eq!(returns.len(), 3);
        assert!(returns[0].is_none());
        assert!((returns[1].unwrap() - 0.1).abs() < 1e-12);
        assert!((returns[2].unwrap() + 0.1).abs() < 1e-12);
    }

    #[test]
    fn total_return_needs_two_bars() {
        let one = PriceSeries::new("X", bars(&[10.0])).unwrap();
        assert!(one.total_return().is_none());

        let many = PriceSeries::new("X", bars(&[10.0, 12.0, 13.0])).unwrap();
        assert!((many.total_return().unwrap() - 0.3).abs() < 1e-12);
    }
}
