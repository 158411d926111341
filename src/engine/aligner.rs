use crate::data::PriceSeries;
use crate::engine::compounder::compound_optional;
use crate::error::AlignmentError;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

//how benchmark returns are matched to primary rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    //join on calendar date, a primary date missing from the benchmark is an error
    #[default]
    ByDate,
    //i-th benchmark return goes to the i-th primary row
    Positional,
}

//benchmark columns appended to the derived table
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkColumns {
    pub returns: Vec<Option<f64>>,
    pub cumulative: Vec<f64>,
}

//aligns the benchmark's daily returns onto the primary dates
pub fn align_benchmark(
    mode: AlignmentMode,
    primary_dates: &[NaiveDate],
    benchmark: &PriceSeries,
) -> Result<BenchmarkColumns, AlignmentError> {
    let returns = match mode {
        AlignmentMode::ByDate => by_date(primary_dates, benchmark)?,
        AlignmentMode::Positional => positional(primary_dates.len(), benchmark)?,
    };

    debug!(
        benchmark = benchmark.symbol(),
        ?mode,
        rows = returns.len(),
        "aligned benchmark returns"
    );

    let cumulative = compound_optional(&returns);
    Ok(BenchmarkColumns {
        returns,
        cumulative,
    })
}

fn by_date(
    primary_dates: &[NaiveDate],
    benchmark: &PriceSeries,
) -> Result<Vec<Option<f64>>, AlignmentError> {
    //returns are taken on the benchmark's own calendar before the join
    let index: IndexMap<NaiveDate, Option<f64>> = benchmark
        .dates()
        .into_iter()
        .zip(benchmark.daily_returns())
        .collect();

    primary_dates
        .iter()
        .map(|date| {
            index
                .get(date)
                .copied()
                .ok_or(AlignmentError::MissingBenchmarkDate { date: *date })
        })
        .collect()
}

fn positional(
    primary_len: usize,
    benchmark: &PriceSeries,
) -> Result<Vec<Option<f64>>, AlignmentError> {
    let mut returns = benchmark.daily_returns();
    if returns.len() < primary_len {
        return Err(AlignmentError::BenchmarkTooShort {
            benchmark: returns.len(),
            primary: primary_len,
        });
    }
    returns.truncate(primary_len);
    Ok(returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceBar;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn series(days: &[u32], closes: &[f64]) -> PriceSeries {
        let bars = days
            .iter()
            .zip(closes)
            .map(|(&d, &c)| PriceBar::new_unchecked(date(d), c))
            .collect();
        PriceSeries::new("^BVSP", bars).unwrap()
    }

    #[test]
    fn by_date_uses_benchmark_calendar() {
        //benchmark trades on the 3rd, the primary does not
        let benchmark = series(&[2, 3, 6, 7], &[100.0, 110.0, 121.0, 108.9]);
        let primary = [date(2), date(6), date(7)];

        let columns = align_benchmark(AlignmentMode::ByDate, &primary, &benchmark).unwrap();

        assert_eq!(columns.returns[0], None);
        assert!((columns.returns[1].unwrap() - 0.1).abs() < 1e-12);
        assert!((columns.returns[2].unwrap() + 0.1).abs() < 1e-12);
        assert_eq!(columns.cumulative[0], 0.0);
        assert!((columns.cumulative[2] - (1.1 * 0.9 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn by_date_reports_missing_date() {
        let benchmark = series(&[2, 3, 7], &[100.0, 101.0, 102.0]);
        let primary = [date(2), date(3), date(6), date(7)];

        let err = align_benchmark(AlignmentMode::ByDate, &primary, &benchmark).unwrap_err();
        assert_eq!(err, AlignmentError::MissingBenchmarkDate { date: date(6) });
    }

    #[test]
    fn positional_ignores_dates_and_truncates() {
        let benchmark = series(&[2, 3, 6, 7, 8], &[100.0, 110.0, 99.0, 99.0, 200.0]);
        let primary = [date(13), date(14), date(15)];

        let columns = align_benchmark(AlignmentMode::Positional, &primary, &benchmark).unwrap();

        assert_eq!(columns.returns.len(), 3);
        assert_eq!(columns.returns[0], None);
        assert!((columns.returns[2].unwrap() + 0.1).abs() < 1e-12);
    }

    #[test]
    fn positional_short_benchmark_fails() {
        let benchmark = series(&[2, 3], &[100.0, 101.0]);
        let primary = [date(2), date(3), date(6), date(7)];

        let err = align_benchmark(AlignmentMode::Positional, &primary, &benchmark).unwrap_err();
        assert_eq!(
            err,
            AlignmentError::BenchmarkTooShort {
                benchmark: 2,
                primary: 4
            }
        );
    }
}
