use crate::engine::compounder::returns_from_cumulative;
use crate::metrics::timeseries::{calculate_curve, max_drawdown};
use chrono::NaiveDate;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

const TRADING_DAYS: f64 = 252.0;

//summary metrics for one cumulative return curve
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryMetrics {
    pub label: String,
    pub periods: usize,
    pub total_return: f64,
    pub cagr: f64,
    pub max_drawdown: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    //share of rows held long, only meaningful for the strategy
    pub exposure: Option<f64>,
}

impl SummaryMetrics {
    //calculate summary metrics from a cumulative return curve
    pub fn from_curve(label: impl Into<String>, dates: &[NaiveDate], cumulative: &[f64]) -> Self {
        let total_return = cumulative.last().copied().unwrap_or(0.0);

        //calculate cagr
        let cagr = match (dates.first(), dates.last()) {
            (Some(&start), Some(&end)) if dates.len() >= 2 => {
                let years = (end - start).num_days() as f64 / 365.25;
                if years > 0.0 {
                    (1.0 + total_return).powf(1.0 / years) - 1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        };

        let curve = calculate_curve(dates, cumulative);
        let returns = returns_from_cumulative(cumulative);

        SummaryMetrics {
            label: label.into(),
            periods: cumulative.len(),
            total_return,
            cagr,
            max_drawdown: max_drawdown(&curve),
            volatility: annualized_volatility(&returns),
            sharpe_ratio: calculate_sharpe_ratio(&returns),
            exposure: None,
        }
    }

    pub fn with_exposure(mut self, exposure: f64) -> Self {
        self.exposure = Some(exposure);
        self
    }
}

fn annualized_volatility(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    returns.std_dev() * TRADING_DAYS.sqrt()
}

fn calculate_sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    if std_dev == 0.0 {
        return 0.0;
    }

    //annualize assuming daily returns and a zero risk-free rate
    (mean / std_dev) * TRADING_DAYS.sqrt()
}

//prints curves side by side in a formatted table
pub fn pretty_print_comparison(metrics: &[SummaryMetrics]) {
    let mut table = Table::new();

    let mut header = vec![Cell::new("Metric")];
    header.extend(metrics.iter().map(|m| Cell::new(&m.label)));
    table.add_row(Row::new(header));

    add_metric_row(&mut table, "Total Return", metrics, |m| {
        format!("{:.2}%", m.total_return * 100.0)
    });
    add_metric_row(&mut table, "CAGR", metrics, |m| format!("{:.2}%", m.cagr * 100.0));
    add_metric_row(&mut table, "Max Drawdown", metrics, |m| {
        format!("{:.2}%", m.max_drawdown * 100.0)
    });
    add_metric_row(&mut table, "Volatility", metrics, |m| {
        format!("{:.2}%", m.volatility * 100.0)
    });
    add_metric_row(&mut table, "Sharpe Ratio", metrics, |m| {
        format!("{:.3}", m.sharpe_ratio)
    });
    add_metric_row(&mut table, "Time Long", metrics, |m| {
        m.exposure
            .map(|e| format!("{:.2}%", e * 100.0))
            .unwrap_or_else(|| "-".to_string())
    });

    table.printstd();
}

fn add_metric_row<F>(table: &mut Table, name: &str, metrics: &[SummaryMetrics], render: F)
where
    F: Fn(&SummaryMetrics) -> String,
{
    let mut row = vec![Cell::new(name)];
    row.extend(metrics.iter().map(|m| Cell::new(&render(m))));
    table.add_row(Row::new(row));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (0..n)
            .map(|i| start + chrono::Days::new(i as u64))
            .collect()
    }

    #[test]
    fn flat_curve_has_no_risk() {
        let summary = SummaryMetrics::from_curve("Flat", &dates(5), &[0.0; 5]);
        assert_eq!(summary.total_return, 0.0);
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.sharpe_ratio, 0.0);
        assert_eq!(summary.volatility, 0.0);
        assert_eq!(summary.exposure, None);
    }

    #[test]
    fn one_year_doubling_has_full_cagr() {
        let d = vec![
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        ];
        let summary = SummaryMetrics::from_curve("Doubling", &d, &[0.5, 1.0]);
        assert!((summary.total_return - 1.0).abs() < 1e-12);
        //365 days is just under 365.25, so cagr is slightly above 100%
        assert!(summary.cagr > 1.0 && summary.cagr < 1.01);
    }

    #[test]
    fn rising_curve_has_positive_sharpe() {
        let summary =
            SummaryMetrics::from_curve("Up", &dates(4), &[0.01, 0.03, 0.04, 0.07]).with_exposure(0.5);
        assert!(summary.sharpe_ratio > 0.0);
        assert_eq!(summary.exposure, Some(0.5));
        assert_eq!(summary.periods, 4);
    }

    #[test]
    fn empty_curve_is_all_zero() {
        let summary = SummaryMetrics::from_curve("Empty", &[], &[]);
        assert_eq!(summary.total_return, 0.0);
        assert_eq!(summary.cagr, 0.0);
        assert_eq!(summary.periods, 0);
    }
}
