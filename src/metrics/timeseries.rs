use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//a point on a growth-of-one curve
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub growth: f64,
    pub drawdown: f64,
    pub returns: f64,
}

impl CurvePoint {
    pub fn new(date: NaiveDate, growth: f64, drawdown: f64, returns: f64) -> Self {
        CurvePoint {
            date,
            growth,
            drawdown,
            returns,
        }
    }
}

//builds the growth curve with drawdowns from cumulative returns
//the curve starts from a growth of 1.0 before the first date
pub fn calculate_curve(dates: &[NaiveDate], cumulative: &[f64]) -> Vec<CurvePoint> {
    let mut curve = Vec::with_capacity(dates.len());
    let mut peak = 1.0;
    let mut prev_growth = 1.0;

    for (&date, &cum) in dates.iter().zip(cumulative.iter()) {
        let growth = cum + 1.0;

        //update peak
        if growth > peak {
            peak = growth;
        }

        //calculate drawdown
        let drawdown = if peak > 0.0 {
            (peak - growth) / peak
        } else {
            0.0
        };

        let returns = (growth - prev_growth) / prev_growth;

        curve.push(CurvePoint::new(date, growth, drawdown, returns));
        prev_growth = growth;
    }

    curve
}

//calculates maximum drawdown from a curve
pub fn max_drawdown(curve: &[CurvePoint]) -> f64 {
    curve
        .iter()
        .map(|point| point.drawdown)
        .fold(0.0, f64::max)
}
