use crate::strategy::moving_average::MovingAverages;
use serde::{Deserialize, Serialize};
use std::fmt;

//directional exposure, there is no flat state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Long,
    Short,
}

impl Position {
    //converts to a return multiplier (Long = +1, Short = -1)
    pub fn sign(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Long => write!(f, "1"),
            Position::Short => write!(f, "-1"),
        }
    }
}

//long when the fast mean is strictly above the slow mean, short otherwise
pub fn raw_position(fast_ma: f64, slow_ma: f64) -> Position {
    if fast_ma > slow_ma {
        Position::Long
    } else {
        Position::Short
    }
}

//moves every value one row later so a signal is only acted on the next day
pub fn shift_forward<T: Copy>(values: &[Option<T>]) -> Vec<Option<T>> {
    let mut shifted = Vec::with_capacity(values.len());
    if values.is_empty() {
        return shifted;
    }
    shifted.push(None);
    shifted.extend_from_slice(&values[..values.len() - 1]);
    shifted
}

//dual moving average crossover rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverSignal {
    fast_window: usize,
    slow_window: usize,
}

impl CrossoverSignal {
    pub fn new(fast_window: usize, slow_window: usize) -> Self {
        CrossoverSignal {
            fast_window,
            slow_window,
        }
    }

    pub fn fast_window(&self) -> usize {
        self.fast_window
    }

    pub fn slow_window(&self) -> usize {
        self.slow_window
    }

    //same-day signal for every row where both means exist
    pub fn raw_positions(&self, averages: &MovingAverages) -> Vec<Option<Position>> {
        (0..averages.len())
            .map(|i| averages.at(i).map(|(fast, slow)| raw_position(fast, slow)))
            .collect()
    }

    //positions actually held, lagged by one row
    pub fn positions(&self, averages: &MovingAverages) -> Vec<Option<Position>> {
        shift_forward(&self.raw_positions(averages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PriceBar, PriceSeries};
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar::new_unchecked(start + chrono::Days::new(i as u64), c))
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn ties_resolve_short() {
        assert_eq!(raw_position(10.0, 10.0), Position::Short);
        assert_eq!(raw_position(10.1, 10.0), Position::Long);
        assert_eq!(raw_position(9.9, 10.0), Position::Short);
    }

    #[test]
    fn shift_moves_one_row_later() {
        let shifted = shift_forward(&[Some(1), None, Some(3)]);
        assert_eq!(shifted, vec![None, Some(1), None]);
        assert!(shift_forward::<i32>(&[]).is_empty());
    }

    #[test]
    fn positions_lag_the_raw_signal() {
        let s = series(&[10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0, 11.0, 12.0, 13.0]);
        let averages = MovingAverages::compute(&s, 2, 4);
        let signal = CrossoverSignal::new(2, 4);

        let raw = signal.raw_positions(&averages);
        let held = signal.positions(&averages);

        assert!(raw[..3].iter().all(Option::is_none));
        assert!(held[..4].iter().all(Option::is_none));
        for t in 4..raw.len() {
            assert_eq!(held[t], raw[t - 1]);
            assert!(held[t].is_some());
        }

        //fast 11.5 vs slow 11.0 on row 3
        assert_eq!(raw[3], Some(Position::Long));
        //fast 9.5 vs slow 10.5 on row 5
        assert_eq!(raw[5], Some(Position::Short));
    }

    #[test]
    fn equal_windows_are_always_short() {
        let s = series(&[10.0, 12.0, 15.0, 19.0, 24.0, 30.0, 37.0]);
        let averages = MovingAverages::compute(&s, 3, 3);
        let raw = CrossoverSignal::new(3, 3).raw_positions(&averages);
        assert!(raw.iter().flatten().all(|p| *p == Position::Short));
        assert_eq!(raw.iter().flatten().count(), 5);
    }

    #[test]
    fn sign_and_display() {
        assert_eq!(Position::Long.sign(), 1.0);
        assert_eq!(Position::Short.sign(), -1.0);
        assert_eq!(Position::Short.to_string(), "-1");
    }
}
