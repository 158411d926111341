use crate::data::PriceSeries;
use crate::strategy::sma;
use serde::Serialize;

//trailing arithmetic mean including the current value
//the first window - 1 entries are undefined, as is everything when window > len
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut means = vec![None; values.len()];
    if window == 0 || window > values.len() {
        return means;
    }

    for end in window..=values.len() {
        means[end - 1] = sma(&values[end - window..end]);
    }

    means
}

//fast and slow means over adjusted close, indexed like the source series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovingAverages {
    pub fast_window: usize,
    pub slow_window: usize,
    pub fast: Vec<Option<f64>>,
    pub slow: Vec<Option<f64>>,
}

impl MovingAverages {
    pub fn compute(series: &PriceSeries, fast_window: usize, slow_window: usize) -> Self {
        let closes = series.closes();
        MovingAverages {
            fast_window,
            slow_window,
            fast: rolling_mean(&closes, fast_window),
            slow: rolling_mean(&closes, slow_window),
        }
    }

    pub fn len(&self) -> usize {
        self.fast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fast.is_empty()
    }

    //index of the first row where both means exist
    pub fn first_defined(&self) -> Option<usize> {
        self.fast
            .iter()
            .zip(&self.slow)
            .position(|(f, s)| f.is_some() && s.is_some())
    }

    //both means at one row
    pub fn at(&self, index: usize) -> Option<(f64, f64)> {
        match (self.fast.get(index), self.slow.get(index)) {
            (Some(Some(fast)), Some(Some(slow))) => Some((*fast, *slow)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSES: [f64; 10] = [10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0, 11.0, 12.0, 13.0];

    #[test]
    fn warm_up_rows_are_undefined() {
        let means = rolling_mean(&CLOSES, 4);
        assert!(means[..3].iter().all(Option::is_none));
        assert_eq!(means[3], Some(11.0));
        assert_eq!(means[9], Some(11.5));
    }

    #[test]
    fn defined_count_is_len_minus_window_plus_one() {
        for window in 1..=CLOSES.len() {
            let defined = rolling_mean(&CLOSES, window)
                .iter()
                .filter(|m| m.is_some())
                .count();
            assert_eq!(defined, CLOSES.len() - window + 1);
        }
    }

    #[test]
    fn window_longer_than_series_is_all_undefined() {
        let means = rolling_mean(&CLOSES, 11);
        assert_eq!(means.len(), CLOSES.len());
        assert!(means.iter().all(Option::is_none));
        assert!(rolling_mean(&[], 3).is_empty());
    }

    #[test]
    fn zero_window_is_all_undefined() {
        assert!(rolling_mean(&CLOSES, 0).iter().all(Option::is_none));
    }

    #[test]
    fn fast_mean_matches_hand_computation() {
        let fast = rolling_mean(&CLOSES, 2);
        assert_eq!(fast[0], None);
        assert!((fast[3].unwrap() - 11.5).abs() < 1e-12);
        assert!((fast[5].unwrap() - 9.5).abs() < 1e-12);
    }
}
