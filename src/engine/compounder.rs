use crate::strategy::Position;

//per-row return of holding the given position
pub fn strategy_returns(daily_returns: &[f64], positions: &[Position]) -> Vec<f64> {
    daily_returns
        .iter()
        .zip(positions)
        .map(|(r, p)| r * p.sign())
        .collect()
}

//running product of (1 + r) minus one, applied in row order
pub fn compound(returns: &[f64]) -> Vec<f64> {
    let mut growth = 1.0;
    returns
        .iter()
        .map(|r| {
            growth *= 1.0 + r;
            growth - 1.0
        })
        .collect()
}

//like compound, an undefined return leaves the growth unchanged
pub fn compound_optional(returns: &[Option<f64>]) -> Vec<f64> {
    let mut growth = 1.0;
    returns
        .iter()
        .map(|r| {
            if let Some(r) = r {
                growth *= 1.0 + r;
            }
            growth - 1.0
        })
        .collect()
}

//recovers per-row returns from a cumulative curve that started at zero
pub fn returns_from_cumulative(cumulative: &[f64]) -> Vec<f64> {
    let mut previous = 0.0;
    cumulative
        .iter()
        .map(|&c| {
            let r = (c + 1.0) / (previous + 1.0) - 1.0;
            previous = c;
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn compounding_is_multiplicative() {
        let cum = compound(&[0.1, -0.1]);
        assert!((cum[0] - 0.1).abs() < EPS);
        //1.1 * 0.9 - 1, not 0.0
        assert!((cum[1] + 0.01).abs() < EPS);
    }

    #[test]
    fn short_positions_flip_returns() {
        let r = strategy_returns(&[0.02, -0.05], &[Position::Short, Position::Long]);
        assert_eq!(r, vec![-0.02, -0.05]);
    }

    #[test]
    fn round_trip_recovers_period_returns() {
        let returns = [0.013, -0.027, 0.004, 0.051, -0.012, 0.0, 0.033];
        let recovered = returns_from_cumulative(&compound(&returns));
        for (a, b) in returns.iter().zip(&recovered) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn undefined_returns_do_not_grow() {
        let cum = compound_optional(&[None, Some(0.1), None, Some(0.1)]);
        assert_eq!(cum[0], 0.0);
        assert!((cum[1] - 0.1).abs() < EPS);
        assert!((cum[2] - 0.1).abs() < EPS);
        assert!((cum[3] - 0.21).abs() < EPS);
    }

    #[test]
    fn empty_input_yields_empty_curve() {
        assert!(compound(&[]).is_empty());
        assert!(compound_optional(&[]).is_empty());
    }
}
