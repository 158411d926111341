pub mod crossover;
pub mod moving_average;

pub use crossover::{raw_position, shift_forward, CrossoverSignal, Position};
pub use moving_average::{rolling_mean, MovingAverages};

//helper function to calculate simple moving average
pub fn sma(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }
    Some(prices.iter().sum::<f64>() / prices.len() as f64)
}
