use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::primitives::{Price, Value};

#[derive(PartialEq, Debug, Clone)]
pub struct ExchangeSettings {
    /// Price every asset opens at
    pub initial_price: Price,
    /// Cash the portfolio starts with
    pub initial_cash: Value,
    /// Starting peak worth watermark
    pub initial_peak: Value,
    /// Fraction of the peak below which trading halts for good
    pub abort_threshold: f64,

    /// Lower and upper bound of the multiplicative price move, upper bound exclusive
    pub multiplier_range: (f64, f64),

    //Technical parameters
    pub max_delay: Duration, //Every process sleeps for a uniform delay in [0, max_delay)
    pub seed: u64,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            initial_price: Price::ONE,
            initial_cash: Value(100.0),
            initial_peak: Value(100.0),
            abort_threshold: 0.5,
            multiplier_range: (0.5, 1.5),
            max_delay: Duration::from_millis(500),
            seed: time_seed(),
        }
    }
}

/// Seed derived from the wall clock, used when no fixed seed is requested.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
