pub mod market_processor;
pub mod risk_engine_processor;
pub mod stop_signal;
pub mod volatility_processor;

use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};
use std::time::Duration;

/// Uniform sleep in [0, max_delay) drawn before every iteration of a process.
#[derive(Debug, Clone)]
pub struct Pacing {
    nanos: Uniform<u64>,
}

impl Pacing {
    pub fn new(max_delay: Duration) -> Self {
        let upper = (max_delay.as_nanos() as u64).max(1);
        Self {
            nanos: Uniform::new(0, upper),
        }
    }

    pub fn next_delay(&self, rng: &mut StdRng) -> Duration {
        Duration::from_nanos(self.nanos.sample(rng))
    }
}

#[test]
fn test_pacing_stays_below_max_delay() {
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(7);
    let pacing = Pacing::new(Duration::from_millis(500));
    for _ in 0..10_000 {
        assert!(pacing.next_delay(&mut rng) < Duration::from_millis(500));
    }
    let instant = Pacing::new(Duration::ZERO);
    assert_eq!(instant.next_delay(&mut rng), Duration::ZERO);
}
