use crate::exchange::asset::Asset;
use crate::exchange::exchange_settings::ExchangeSettings;
use crate::exchange::market::Market;
use crate::primitives::Price;
use crate::processor::stop_signal::StopSignal;
use crate::processor::Pacing;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use std::sync::Arc;

/// Random walk of one asset price.
pub struct VolatilityProcessor {
    asset: Asset,
    market: Arc<Market>,
    rng: StdRng,
    pacing: Pacing,
    multiplier: Uniform<f64>,
}

impl VolatilityProcessor {
    pub fn new(asset: Asset, market: Arc<Market>, settings: &ExchangeSettings, seed: u64) -> Self {
        let (low, high) = settings.multiplier_range;
        Self {
            asset,
            market,
            rng: StdRng::seed_from_u64(seed),
            pacing: Pacing::new(settings.max_delay),
            multiplier: Uniform::new(low, high),
        }
    }

    pub fn asset(&self) -> Asset {
        self.asset
    }

    /// One price move, without the preceding sleep.
    pub fn step(&mut self) -> Price {
        let multiplier = self.multiplier.sample(&mut self.rng);
        self.market.fluctuate(self.asset, multiplier)
    }

    pub fn run(&mut self, stop: StopSignal) {
        debug!("Volatility on {} started", self.asset);
        while stop.sleep(self.pacing.next_delay(&mut self.rng)) {
            self.step();
        }
        debug!("Volatility on {} stopped", self.asset);
    }
}
