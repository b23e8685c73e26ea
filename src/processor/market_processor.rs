use crate::exchange::account::{Portfolio, TradeOutcome};
use crate::exchange::asset::Asset;
use crate::exchange::exchange_settings::ExchangeSettings;
use crate::exchange::market::Market;
use crate::exchange::order_side::OrderSide;
use crate::processor::stop_signal::StopSignal;
use crate::processor::Pacing;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Naive trader of one asset: flips a coin, then buys or sells a single unit.
pub struct MarketProcessor {
    asset: Asset,
    market: Arc<Market>,
    portfolio: Arc<Portfolio>,
    rng: StdRng,
    pacing: Pacing,
}

impl MarketProcessor {
    pub fn new(
        asset: Asset,
        market: Arc<Market>,
        portfolio: Arc<Portfolio>,
        settings: &ExchangeSettings,
        seed: u64,
    ) -> Self {
        Self {
            asset,
            market,
            portfolio,
            rng: StdRng::seed_from_u64(seed),
            pacing: Pacing::new(settings.max_delay),
        }
    }

    pub fn asset(&self) -> Asset {
        self.asset
    }

    /// One trade decision, without the preceding sleep.
    ///
    /// Blocks for as long as trading stays halted.
    pub fn step(&mut self) -> TradeOutcome {
        let side = OrderSide::from_buy(self.rng.gen_bool(0.5));
        let price = self.market.price(self.asset);
        let outcome = self.portfolio.trade(self.asset, side, price);
        trace!("{} {} at {}: {:?}", side, self.asset, price, outcome);
        outcome
    }

    pub fn run(&mut self, stop: StopSignal) {
        debug!("Trading on {} started", self.asset);
        while stop.sleep(self.pacing.next_delay(&mut self.rng)) {
            if self.step() == TradeOutcome::Stopped {
                break;
            }
        }
        debug!("Trading on {} stopped", self.asset);
    }
}
