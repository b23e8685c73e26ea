use crate::exchange::account::Portfolio;
use crate::exchange::exchange_settings::ExchangeSettings;
use crate::exchange::market::Market;
use crate::primitives::Value;
use crate::processor::stop_signal::StopSignal;
use crate::processor::Pacing;
use crate::risk::risk_engine::{RiskEngine, RiskVerdict};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Drawdown monitor.
///
/// Periodically values the portfolio against a consistent price snapshot and
/// halts trading for good once worth drops below the abort threshold of the peak.
pub struct RiskEngineProcessor {
    risk_engine: RiskEngine,
    market: Arc<Market>,
    portfolio: Arc<Portfolio>,
    rng: StdRng,
    pacing: Pacing,
}

impl RiskEngineProcessor {
    pub fn new(
        market: Arc<Market>,
        portfolio: Arc<Portfolio>,
        settings: &ExchangeSettings,
        seed: u64,
    ) -> Self {
        Self {
            risk_engine: RiskEngine::new(settings.abort_threshold),
            market,
            portfolio,
            rng: StdRng::seed_from_u64(seed),
            pacing: Pacing::new(settings.max_delay),
        }
    }

    /// One observation, without the preceding sleep.
    pub fn step(&mut self) -> RiskVerdict {
        let prices = self.market.snapshot();
        let verdict = self.portfolio.evaluate(&prices, &self.risk_engine);
        debug!("Monitor observed {:?}", verdict);
        verdict
    }

    /// Runs until the halt fires and returns the frozen cash, or `None` when
    /// stopped first.
    pub fn run(&mut self, stop: StopSignal) -> Option<Value> {
        debug!("Monitor started");
        while stop.sleep(self.pacing.next_delay(&mut self.rng)) {
            if let RiskVerdict::Halt { worth, .. } = self.step() {
                info!("Trading halted with final worth {}", worth);
                return Some(worth);
            }
        }
        debug!("Monitor stopped before any halt");
        None
    }
}
