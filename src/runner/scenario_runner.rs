use crate::error::SimulationError;
use crate::exchange::account::Portfolio;
use crate::exchange::asset::Asset;
use crate::exchange::exchange_settings::ExchangeSettings;
use crate::exchange::market::Market;
use crate::primitives::Value;
use crate::processor::market_processor::MarketProcessor;
use crate::processor::risk_engine_processor::RiskEngineProcessor;
use crate::processor::stop_signal::{stop_pair, StopHandle};
use crate::processor::volatility_processor::VolatilityProcessor;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Every process of one scenario, built but not yet running.
pub struct Processors {
    pub volatility: Vec<VolatilityProcessor>,
    pub market: Vec<MarketProcessor>,
    pub risk: RiskEngineProcessor,
}

/// Shared market state plus the settings the processes are built from.
pub struct Scenario {
    settings: ExchangeSettings,
    market: Arc<Market>,
    portfolio: Arc<Portfolio>,
}

impl Scenario {
    pub fn new(settings: ExchangeSettings) -> Self {
        let market = Arc::new(Market::new(settings.initial_price));
        let portfolio = Arc::new(Portfolio::new(settings.initial_cash, settings.initial_peak));
        Self {
            settings,
            market,
            portfolio,
        }
    }

    pub fn market(&self) -> &Arc<Market> {
        &self.market
    }

    pub fn portfolio(&self) -> &Arc<Portfolio> {
        &self.portfolio
    }

    /// Builds all eleven processes. Each one gets its own generator, seeded
    /// from a master generator so a fixed seed reproduces the whole scenario.
    pub fn processors(&self) -> Processors {
        let mut seeds = StdRng::seed_from_u64(self.settings.seed);
        let volatility = Asset::ALL
            .iter()
            .map(|&asset| {
                VolatilityProcessor::new(
                    asset,
                    Arc::clone(&self.market),
                    &self.settings,
                    seeds.gen(),
                )
            })
            .collect();
        let market = Asset::ALL
            .iter()
            .map(|&asset| {
                MarketProcessor::new(
                    asset,
                    Arc::clone(&self.market),
                    Arc::clone(&self.portfolio),
                    &self.settings,
                    seeds.gen(),
                )
            })
            .collect();
        let risk = RiskEngineProcessor::new(
            Arc::clone(&self.market),
            Arc::clone(&self.portfolio),
            &self.settings,
            seeds.gen(),
        );
        Processors {
            volatility,
            market,
            risk,
        }
    }

    /// Spawns one thread per process.
    pub fn start(self) -> Result<RunningScenario, SimulationError> {
        info!("Starting scenario with seed {}", self.settings.seed);
        let Processors {
            volatility,
            market,
            mut risk,
        } = self.processors();
        let (stop, signal) = stop_pair();

        let monitor = {
            let signal = signal.clone();
            spawn("monitor".to_string(), move || risk.run(signal))?
        };
        // From here on a failed spawn must still release whatever is already running.
        let mut running = RunningScenario {
            market: self.market,
            portfolio: self.portfolio,
            stop,
            monitor: Some(monitor),
            workers: Vec::with_capacity(volatility.len() + market.len()),
        };

        for mut processor in volatility {
            let signal = signal.clone();
            let name = format!("volatility-{}", processor.asset());
            running.push_worker(spawn(name, move || processor.run(signal)))?;
        }
        for mut processor in market {
            let signal = signal.clone();
            let name = format!("trading-{}", processor.asset());
            running.push_worker(spawn(name, move || processor.run(signal)))?;
        }
        Ok(running)
    }
}

fn spawn<T, F>(name: String, work: F) -> Result<JoinHandle<T>, SimulationError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new()
        .name(name.clone())
        .spawn(work)
        .map_err(|source| SimulationError::Spawn { name, source })
}

/// Handles of a started scenario.
pub struct RunningScenario {
    market: Arc<Market>,
    portfolio: Arc<Portfolio>,
    stop: StopHandle,
    monitor: Option<JoinHandle<Option<Value>>>,
    workers: Vec<JoinHandle<()>>,
}

impl RunningScenario {
    pub fn market(&self) -> &Arc<Market> {
        &self.market
    }

    pub fn portfolio(&self) -> &Arc<Portfolio> {
        &self.portfolio
    }

    fn push_worker(
        &mut self,
        worker: Result<JoinHandle<()>, SimulationError>,
    ) -> Result<(), SimulationError> {
        match worker {
            Ok(handle) => {
                self.workers.push(handle);
                Ok(())
            }
            Err(err) => {
                self.stop.stop();
                self.portfolio.release_waiters();
                Err(err)
            }
        }
    }

    /// Blocks until the monitor halts trading and returns the frozen cash.
    ///
    /// Volatility and trading threads are left as they are.
    pub fn wait_for_halt(&mut self) -> Result<Value, SimulationError> {
        let monitor = self
            .monitor
            .take()
            .ok_or(SimulationError::MonitorAlreadyJoined)?;
        match monitor.join() {
            Ok(Some(cash)) => Ok(cash),
            Ok(None) => Err(SimulationError::StoppedBeforeHalt),
            Err(_) => Err(SimulationError::WorkerPanicked("monitor".to_string())),
        }
    }

    /// Stops every process, releases trades parked on a halt and joins all threads.
    pub fn shutdown(mut self) -> Result<(), SimulationError> {
        debug!("Shutting down scenario");
        self.stop.stop();
        self.portfolio.release_waiters();

        let mut result = Ok(());
        if let Some(monitor) = self.monitor.take() {
            if monitor.join().is_err() {
                result = Err(SimulationError::WorkerPanicked("monitor".to_string()));
            }
        }
        for worker in self.workers.drain(..) {
            let name = worker.thread().name().unwrap_or("worker").to_string();
            if worker.join().is_err() {
                result = Err(SimulationError::WorkerPanicked(name));
            }
        }
        result
    }
}
