use crate::exchange::asset::*;
use crate::exchange::market::PriceSnapshot;
use crate::exchange::order_side::OrderSide;
use crate::primitives::*;
use crate::risk::risk_engine::{self, RiskEngine, RiskVerdict};

use log::{debug, info, warn};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

/// Holdings, cash and peak worth of the single trading account.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PortfolioState {
    /// How many units of each asset are held, indexed by `Asset::index`.
    pub holdings: [Quantity; ASSET_COUNT],
    /// How much cash the account holds
    pub cash: Value,
    /// Highest worth observed so far
    pub worth_peak: Value,
}

impl PortfolioState {
    pub fn new(cash: Value, worth_peak: Value) -> Self {
        Self {
            holdings: [Quantity::ZERO; ASSET_COUNT],
            cash,
            worth_peak,
        }
    }

    #[inline(always)]
    pub fn holding(&self, asset: Asset) -> Quantity {
        self.holdings[asset.index()]
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TradeOutcome {
    Bought,
    Sold,
    /// Not enough cash to buy, or nothing held to sell
    Skipped,
    /// Trading was halted and the waiter was released by a shutdown
    Stopped,
}

/// The shared portfolio.
///
/// Once the drawdown halt fires the `halted` flag is raised and never lowered.
/// Every trade attempted afterwards parks on `halt_released`, which is only ever
/// signalled by `release_waiters` during shutdown; a released trade returns
/// `Stopped` without touching the state.
pub struct Portfolio {
    state: Mutex<PortfolioState>,
    halted: AtomicBool,
    released: AtomicBool,
    halt_released: Condvar,
}

impl Portfolio {
    pub fn new(cash: Value, worth_peak: Value) -> Self {
        Self {
            state: Mutex::new(PortfolioState::new(cash, worth_peak)),
            halted: AtomicBool::new(false),
            released: AtomicBool::new(false),
            halt_released: Condvar::new(),
        }
    }

    /// Buys or sells one unit of `asset` at `price`.
    ///
    /// Blocks indefinitely if trading has been halted.
    pub fn trade(&self, asset: Asset, side: OrderSide, price: Price) -> TradeOutcome {
        let mut state = self.state.lock();
        while self.halted.load(Ordering::Acquire) {
            if self.released.load(Ordering::Acquire) {
                return TradeOutcome::Stopped;
            }
            debug!("Trading halted, {} {} parked", side, asset);
            self.halt_released.wait(&mut state);
        }

        match side {
            OrderSide::BID => {
                if state.cash > price {
                    state.holdings[asset.index()].increment();
                    state.cash -= price;
                    TradeOutcome::Bought
                } else {
                    TradeOutcome::Skipped
                }
            }
            OrderSide::ASK => {
                if state.holdings[asset.index()].decrement() {
                    state.cash += price;
                    TradeOutcome::Sold
                } else {
                    TradeOutcome::Skipped
                }
            }
        }
    }

    pub fn snapshot(&self) -> PortfolioState {
        *self.state.lock()
    }

    /// Values the portfolio at `prices` and applies the verdict in the same
    /// critical section: a new peak raises the watermark, a halt zeroes all
    /// holdings, freezes cash at the computed worth and raises the halted flag.
    pub fn evaluate(&self, prices: &PriceSnapshot, engine: &RiskEngine) -> RiskVerdict {
        let mut state = self.state.lock();
        if self.halted.load(Ordering::Acquire) {
            return RiskVerdict::Halt {
                worth: state.cash,
                peak: state.worth_peak,
            };
        }

        let worth = risk_engine::worth(prices, &state);
        let verdict = engine.assess(worth, state.worth_peak);
        match verdict {
            RiskVerdict::Halt { worth, peak } => {
                state.holdings = [Quantity::ZERO; ASSET_COUNT];
                state.cash = worth;
                self.halted.store(true, Ordering::Release);
                warn!(
                    "Drawdown halt: worth {} fell below {} of peak {}",
                    worth,
                    engine.abort_threshold(),
                    peak
                );
            }
            RiskVerdict::NewPeak { worth, .. } => {
                state.worth_peak = worth;
                info!("New peak worth {}", worth);
            }
            RiskVerdict::Hold { .. } => {}
        }
        verdict
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    /// Wakes every trade parked on the halt so its thread can exit.
    pub fn release_waiters(&self) {
        let _state = self.state.lock();
        self.released.store(true, Ordering::Release);
        self.halt_released.notify_all();
    }
}
