use crate::exchange::asset::*;
use crate::primitives::*;

use log::trace;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// One asset price, stored as the bit pattern of an f64 so it can be written
/// through a shared guard without ever exposing a torn value.
struct PriceCell(AtomicU64);

impl PriceCell {
    fn new(price: Price) -> Self {
        Self(AtomicU64::new(price.get().to_bits()))
    }

    #[inline(always)]
    fn load(&self) -> Price {
        Price::new(f64::from_bits(self.0.load(Ordering::Acquire)))
    }

    #[inline(always)]
    fn store(&self, price: Price) {
        self.0.store(price.get().to_bits(), Ordering::Release)
    }
}

/// A consistent copy of all five prices taken at a single instant.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PriceSnapshot {
    pub prices: [Price; ASSET_COUNT],
}

impl PriceSnapshot {
    #[inline(always)]
    pub fn price(&self, asset: Asset) -> Price {
        self.prices[asset.index()]
    }
}

/// The price set of the market.
///
/// Fluctuations write their own field while holding the lock in shared mode, so
/// fluctuations of different assets never wait on each other. The full snapshot
/// takes the lock exclusively and therefore never interleaves with a write.
pub struct Market {
    prices: RwLock<[PriceCell; ASSET_COUNT]>,
}

impl Market {
    pub fn new(initial_price: Price) -> Self {
        Self {
            prices: RwLock::new(std::array::from_fn(|_| PriceCell::new(initial_price))),
        }
    }

    /// Moves the price of `asset` by `multiplier` and returns the clamped result.
    pub fn fluctuate(&self, asset: Asset, multiplier: f64) -> Price {
        let prices = self.prices.read();
        let cell = &prices[asset.index()];
        // single writer per field
        let moved = cell.load().scale(multiplier);
        cell.store(moved);
        trace!("{} moved by {:.4} to {}", asset, multiplier, moved);
        moved
    }

    /// Current price of a single asset.
    pub fn price(&self, asset: Asset) -> Price {
        self.prices.read()[asset.index()].load()
    }

    pub fn snapshot(&self) -> PriceSnapshot {
        let prices = self.prices.write();
        PriceSnapshot {
            prices: std::array::from_fn(|i| prices[i].load()),
        }
    }
}
