use crate::exchange::account::PortfolioState;
use crate::exchange::asset::Asset;
use crate::exchange::market::PriceSnapshot;
use crate::primitives::*;

/// Outcome of a single drawdown check.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RiskVerdict {
    /// Worth fell below the abort threshold; trading must stop for good
    Halt { worth: Value, peak: Value },
    /// Worth set a new high watermark
    NewPeak { worth: Value, previous_peak: Value },
    /// Nothing to do
    Hold { worth: Value, peak: Value },
}

impl RiskVerdict {
    pub fn worth(&self) -> Value {
        match *self {
            RiskVerdict::Halt { worth, .. } => worth,
            RiskVerdict::NewPeak { worth, .. } => worth,
            RiskVerdict::Hold { worth, .. } => worth,
        }
    }

    pub fn is_halt(&self) -> bool {
        matches!(self, RiskVerdict::Halt { .. })
    }
}

/// Total worth of the holdings at the snapshot prices, plus cash.
pub fn worth(prices: &PriceSnapshot, portfolio: &PortfolioState) -> Value {
    Asset::ALL
        .iter()
        .map(|&asset| prices.price(asset) * portfolio.holding(asset))
        .sum::<Value>()
        + portfolio.cash
}

#[derive(Debug, Clone, Copy)]
pub struct RiskEngine {
    abort_threshold: f64,
}

impl RiskEngine {
    pub fn new(abort_threshold: f64) -> Self {
        Self { abort_threshold }
    }

    pub fn abort_threshold(&self) -> f64 {
        self.abort_threshold
    }

    /// Compares `worth` against the watermark. The halt check wins over a new peak,
    /// although both can never hold at once for a threshold below one.
    pub fn assess(&self, worth: Value, peak: Value) -> RiskVerdict {
        if worth < peak * self.abort_threshold {
            RiskVerdict::Halt { worth, peak }
        } else if worth > peak {
            RiskVerdict::NewPeak {
                worth,
                previous_peak: peak,
            }
        } else {
            RiskVerdict::Hold { worth, peak }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(values: [f64; 5]) -> PriceSnapshot {
        PriceSnapshot {
            prices: [
                Price::new(values[0]),
                Price::new(values[1]),
                Price::new(values[2]),
                Price::new(values[3]),
                Price::new(values[4]),
            ],
        }
    }

    #[test]
    fn test_worth_sums_holdings_and_cash() {
        let mut state = PortfolioState::new(Value(10.0), Value(100.0));
        state.holdings[Asset::Hydrogen.index()] = Quantity(2);
        state.holdings[Asset::Boron.index()] = Quantity(4);
        let snapshot = prices([1.5, 7.0, 7.0, 7.0, 0.25]);
        assert_eq!(worth(&snapshot, &state), Value(14.0));
    }

    #[test]
    fn test_worth_of_fresh_portfolio_is_cash() {
        let state = PortfolioState::new(Value(100.0), Value(100.0));
        assert_eq!(worth(&prices([1.0; 5]), &state), Value(100.0));
    }

    #[test]
    fn test_assess_halts_below_threshold() {
        let engine = RiskEngine::new(0.5);
        assert_eq!(
            engine.assess(Value(49.99), Value(100.0)),
            RiskVerdict::Halt {
                worth: Value(49.99),
                peak: Value(100.0)
            }
        );
    }

    #[test]
    fn test_assess_exact_threshold_does_not_halt() {
        let engine = RiskEngine::new(0.5);
        assert!(!engine.assess(Value(50.0), Value(100.0)).is_halt());
    }

    #[test]
    fn test_assess_raises_peak() {
        let engine = RiskEngine::new(0.5);
        assert_eq!(
            engine.assess(Value(120.0), Value(100.0)),
            RiskVerdict::NewPeak {
                worth: Value(120.0),
                previous_peak: Value(100.0)
            }
        );
        assert_eq!(
            engine.assess(Value(100.0), Value(100.0)),
            RiskVerdict::Hold {
                worth: Value(100.0),
                peak: Value(100.0)
            }
        );
    }

    #[test]
    fn test_halt_is_relative_to_raised_peak() {
        let engine = RiskEngine::new(0.5);
        assert!(!engine.assess(Value(70.0), Value(100.0)).is_halt());
        assert!(engine.assess(Value(70.0), Value(150.0)).is_halt());
    }
}
