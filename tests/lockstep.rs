use element_market::exchange::account::{PortfolioState, TradeOutcome};
use element_market::exchange::asset::{Asset, ASSET_COUNT};
use element_market::exchange::exchange_settings::ExchangeSettings;
use element_market::primitives::{Price, Quantity, Value, MAX_PRICE, MIN_PRICE};
use element_market::risk::risk_engine::RiskVerdict;
use element_market::runner::scenario_runner::Scenario;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::Duration;

const STEPS: usize = 20_000;

/// Interleaves single steps of all eleven processes in a seeded random order and
/// checks the portfolio and price invariants after every step.
#[test]
fn test_lockstep_interleavings_keep_invariants() {
    for seed in 0..16u64 {
        let scenario = Scenario::new(ExchangeSettings {
            seed,
            ..Default::default()
        });
        let mut processors = scenario.processors();
        let mut scheduler = StdRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(7));
        let mut last_peak = scenario.portfolio().snapshot().worth_peak;
        let mut frozen: Option<PortfolioState> = None;

        for _ in 0..STEPS {
            match scheduler.gen_range(0..2 * ASSET_COUNT + 1) {
                i if i < ASSET_COUNT => {
                    processors.volatility[i].step();
                }
                i if i < 2 * ASSET_COUNT => {
                    let outcome = processors.market[i - ASSET_COUNT].step();
                    if frozen.is_some() {
                        assert_eq!(outcome, TradeOutcome::Stopped);
                    } else {
                        assert_ne!(outcome, TradeOutcome::Stopped);
                    }
                }
                _ => {
                    let verdict = processors.risk.step();
                    if let RiskVerdict::Halt { worth, .. } = verdict {
                        let state = scenario.portfolio().snapshot();
                        assert_eq!(state.cash, worth);
                        if frozen.is_none() {
                            frozen = Some(state);
                            // parked trades return immediately from here on
                            scenario.portfolio().release_waiters();
                        }
                    }
                }
            }

            for price in scenario.market().snapshot().prices.iter() {
                assert!(price.get() >= MIN_PRICE && price.get() <= MAX_PRICE);
            }
            let state = scenario.portfolio().snapshot();
            assert!(state.cash.get() >= 0.0);
            match frozen {
                Some(frozen) => {
                    assert_eq!(state, frozen);
                    assert_eq!(state.holdings, [Quantity::ZERO; ASSET_COUNT]);
                }
                None => {
                    assert!(state.worth_peak >= last_peak);
                    last_peak = state.worth_peak;
                }
            }
        }
    }
}

/// Buys into expensive prices, crashes the market and expects the monitor to
/// freeze the portfolio at the crashed worth.
#[test]
fn test_lockstep_crash_halts_and_blocks_trading() {
    let scenario = Scenario::new(ExchangeSettings {
        initial_price: Price::new(40.0),
        multiplier_range: (0.5, 0.6),
        seed: 99,
        ..Default::default()
    });
    let mut processors = scenario.processors();

    // Two units at 40.0 leave 20.0 in cash, which cannot afford a third.
    let mut rounds = 0;
    while scenario.portfolio().snapshot().cash > Value(20.0) {
        for trader in processors.market.iter_mut() {
            trader.step();
        }
        rounds += 1;
        assert!(rounds < 10_000, "traders never bought in");
    }
    let bought = scenario.portfolio().snapshot();
    assert_eq!(bought.cash, Value(20.0));
    assert_eq!(
        bought.holdings.iter().map(Quantity::get).sum::<u64>(),
        2
    );

    for _ in 0..20 {
        for volatility in processors.volatility.iter_mut() {
            volatility.step();
        }
    }
    for asset in Asset::ALL {
        assert_eq!(scenario.market().price(asset).get(), MIN_PRICE);
    }

    let verdict = processors.risk.step();
    assert!(verdict.is_halt());
    let frozen = scenario.portfolio().snapshot();
    assert!((frozen.cash.get() - 20.02).abs() < 1e-9);
    assert_eq!(frozen.holdings, [Quantity::ZERO; ASSET_COUNT]);
    assert!(scenario.portfolio().is_halted());

    // A trade attempted after the halt parks instead of failing.
    let mut trader = processors.market.remove(0);
    let parked = thread::spawn(move || trader.step());
    thread::sleep(Duration::from_millis(100));
    assert!(!parked.is_finished());
    assert_eq!(scenario.portfolio().snapshot(), frozen);

    scenario.portfolio().release_waiters();
    assert_eq!(parked.join().unwrap(), TradeOutcome::Stopped);
    assert_eq!(scenario.portfolio().snapshot(), frozen);

    // The monitor keeps reporting the frozen worth.
    assert_eq!(processors.risk.step().worth(), frozen.cash);
}
