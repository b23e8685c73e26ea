use element_market::error::SimulationError;
use element_market::exchange::exchange_settings::ExchangeSettings;
use element_market::runner::scenario_runner::Scenario;

use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), SimulationError> {
    // Silent unless RUST_LOG asks for more; logs go to stderr.
    SimpleLogger::new()
        .with_level(LevelFilter::Off)
        .env()
        .init()?;

    let mut running = Scenario::new(ExchangeSettings::default()).start()?;
    let cash = running.wait_for_halt()?;
    println!("Final worth when abort occurred: {}", cash);
    Ok(())
}
