//! A small concurrent market: five randomly walking element prices, one naive
//! trader per element and a drawdown monitor that halts all trading for good
//! once the portfolio loses too much of its peak worth.

pub mod error;
pub mod exchange;
pub mod primitives;
pub mod processor;
pub mod risk;
pub mod runner;
