pub mod account;
pub mod asset;
pub mod exchange_settings;
pub mod market;
pub mod order_side;
