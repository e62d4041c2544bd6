// src/market/mod.rs
// -----------------
pub mod parameters;
pub mod volatility;

pub use parameters::{MarketInputs, MarketParameters};
pub use volatility::{annualized_volatility, last_price};
