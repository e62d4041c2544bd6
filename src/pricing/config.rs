// src/pricing/config.rs

//! A centralized place for tuning pricing defaults.

// --- Day counts ---
/// Calendar days per year; maturity in years is `days / DAYS_PER_YEAR`.
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Trading days per year, used to annualize daily return volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

// --- Binomial tree ---
pub const BINOMIAL_DEFAULT_STEPS: usize = 15_000;

// --- Monte Carlo ---
// Fixed so identical inputs always reproduce identical prices.
pub const MC_DEFAULT_SEED: u64 = 20;
pub const MC_DEFAULT_SIMULATIONS: usize = 10_000;
/// At most one in ten simulated paths is worth drawing.
pub const MC_DISPLAY_PATH_DIVISOR: usize = 10;

// --- Display ---
pub const PRICE_DECIMALS: i32 = 2;
