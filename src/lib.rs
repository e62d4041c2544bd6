// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod errors;
pub mod market;
pub mod pricing;
pub mod shared_types;

// === 2. Re-export the public-facing components to create a clean API ===

// --- From `errors` ---
pub use errors::{PricingError, PricingResult};

// --- From `market` ---
pub use market::{MarketInputs, MarketParameters, annualized_volatility, last_price};

// --- From `pricing` ---
pub use pricing::{
    BinomialLattice, BinomialTreeModel, BlackScholesModel, MonteCarloPricing, OptionPricingModel,
    PricingEngine, PricingQuote, PricingRequest, SimulationPaths, round_to_cents,
};

// --- From `shared_types` ---
pub use shared_types::{OptionType, PricingMethod};
