// src/pricing/mod.rs

pub mod binomial;
pub mod black_scholes;
pub mod config;
pub mod engine;
pub mod monte_carlo;

pub use binomial::{BinomialLattice, BinomialTreeModel};
pub use black_scholes::BlackScholesModel;
pub use engine::{PricingEngine, PricingQuote, PricingRequest};
pub use monte_carlo::{MonteCarloPricing, SimulationPaths};

use crate::errors::PricingResult;
use crate::shared_types::OptionType;

/// The contract every pricing engine implements.
/// Engines are peers; a caller picks one and asks for a call or a put.
pub trait OptionPricingModel {
    fn name(&self) -> &'static str;

    /// Fair value of a European call.
    fn call_price(&self) -> PricingResult<f64>;

    /// Fair value of a European put.
    fn put_price(&self) -> PricingResult<f64>;

    /// The single dispatch entry point.
    fn calculate_option_price(&self, option_type: OptionType) -> PricingResult<f64> {
        match option_type {
            OptionType::Call => self.call_price(),
            OptionType::Put => self.put_price(),
        }
    }

    /// Dispatch on a textual tag such as `"Call Option"`. Unknown tags return
    /// `InvalidOptionType`, never a number.
    fn calculate_option_price_for(&self, option_type: &str) -> PricingResult<f64> {
        self.calculate_option_price(option_type.parse()?)
    }
}

/// Rounds a price to cents for display.
pub fn round_to_cents(price: f64) -> f64 {
    let scale = 10f64.powi(config::PRICE_DECIMALS);
    (price * scale).round() / scale
}
