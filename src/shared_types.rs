// src/shared_types.rs

use crate::errors::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents the type of the option.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(alias = "Call Option")]
    Call,
    #[serde(alias = "Put Option")]
    Put,
}

impl OptionType {
    /// The label the pricing screens use for this option type.
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "Call Option",
            OptionType::Put => "Put Option",
        }
    }

    /// Terminal payoff of a single European contract.
    #[inline]
    pub fn payoff(&self, terminal_price: f64, strike_price: f64) -> f64 {
        match self {
            OptionType::Call => (terminal_price - strike_price).max(0.0),
            OptionType::Put => (strike_price - terminal_price).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Only the exact screen labels are accepted.
impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Call Option" => Ok(OptionType::Call),
            "Put Option" => Ok(OptionType::Put),
            other => Err(PricingError::InvalidOptionType(other.to_string())),
        }
    }
}

/// The valuation method a caller can pick.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum PricingMethod {
    #[serde(alias = "Binomial Model")]
    Binomial,
    #[serde(alias = "Black Scholes Model")]
    BlackScholes,
    #[serde(alias = "Monte Carlo Simulation")]
    MonteCarlo,
}

impl PricingMethod {
    pub const ALL: [PricingMethod; 3] = [
        PricingMethod::Binomial,
        PricingMethod::BlackScholes,
        PricingMethod::MonteCarlo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PricingMethod::Binomial => "Binomial Model",
            PricingMethod::BlackScholes => "Black Scholes Model",
            PricingMethod::MonteCarlo => "Monte Carlo Simulation",
        }
    }
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PricingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricingMethod::ALL
            .into_iter()
            .find(|method| method.label() == s)
            .ok_or_else(|| PricingError::InvalidPricingMethod(s.to_string()))
    }
}
