// src/pricing/black_scholes.rs

use super::OptionPricingModel;
use crate::errors::PricingResult;
use crate::market::MarketParameters;
use crate::shared_types::OptionType;
use statrs::distribution::{ContinuousCDF, Normal as StatNormal};

/// Closed-form Black-Scholes price of a European option.
#[derive(Debug, Clone)]
pub struct BlackScholesModel {
    params: MarketParameters,
    normal: StatNormal,
}

impl BlackScholesModel {
    pub fn new(params: MarketParameters) -> Self {
        Self {
            params,
            normal: StatNormal::standard(),
        }
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    /// The two decision boundaries `(d1, d2)`.
    pub fn d1_d2(&self) -> (f64, f64) {
        let p = &self.params;
        let time_remaining = p.time_to_maturity();
        let vol_sqrt_t = p.volatility() * time_remaining.sqrt();
        let d1 = ((p.spot() / p.strike()).ln()
            + (p.risk_free_rate() + 0.5 * p.volatility().powi(2)) * time_remaining)
            / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;
        (d1, d2)
    }

    fn price(&self, option_type: OptionType) -> f64 {
        let p = &self.params;
        let discounted_strike = p.strike() * p.discount_factor();

        // No diffusion: the terminal price is the forward, so the option is
        // worth its discounted intrinsic value against it.
        if p.volatility() * p.time_to_maturity().sqrt() < 1e-12 {
            return option_type.payoff(p.spot(), discounted_strike);
        }

        let (d1, d2) = self.d1_d2();
        match option_type {
            OptionType::Call => {
                p.spot() * self.normal.cdf(d1) - discounted_strike * self.normal.cdf(d2)
            }
            OptionType::Put => {
                discounted_strike * self.normal.cdf(-d2) - p.spot() * self.normal.cdf(-d1)
            }
        }
    }
}

impl OptionPricingModel for BlackScholesModel {
    fn name(&self) -> &'static str {
        "Black Scholes Model"
    }

    fn call_price(&self) -> PricingResult<f64> {
        Ok(self.price(OptionType::Call))
    }

    fn put_price(&self) -> PricingResult<f64> {
        Ok(self.price(OptionType::Put))
    }
}
