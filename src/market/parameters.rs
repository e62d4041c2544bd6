// src/market/parameters.rs

use crate::errors::{PricingError, PricingResult};
use crate::pricing::config::DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};

/// The five scalars every engine is priced from, as a caller supplies them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInputs {
    pub spot_price: f64,
    pub strike_price: f64,
    pub days_to_maturity: u32,
    /// Decimal fraction, not a percentage.
    pub risk_free_rate: f64,
    /// Annualized.
    pub volatility: f64,
}

/// Validated market data shared by all the pricing engines.
///
/// Immutable once built. Maturity is kept both as a day count (the Monte Carlo
/// engine steps once per calendar day) and in years (`days / 365`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarketInputs", into = "MarketInputs")]
pub struct MarketParameters {
    spot: f64,
    strike: f64,
    days_to_maturity: u32,
    time_to_maturity: f64,
    risk_free_rate: f64,
    volatility: f64,
}

impl MarketParameters {
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        days_to_maturity: u32,
        risk_free_rate: f64,
        volatility: f64,
    ) -> PricingResult<Self> {
        if !(spot_price.is_finite() && spot_price > 0.0) {
            return Err(PricingError::degenerate(
                "spot_price",
                format!("must be positive and finite, got {spot_price}"),
            ));
        }
        if !(strike_price.is_finite() && strike_price > 0.0) {
            return Err(PricingError::degenerate(
                "strike_price",
                format!("must be positive and finite, got {strike_price}"),
            ));
        }
        if days_to_maturity == 0 {
            return Err(PricingError::degenerate(
                "days_to_maturity",
                "maturity must be at least one day",
            ));
        }
        if !risk_free_rate.is_finite() {
            return Err(PricingError::degenerate(
                "risk_free_rate",
                format!("must be finite, got {risk_free_rate}"),
            ));
        }
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(PricingError::degenerate(
                "volatility",
                format!("must be non-negative and finite, got {volatility}"),
            ));
        }

        Ok(Self {
            spot: spot_price,
            strike: strike_price,
            days_to_maturity,
            time_to_maturity: days_to_maturity as f64 / DAYS_PER_YEAR,
            risk_free_rate,
            volatility,
        })
    }

    /// Same as [`MarketParameters::new`] but takes the rate as a percentage (5.0 for 5%).
    pub fn from_percent_rate(
        spot_price: f64,
        strike_price: f64,
        days_to_maturity: u32,
        risk_free_rate_percent: f64,
        volatility: f64,
    ) -> PricingResult<Self> {
        Self::new(
            spot_price,
            strike_price,
            days_to_maturity,
            risk_free_rate_percent / 100.0,
            volatility,
        )
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn days_to_maturity(&self) -> u32 {
        self.days_to_maturity
    }

    /// Maturity in years.
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// `exp(-r * T)`, the factor that brings a maturity payoff back to today.
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_maturity).exp()
    }

    /// `S - K * exp(-r * T)`; European call minus put must equal this.
    pub fn parity_spread(&self) -> f64 {
        self.spot - self.strike * self.discount_factor()
    }
}

impl TryFrom<MarketInputs> for MarketParameters {
    type Error = PricingError;

    fn try_from(inputs: MarketInputs) -> Result<Self, Self::Error> {
        Self::new(
            inputs.spot_price,
            inputs.strike_price,
            inputs.days_to_maturity,
            inputs.risk_free_rate,
            inputs.volatility,
        )
    }
}

impl From<MarketParameters> for MarketInputs {
    fn from(params: MarketParameters) -> Self {
        Self {
            spot_price: params.spot,
            strike_price: params.strike,
            days_to_maturity: params.days_to_maturity,
            risk_free_rate: params.risk_free_rate,
            volatility: params.volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_is_days_over_365() {
        let params = MarketParameters::new(100.0, 100.0, 73, 0.05, 0.2).unwrap();
        assert_eq!(params.days_to_maturity(), 73);
        assert!((params.time_to_maturity() - 0.2).abs() < 1e-15, "73 days should be 0.2 years.");
    }

    #[test]
    fn test_percent_rate_is_normalized() {
        let params = MarketParameters::from_percent_rate(100.0, 100.0, 365, 5.0, 0.2).unwrap();
        assert!((params.risk_free_rate() - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_zero_maturity_is_rejected() {
        let err = MarketParameters::new(100.0, 100.0, 0, 0.05, 0.2).unwrap_err();
        assert!(
            matches!(err, PricingError::DegenerateMarketInput { parameter: "days_to_maturity", .. }),
            "Zero days must be rejected, got {err:?}"
        );
    }

    #[test]
    fn test_bad_prices_and_volatility_are_rejected() {
        assert!(MarketParameters::new(0.0, 100.0, 30, 0.05, 0.2).is_err());
        assert!(MarketParameters::new(100.0, -1.0, 30, 0.05, 0.2).is_err());
        assert!(MarketParameters::new(100.0, 100.0, 30, f64::NAN, 0.2).is_err());
        assert!(MarketParameters::new(100.0, 100.0, 30, 0.05, -0.2).is_err());
        // Zero volatility is a legal market; only the lattice refuses it.
        assert!(MarketParameters::new(100.0, 100.0, 30, 0.05, 0.0).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"spot_price":100.0,"strike_price":95.0,"days_to_maturity":30,"risk_free_rate":0.01,"volatility":0.3}"#;
        let params: MarketParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.strike(), 95.0);

        let bad = r#"{"spot_price":100.0,"strike_price":95.0,"days_to_maturity":0,"risk_free_rate":0.01,"volatility":0.3}"#;
        assert!(serde_json::from_str::<MarketParameters>(bad).is_err(), "Zero maturity must not deserialize.");
    }
}
